//! Page geometry and block sizing

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::document::{text_len, Block, BlockKind, FixedKind};
use crate::error::ConfigError;
use crate::layout::config::{LayoutConfig, Typography};

/// Device-independent pixels
pub type Px = u32;

/// Height used for blocks whose type is not recognized
pub const FALLBACK_BLOCK_HEIGHT: Px = 50;

/// Extra space below the text of a paragraph
pub const PARAGRAPH_PADDING: Px = 12;

/// Bullet list height before any items
pub const BULLET_LIST_BASE_HEIGHT: Px = 24;

/// Height added per bullet list item
pub const BULLET_ITEM_HEIGHT: Px = 28;

/// Which bands of the page template are present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageTemplate {
    pub has_header: bool,
    pub has_footer: bool,
}

impl Default for PageTemplate {
    fn default() -> Self {
        Self {
            has_header: true,
            has_footer: true,
        }
    }
}

impl PageTemplate {
    pub fn new(has_header: bool, has_footer: bool) -> Self {
        Self {
            has_header,
            has_footer,
        }
    }

    /// A template with neither header nor footer
    pub fn bare() -> Self {
        Self::new(false, false)
    }
}

/// A validated, immutable layout configuration.
///
/// Both the editor and the viewer size blocks and pages through the same
/// `Geometry`, so their page boundaries cannot diverge.
#[derive(Debug, Clone)]
pub struct Geometry {
    config: LayoutConfig,
    usable_height_default: Px,
}

impl Default for Geometry {
    fn default() -> Self {
        let config = LayoutConfig::default();
        Self {
            usable_height_default: compute_usable_height(&config, PageTemplate::default()),
            config,
        }
    }
}

impl Geometry {
    /// Validate `config` and freeze it
    pub fn new(config: LayoutConfig) -> Result<Self, ConfigError> {
        validate(&config)?;

        // Header and footer together leave the least room of any template
        let usable_height_default = compute_usable_height(&config, PageTemplate::default());
        if usable_height_default == 0 {
            return Err(ConfigError::NoUsableHeight {
                safety_margin: config.safety_margin,
            });
        }

        info!(
            page_width = config.page_width,
            page_height = config.page_height,
            usable_height = usable_height_default,
            "layout geometry ready"
        );

        Ok(Self {
            config,
            usable_height_default,
        })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Height a block occupies on a page
    pub fn height_of(&self, block: &Block) -> Px {
        match &block.kind {
            BlockKind::Fixed(FixedKind::PageBreak) => 0,
            BlockKind::Fixed(kind) => self
                .config
                .fixed_block_heights
                .get(*kind)
                .unwrap_or(FALLBACK_BLOCK_HEIGHT),
            BlockKind::Paragraph { content } => {
                paragraph_height(&self.config.typography, text_len(content))
            }
            BlockKind::BulletList { items } => bullet_list_height(items.len()),
            BlockKind::Unknown { .. } => FALLBACK_BLOCK_HEIGHT,
        }
    }

    /// Vertical space available for blocks on a page using `template`
    pub fn usable_height(&self, template: PageTemplate) -> Px {
        if template == PageTemplate::default() {
            self.usable_height_default
        } else {
            compute_usable_height(&self.config, template)
        }
    }

    /// Usable height with both header and footer present
    pub fn usable_height_default(&self) -> Px {
        self.usable_height_default
    }

    /// Size of an editor drop zone, expanded while a drop is being previewed
    pub fn drop_zone_size(&self, active: bool) -> Px {
        if active {
            self.config.drop_zone.active_size
        } else {
            self.config.drop_zone.resting_size
        }
    }
}

fn paragraph_height(typography: &Typography, len: usize) -> Px {
    let lines = (len as u64).div_ceil(u64::from(typography.chars_per_line.max(1)));
    let text_height = lines
        .saturating_mul(u64::from(typography.line_height))
        .saturating_add(u64::from(PARAGRAPH_PADDING));
    let text_height = Px::try_from(text_height).unwrap_or(Px::MAX);
    text_height.max(typography.paragraph_base_height)
}

fn bullet_list_height(item_count: usize) -> Px {
    Px::try_from(item_count)
        .unwrap_or(Px::MAX)
        .saturating_mul(BULLET_ITEM_HEIGHT)
        .saturating_add(BULLET_LIST_BASE_HEIGHT)
}

fn reserved_height(config: &LayoutConfig, template: PageTemplate) -> u64 {
    let header = if template.has_header {
        config.header_height
    } else {
        0
    };
    let footer = if template.has_footer {
        config.footer_height
    } else {
        0
    };
    2 * u64::from(config.page_margin) + u64::from(header) + u64::from(footer)
}

fn compute_usable_height(config: &LayoutConfig, template: PageTemplate) -> Px {
    let content = u64::from(config.page_height).saturating_sub(reserved_height(config, template));
    (content as f64 * config.safety_margin).floor() as Px
}

fn validate(config: &LayoutConfig) -> Result<(), ConfigError> {
    if reserved_height(config, PageTemplate::default()) >= u64::from(config.page_height) {
        return Err(ConfigError::NoContentArea {
            page_height: config.page_height,
            margins: config.page_margin.saturating_mul(2),
            header: config.header_height,
            footer: config.footer_height,
        });
    }

    if !(config.safety_margin > 0.0 && config.safety_margin <= 1.0) {
        return Err(ConfigError::SafetyMargin(config.safety_margin));
    }

    if config.typography.chars_per_line == 0 {
        return Err(ConfigError::ZeroCharsPerLine);
    }

    for kind in FixedKind::ALL {
        match config.fixed_block_heights.get(kind) {
            None => return Err(ConfigError::MissingFixedHeight(kind)),
            Some(height) if kind == FixedKind::PageBreak && height != 0 => {
                return Err(ConfigError::NonZeroPageBreak(height))
            }
            Some(_) => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::config::FixedBlockHeights;

    #[test]
    fn test_default_geometry_is_valid() {
        let built = Geometry::new(LayoutConfig::default()).unwrap();
        assert_eq!(
            built.usable_height_default(),
            Geometry::default().usable_height_default()
        );
    }

    #[test]
    fn test_usable_height() {
        let geometry = Geometry::default();
        // floor((1056 - 144 - 48 - 48) * 0.9)
        assert_eq!(geometry.usable_height_default(), 734);
        assert_eq!(geometry.usable_height(PageTemplate::default()), 734);
        // floor((1056 - 144) * 0.9)
        assert_eq!(geometry.usable_height(PageTemplate::bare()), 820);
        assert_eq!(geometry.usable_height(PageTemplate::new(true, false)), 777);
        assert_eq!(geometry.usable_height(PageTemplate::new(false, true)), 777);
    }

    #[test]
    fn test_header_footer_sensitivity() {
        let geometry = Geometry::default();
        let config = geometry.config();
        let with = geometry.usable_height(PageTemplate::new(true, true));
        let without = geometry.usable_height(PageTemplate::bare());
        assert!(with < without);

        // The gap matches the scaled bands up to floor rounding
        let expected =
            f64::from(config.header_height + config.footer_height) * config.safety_margin;
        assert!((f64::from(without - with) - expected).abs() < 1.0);

        let header_only = geometry.usable_height(PageTemplate::new(true, false));
        assert!(with <= header_only && header_only <= without);
    }

    #[test]
    fn test_fixed_heights() {
        let geometry = Geometry::default();
        assert_eq!(geometry.height_of(&Block::fixed(FixedKind::Section)), 70);
        assert_eq!(geometry.height_of(&Block::fixed(FixedKind::SignatureBlock)), 65);
        assert_eq!(geometry.height_of(&Block::fixed(FixedKind::Checkbox)), 32);
        assert_eq!(geometry.height_of(&Block::page_break()), 0);
    }

    #[test]
    fn test_paragraph_height() {
        let geometry = Geometry::default();
        // ceil(350 / 100) * 16 + 12
        assert_eq!(geometry.height_of(&Block::paragraph("x".repeat(350))), 76);
        assert_eq!(geometry.height_of(&Block::paragraph("x".repeat(100))), 28);
        assert_eq!(geometry.height_of(&Block::paragraph("x".repeat(101))), 44);
        // Empty and short paragraphs never go below the base height
        assert_eq!(geometry.height_of(&Block::paragraph("")), 24);
        assert_eq!(geometry.height_of(&Block::paragraph("hi")), 28);
    }

    #[test]
    fn test_paragraph_height_counts_surrogate_pairs() {
        let geometry = Geometry::default();
        // 100 emoji are 200 UTF-16 units: ceil(200 / 100) * 16 + 12
        assert_eq!(
            geometry.height_of(&Block::paragraph("\u{1F600}".repeat(100))),
            44
        );
        assert_eq!(
            geometry.height_of(&Block::paragraph("\u{1F600}".repeat(50))),
            28
        );
    }

    #[test]
    fn test_bullet_list_height() {
        let geometry = Geometry::default();
        assert_eq!(
            geometry.height_of(&Block::bullet_list(["a", "b", "c", "d", "e"])),
            164
        );
        assert_eq!(geometry.height_of(&Block::bullet_list(Vec::<String>::new())), 24);
    }

    #[test]
    fn test_unknown_block_uses_fallback() {
        let geometry = Geometry::default();
        assert_eq!(
            geometry.height_of(&Block::unknown("carousel")),
            FALLBACK_BLOCK_HEIGHT
        );
    }

    #[test]
    fn test_drop_zone_size() {
        let geometry = Geometry::default();
        assert_eq!(geometry.drop_zone_size(false), 8);
        assert_eq!(geometry.drop_zone_size(true), 48);
    }

    #[test]
    fn test_rejects_no_content_area() {
        let config = LayoutConfig {
            page_height: 300,
            page_margin: 100,
            header_height: 50,
            footer_height: 50,
            ..LayoutConfig::default()
        };
        assert_eq!(
            Geometry::new(config).unwrap_err(),
            ConfigError::NoContentArea {
                page_height: 300,
                margins: 200,
                header: 50,
                footer: 50,
            }
        );
    }

    #[test]
    fn test_rejects_zero_usable_height() {
        // 1px of content area scales down to nothing
        let config = LayoutConfig {
            page_height: 300,
            page_margin: 100,
            header_height: 49,
            footer_height: 50,
            ..LayoutConfig::default()
        };
        assert_eq!(
            Geometry::new(config).unwrap_err(),
            ConfigError::NoUsableHeight { safety_margin: 0.9 }
        );

        let config = LayoutConfig {
            page_height: 300,
            page_margin: 100,
            header_height: 49,
            footer_height: 50,
            safety_margin: 1.0,
            ..LayoutConfig::default()
        };
        let geometry = Geometry::new(config).unwrap();
        assert_eq!(geometry.usable_height_default(), 1);
        assert_eq!(geometry.usable_height(PageTemplate::bare()), 100);
    }

    #[test]
    fn test_rejects_bad_safety_margin() {
        for safety_margin in [0.0, -0.5, 1.01, f64::NAN] {
            let config = LayoutConfig {
                safety_margin,
                ..LayoutConfig::default()
            };
            assert!(matches!(
                Geometry::new(config),
                Err(ConfigError::SafetyMargin(_))
            ));
        }

        let full = LayoutConfig {
            safety_margin: 1.0,
            ..LayoutConfig::default()
        };
        assert_eq!(Geometry::new(full).unwrap().usable_height_default(), 816);
    }

    #[test]
    fn test_rejects_bad_tables() {
        let config = LayoutConfig {
            fixed_block_heights: FixedBlockHeights::empty().with(FixedKind::Section, 70),
            ..LayoutConfig::default()
        };
        assert!(matches!(
            Geometry::new(config),
            Err(ConfigError::MissingFixedHeight(_))
        ));

        let config = LayoutConfig {
            fixed_block_heights: FixedBlockHeights::default().with(FixedKind::PageBreak, 5),
            ..LayoutConfig::default()
        };
        assert_eq!(
            Geometry::new(config).unwrap_err(),
            ConfigError::NonZeroPageBreak(5)
        );

        let mut config = LayoutConfig::default();
        config.typography.chars_per_line = 0;
        assert_eq!(
            Geometry::new(config).unwrap_err(),
            ConfigError::ZeroCharsPerLine
        );
    }
}
