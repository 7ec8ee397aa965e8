//! Layout configuration: page geometry, block heights, typography

use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::document::FixedKind;
use crate::error::Result;

/// US Letter at 96 DPI
pub const DEFAULT_PAGE_WIDTH: u32 = 816;
pub const DEFAULT_PAGE_HEIGHT: u32 = 1056;
/// 0.75" margins
pub const DEFAULT_PAGE_MARGIN: u32 = 72;
pub const DEFAULT_HEADER_HEIGHT: u32 = 48;
pub const DEFAULT_FOOTER_HEIGHT: u32 = 48;
pub const DEFAULT_SAFETY_MARGIN: f64 = 0.9;

/// Complete layout configuration.
///
/// Plain data; it only becomes usable for layout once wrapped in a
/// [`Geometry`](super::Geometry), which validates it and freezes it.
/// Partial JSON documents are overlaid on the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub page_width: u32,
    pub page_height: u32,
    pub page_margin: u32,
    pub header_height: u32,
    pub footer_height: u32,
    /// Fraction of the raw content height actually used, in (0, 1]
    pub safety_margin: f64,
    pub fixed_block_heights: FixedBlockHeights,
    pub typography: Typography,
    pub drop_zone: DropZone,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: DEFAULT_PAGE_WIDTH,
            page_height: DEFAULT_PAGE_HEIGHT,
            page_margin: DEFAULT_PAGE_MARGIN,
            header_height: DEFAULT_HEADER_HEIGHT,
            footer_height: DEFAULT_FOOTER_HEIGHT,
            safety_margin: DEFAULT_SAFETY_MARGIN,
            fixed_block_heights: FixedBlockHeights::default(),
            typography: Typography::default(),
            drop_zone: DropZone::default(),
        }
    }
}

impl LayoutConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

/// Constants used to estimate the height of paragraphs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Typography {
    pub chars_per_line: u32,
    pub line_height: u32,
    /// Minimum paragraph height, even when empty
    pub paragraph_base_height: u32,
    pub base_font_size: u32,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            chars_per_line: 100,
            line_height: 16,
            paragraph_base_height: 24,
            base_font_size: 14,
        }
    }
}

/// Editor drag-and-drop affordance sizing. Not used by pagination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DropZone {
    pub resting_size: u32,
    pub active_size: u32,
    /// Milliseconds
    pub transition_duration: u32,
}

impl Default for DropZone {
    fn default() -> Self {
        Self {
            resting_size: 8,
            active_size: 48,
            transition_duration: 150,
        }
    }
}

/// Height table for [`FixedKind`] blocks.
///
/// Deserializing merges the given entries over the default table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FixedBlockHeights(FxHashMap<FixedKind, u32>);

impl Default for FixedBlockHeights {
    fn default() -> Self {
        Self(
            FixedKind::ALL
                .into_iter()
                .map(|kind| (kind, default_fixed_height(kind)))
                .collect(),
        )
    }
}

impl<'de> Deserialize<'de> for FixedBlockHeights {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let overrides = FxHashMap::<FixedKind, u32>::deserialize(deserializer)?;
        let mut heights = Self::default();
        heights.0.extend(overrides);
        Ok(heights)
    }
}

impl FixedBlockHeights {
    /// A table with no entries
    pub fn empty() -> Self {
        Self(FxHashMap::default())
    }

    pub fn get(&self, kind: FixedKind) -> Option<u32> {
        self.0.get(&kind).copied()
    }

    pub fn set(&mut self, kind: FixedKind, height: u32) {
        self.0.insert(kind, height);
    }

    pub fn with(mut self, kind: FixedKind, height: u32) -> Self {
        self.set(kind, height);
        self
    }
}

fn default_fixed_height(kind: FixedKind) -> u32 {
    match kind {
        FixedKind::Section => 70,
        FixedKind::Heading => 48,
        FixedKind::SignatureField => 80,
        FixedKind::SignatureBlock => 65,
        FixedKind::InitialsField => 60,
        FixedKind::DateField => 50,
        FixedKind::TextField => 50,
        FixedKind::Checkbox => 32,
        FixedKind::Acknowledgment => 60,
        FixedKind::Dropdown => 50,
        FixedKind::Divider => 24,
        FixedKind::PageBreak => 0,
    }
}
