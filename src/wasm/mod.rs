//! WASM bindings for the editor and viewer surfaces.
//!
//! Blocks, pages and statistics cross the boundary as JSON strings.

use wasm_bindgen::prelude::*;

use crate::document::{validate_blocks, Block};
use crate::{FlowEngine, LayoutConfig, PageTemplate, Px};

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// WASM-exposed pagination engine
#[wasm_bindgen]
pub struct WasmFlowEngine {
    engine: FlowEngine,
}

#[wasm_bindgen]
impl WasmFlowEngine {
    /// Create an engine with the default layout (US Letter at 96 DPI)
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            engine: FlowEngine::default(),
        }
    }

    /// Create an engine from a JSON layout config; missing keys take defaults
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config_json: &str) -> Result<WasmFlowEngine, JsError> {
        let config = LayoutConfig::from_json_str(config_json)?;
        Ok(Self {
            engine: FlowEngine::new(config)?,
        })
    }

    /// Get the active layout config as JSON
    #[wasm_bindgen(js_name = layoutConfig)]
    pub fn layout_config(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(self.engine.geometry().config())?)
    }

    #[wasm_bindgen(js_name = usableHeight)]
    pub fn usable_height(&self, has_header: bool, has_footer: bool) -> Px {
        self.engine
            .usable_height(PageTemplate::new(has_header, has_footer))
    }

    /// Height of a single JSON block
    #[wasm_bindgen(js_name = heightOf)]
    pub fn height_of(&self, block_json: &str) -> Result<Px, JsError> {
        let block: Block = serde_json::from_str(block_json)?;
        Ok(self.engine.geometry().height_of(&block))
    }

    /// Paginate a JSON block array; returns a JSON array of pages
    pub fn paginate(
        &self,
        blocks_json: &str,
        has_header: bool,
        has_footer: bool,
    ) -> Result<String, JsError> {
        let blocks = parse_blocks(blocks_json)?;
        let pages = self
            .engine
            .paginate(&blocks, PageTemplate::new(has_header, has_footer));
        Ok(serde_json::to_string(&pages)?)
    }

    #[wasm_bindgen(js_name = pageForBlock)]
    pub fn page_for_block(
        &self,
        blocks_json: &str,
        block_index: usize,
        has_header: bool,
        has_footer: bool,
    ) -> Result<usize, JsError> {
        let blocks = parse_blocks(blocks_json)?;
        Ok(self.engine.page_for_block(
            &blocks,
            block_index,
            PageTemplate::new(has_header, has_footer),
        ))
    }

    /// Whether dropping the candidate block onto the given page would overflow it
    #[wasm_bindgen(js_name = wouldOverflow)]
    pub fn would_overflow(
        &self,
        page_blocks_json: &str,
        candidate_json: &str,
        has_header: bool,
        has_footer: bool,
    ) -> Result<bool, JsError> {
        let page_blocks = parse_blocks(page_blocks_json)?;
        let candidate: Block = serde_json::from_str(candidate_json)?;
        Ok(self.engine.would_overflow(
            &page_blocks,
            &candidate,
            PageTemplate::new(has_header, has_footer),
        ))
    }

    /// Pagination statistics as JSON
    pub fn stats(
        &self,
        blocks_json: &str,
        has_header: bool,
        has_footer: bool,
    ) -> Result<String, JsError> {
        let blocks = parse_blocks(blocks_json)?;
        let stats = self
            .engine
            .stats(&blocks, PageTemplate::new(has_header, has_footer));
        Ok(serde_json::to_string(&stats)?)
    }

    /// Drop zone size for the editor's insertion affordance
    #[wasm_bindgen(js_name = dropZoneSize)]
    pub fn drop_zone_size(&self, active: bool) -> Px {
        self.engine.geometry().drop_zone_size(active)
    }

    /// Reject block arrays containing unknown block types
    pub fn validate(&self, blocks_json: &str) -> Result<(), JsError> {
        let blocks = parse_blocks(blocks_json)?;
        validate_blocks(&blocks)?;
        Ok(())
    }
}

impl Default for WasmFlowEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_blocks(blocks_json: &str) -> serde_json::Result<Vec<Block>> {
    serde_json::from_str(blocks_json)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCKS: &str = r#"[
        {"type": "section"},
        {"type": "paragraph", "content": "Hello"},
        {"type": "pageBreak"},
        {"type": "signatureBlock"}
    ]"#;

    #[test]
    fn test_paginate_json() {
        let engine = WasmFlowEngine::new();
        let pages = engine.paginate(BLOCKS, true, true).ok().unwrap();
        assert_eq!(
            pages,
            r#"[[{"type":"section"},{"type":"paragraph","content":"Hello"}],[{"type":"signatureBlock"}]]"#
        );
    }

    #[test]
    fn test_json_introspection() {
        let engine = WasmFlowEngine::new();
        assert_eq!(engine.usable_height(true, true), 734);
        assert_eq!(engine.usable_height(false, false), 820);
        assert_eq!(engine.page_for_block(BLOCKS, 2, true, true).ok(), Some(1));
        assert_eq!(engine.height_of(r#"{"type":"divider"}"#).ok(), Some(24));
        assert_eq!(
            engine
                .would_overflow(BLOCKS, r#"{"type":"checkbox"}"#, true, true)
                .ok(),
            Some(false)
        );
        assert_eq!(engine.drop_zone_size(true), 48);
        assert!(engine.validate(BLOCKS).is_ok());

        let stats = engine.stats(BLOCKS, true, true).ok().unwrap();
        let stats: serde_json::Value = serde_json::from_str(&stats).unwrap();
        assert_eq!(stats["totalPages"], 2);
        assert_eq!(stats["totalBlocks"], 3);
    }
}
