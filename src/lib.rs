//! docflow: document flow and pagination engine
//!
//! This crate lays out ordered lists of document blocks (sections, form
//! fields, paragraphs, bullet lists, forced page breaks) onto fixed-size pages:
//! - Geometry: page dimensions and per-block heights from one frozen config
//! - Pagination: a single greedy pass, deterministic and side-effect free
//! - Introspection: page lookup, fill statistics, drop overflow previews
//!
//! The authoring editor and the signing viewer both paginate through a
//! [`FlowEngine`], which is what keeps their page boundaries identical.

pub mod document;
pub mod error;
pub mod layout;
pub mod wasm;

use std::sync::Arc;

use tracing::debug;

// Re-export WASM types for direct use
pub use wasm::WasmFlowEngine;

// Re-export primary types
pub use document::{validate_blocks, Block, BlockKind, FixedKind, FlowDocument};
pub use error::{BlockError, ConfigError, Error, Result};
pub use layout::{
    paginate, Geometry, LayoutConfig, Page, PageStats, PageTemplate, PaginationStats, Px,
};

/// Pagination entry points bound to one shared [`Geometry`]
#[derive(Debug, Clone, Default)]
pub struct FlowEngine {
    geometry: Arc<Geometry>,
}

impl FlowEngine {
    /// Validate `config` and build an engine around it
    pub fn new(config: LayoutConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_geometry(Arc::new(Geometry::new(config)?)))
    }

    /// Share an existing geometry, e.g. between an editor and a viewer
    pub fn from_geometry(geometry: Arc<Geometry>) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn shared_geometry(&self) -> Arc<Geometry> {
        Arc::clone(&self.geometry)
    }

    pub fn usable_height(&self, template: PageTemplate) -> Px {
        self.geometry.usable_height(template)
    }

    /// Paginate `blocks` for the given page template
    pub fn paginate<'a>(&self, blocks: &'a [Block], template: PageTemplate) -> Vec<Page<'a>> {
        let usable_height = self.usable_height(template);
        let pages = paginate(&self.geometry, blocks, usable_height);
        debug!(
            blocks = blocks.len(),
            pages = pages.len(),
            usable_height,
            "paginated"
        );
        pages
    }

    pub fn paginate_document<'a>(&self, document: &'a FlowDocument) -> Vec<Page<'a>> {
        self.paginate(&document.blocks, document.template)
    }

    /// Page holding the placed block at `block_index`
    pub fn page_for_block(
        &self,
        blocks: &[Block],
        block_index: usize,
        template: PageTemplate,
    ) -> usize {
        layout::page_for_block(
            &self.geometry,
            blocks,
            block_index,
            self.usable_height(template),
        )
    }

    /// Whether dropping `candidate` onto a page holding `page_blocks` would overflow it
    pub fn would_overflow<'b, I>(
        &self,
        page_blocks: I,
        candidate: &Block,
        template: PageTemplate,
    ) -> bool
    where
        I: IntoIterator<Item = &'b Block>,
    {
        layout::would_overflow(
            &self.geometry,
            page_blocks,
            candidate,
            self.usable_height(template),
        )
    }

    pub fn stats(&self, blocks: &[Block], template: PageTemplate) -> PaginationStats {
        layout::pagination_stats(&self.geometry, blocks, self.usable_height(template))
    }
}
