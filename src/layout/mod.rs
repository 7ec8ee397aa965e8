//! Layout: geometry, block sizing and pagination

pub mod config;
mod geometry;
mod pagination;
mod stats;

pub use config::{DropZone, FixedBlockHeights, LayoutConfig, Typography};
pub use geometry::{
    Geometry, PageTemplate, Px, BULLET_ITEM_HEIGHT, BULLET_LIST_BASE_HEIGHT,
    FALLBACK_BLOCK_HEIGHT, PARAGRAPH_PADDING,
};
pub use pagination::{paginate, Page};
pub use stats::{
    page_for_block, page_start_index, pagination_stats, placed_index, remaining_height,
    used_height, would_overflow, PageStats, PaginationStats,
};
