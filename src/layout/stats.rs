//! Page introspection built on the paginator and block sizing.
//!
//! Nothing here has its own notion of fit: every answer comes from
//! [`paginate`] or [`Geometry::height_of`], so editor previews and the
//! rendered pages agree.

use serde::Serialize;

use crate::document::Block;
use crate::layout::geometry::{Geometry, Px};
use crate::layout::pagination::{paginate, Page};

/// Number of blocks placed on pages before `page_index`
pub fn page_start_index(pages: &[Page<'_>], page_index: usize) -> usize {
    pages.iter().take(page_index).map(Page::len).sum()
}

/// Index of the page holding the block at `block_index`.
///
/// `block_index` counts placed blocks only (page break markers excluded), the
/// same numbering [`page_start_index`] uses. Indices past the end resolve to
/// the last page.
pub fn page_for_block(
    geometry: &Geometry,
    blocks: &[Block],
    block_index: usize,
    usable_height: Px,
) -> usize {
    let pages = paginate(geometry, blocks, usable_height);

    let mut start = 0;
    for (page_index, page) in pages.iter().enumerate() {
        let end = start + page.len();
        if block_index < end {
            return page_index;
        }
        start = end;
    }

    pages.len().saturating_sub(1)
}

/// Translate an index into `blocks` to the placed-block numbering used by
/// [`page_for_block`]. Page break markers have no placed index.
pub fn placed_index(blocks: &[Block], raw_index: usize) -> Option<usize> {
    let block = blocks.get(raw_index)?;
    if block.is_page_break() {
        return None;
    }
    Some(
        blocks[..raw_index]
            .iter()
            .filter(|block| !block.is_page_break())
            .count(),
    )
}

/// Sum of block heights
pub fn used_height<'b, I>(geometry: &Geometry, blocks: I) -> Px
where
    I: IntoIterator<Item = &'b Block>,
{
    blocks
        .into_iter()
        .fold(0, |total: Px, block| total.saturating_add(geometry.height_of(block)))
}

/// Space left on a page, never below zero
pub fn remaining_height<'b, I>(geometry: &Geometry, blocks: I, usable_height: Px) -> Px
where
    I: IntoIterator<Item = &'b Block>,
{
    usable_height.saturating_sub(used_height(geometry, blocks))
}

/// Whether appending `candidate` to a page holding `blocks` would push it past
/// `usable_height`. Matches the paginator's break test for non-empty pages.
pub fn would_overflow<'b, I>(
    geometry: &Geometry,
    blocks: I,
    candidate: &Block,
    usable_height: Px,
) -> bool
where
    I: IntoIterator<Item = &'b Block>,
{
    geometry.height_of(candidate) > remaining_height(geometry, blocks, usable_height)
}

/// Fill figures for one page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageStats {
    pub block_count: usize,
    pub used_height: Px,
    pub remaining_height: Px,
    /// `used / usable * 100`; exceeds 100 on a page holding an oversized block
    pub utilization_percent: f64,
}

/// Fill figures for a whole paginated document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationStats {
    pub total_pages: usize,
    /// Placed blocks; page break markers are not counted
    pub total_blocks: usize,
    pub per_page: Vec<PageStats>,
    pub average_utilization: f64,
}

pub fn pagination_stats(geometry: &Geometry, blocks: &[Block], usable_height: Px) -> PaginationStats {
    let pages = paginate(geometry, blocks, usable_height);

    let per_page: Vec<PageStats> = pages
        .iter()
        .map(|page| {
            let used = page.used_height(geometry);
            PageStats {
                block_count: page.len(),
                used_height: used,
                remaining_height: usable_height.saturating_sub(used),
                utilization_percent: utilization(used, usable_height),
            }
        })
        .collect();

    let average_utilization = if per_page.is_empty() {
        0.0
    } else {
        per_page
            .iter()
            .map(|page| page.utilization_percent)
            .sum::<f64>()
            / per_page.len() as f64
    };

    PaginationStats {
        total_pages: pages.len(),
        total_blocks: per_page.iter().map(|page| page.block_count).sum(),
        per_page,
        average_utilization,
    }
}

fn utilization(used: Px, usable: Px) -> f64 {
    if usable == 0 {
        return 0.0;
    }
    f64::from(used) / f64::from(usable) * 100.0
}
