//! Pagination: distributing blocks across fixed-height pages

use serde::{Serialize, Serializer};
use smallvec::SmallVec;

use crate::document::Block;
use crate::layout::geometry::{Geometry, Px};

/// The blocks placed on one page, borrowed from the paginated block list.
///
/// Page break markers are never stored on a page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page<'a> {
    blocks: SmallVec<[&'a Block; 16]>,
}

impl<'a> Page<'a> {
    /// Create an empty page
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Block> + '_ {
        self.blocks.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Total height of the blocks on this page
    pub fn used_height(&self, geometry: &Geometry) -> Px {
        crate::layout::used_height(geometry, self.iter())
    }

    fn push(&mut self, block: &'a Block) {
        self.blocks.push(block);
    }
}

impl Serialize for Page<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// Split `blocks` into pages of at most `usable_height`.
///
/// Single greedy pass in input order:
/// - a page break closes the current page (even if empty) and is dropped
/// - a block that does not fit closes the current page, unless the page is
///   still empty, in which case the block is placed there regardless of size
///
/// The result always has at least one page.
pub fn paginate<'a>(geometry: &Geometry, blocks: &'a [Block], usable_height: Px) -> Vec<Page<'a>> {
    let mut pages = Vec::new();
    let mut current = Page::new();
    let mut current_height: Px = 0;

    for block in blocks {
        if block.is_page_break() {
            pages.push(std::mem::take(&mut current));
            current_height = 0;
            continue;
        }

        let height = geometry.height_of(block);
        if current_height.saturating_add(height) > usable_height && !current.is_empty() {
            pages.push(std::mem::take(&mut current));
            current_height = 0;
        }

        current.push(block);
        current_height = current_height.saturating_add(height);
    }

    pages.push(current);
    pages
}
