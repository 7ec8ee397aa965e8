//! Document model: ordered block lists as the editor and viewer supply them

mod block;

pub use block::{text_len, Attrs, Block, BlockKind, FixedKind, BULLET_LIST_TAG, PARAGRAPH_TAG};

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BlockError, Result};
use crate::layout::PageTemplate;

/// A stored document: the block list plus the page template it is shown with.
///
/// The pagination core never holds on to one of these; it borrows `blocks`
/// for the duration of a call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowDocument {
    #[serde(flatten)]
    pub template: PageTemplate,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl FlowDocument {
    pub fn new(template: PageTemplate, blocks: Vec<Block>) -> Self {
        Self { template, blocks }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

/// Reject block lists containing tags outside the known set.
///
/// Pagination itself never fails on unknown tags; callers that want the
/// strict policy run this first.
pub fn validate_blocks(blocks: &[Block]) -> Result<(), BlockError> {
    match blocks
        .iter()
        .enumerate()
        .find(|(_, block)| block.kind.is_unknown())
    {
        Some((index, block)) => Err(BlockError::UnknownBlockType {
            index,
            tag: block.kind.tag().to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_from_json() {
        let doc = FlowDocument::from_json_str(
            r#"{
                "hasHeader": false,
                "blocks": [
                    {"type": "section", "title": "Consent"},
                    {"type": "pageBreak"},
                    {"type": "signatureBlock"}
                ]
            }"#,
        )
        .unwrap();

        assert!(!doc.template.has_header);
        assert!(doc.template.has_footer);
        assert_eq!(doc.blocks.len(), 3);
        assert!(doc.blocks[1].is_page_break());
    }

    #[test]
    fn test_document_defaults() {
        let doc = FlowDocument::from_json_str("{}").unwrap();
        assert_eq!(doc.template, PageTemplate::default());
        assert!(doc.blocks.is_empty());
    }

    #[test]
    fn test_validate_blocks() {
        let ok = vec![
            Block::fixed(FixedKind::Section),
            Block::paragraph("text"),
            Block::page_break(),
        ];
        assert!(validate_blocks(&ok).is_ok());

        let bad = vec![
            Block::fixed(FixedKind::Section),
            Block::unknown("carousel"),
            Block::unknown("map"),
        ];
        assert_eq!(
            validate_blocks(&bad),
            Err(BlockError::UnknownBlockType {
                index: 1,
                tag: "carousel".into()
            })
        );
    }
}
