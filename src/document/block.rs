//! Block-level content units and their JSON wire form

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::BlockError;

/// Editorial payload carried by a block (ids, labels, legal text).
/// Never consulted when sizing a block.
pub type Attrs = Map<String, Value>;

/// Block types whose height is a configured constant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FixedKind {
    Section,
    Heading,
    SignatureField,
    SignatureBlock,
    InitialsField,
    DateField,
    TextField,
    Checkbox,
    Acknowledgment,
    Dropdown,
    Divider,
    /// Forced page break. Zero height; consumed by pagination, never placed on a page.
    PageBreak,
}

impl FixedKind {
    pub const ALL: [FixedKind; 12] = [
        FixedKind::Section,
        FixedKind::Heading,
        FixedKind::SignatureField,
        FixedKind::SignatureBlock,
        FixedKind::InitialsField,
        FixedKind::DateField,
        FixedKind::TextField,
        FixedKind::Checkbox,
        FixedKind::Acknowledgment,
        FixedKind::Dropdown,
        FixedKind::Divider,
        FixedKind::PageBreak,
    ];

    /// Wire tag for this kind
    pub fn tag(self) -> &'static str {
        match self {
            FixedKind::Section => "section",
            FixedKind::Heading => "heading",
            FixedKind::SignatureField => "signatureField",
            FixedKind::SignatureBlock => "signatureBlock",
            FixedKind::InitialsField => "initialsField",
            FixedKind::DateField => "dateField",
            FixedKind::TextField => "textField",
            FixedKind::Checkbox => "checkbox",
            FixedKind::Acknowledgment => "acknowledgment",
            FixedKind::Dropdown => "dropdown",
            FixedKind::Divider => "divider",
            FixedKind::PageBreak => "pageBreak",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

pub const PARAGRAPH_TAG: &str = "paragraph";
pub const BULLET_LIST_TAG: &str = "bulletList";

/// The kind of block, with the content that drives height for variable kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    Fixed(FixedKind),
    /// Free text; height grows with text length
    Paragraph { content: String },
    /// Bulleted list; height grows with item count
    BulletList { items: Vec<String> },
    /// A tag this crate does not recognize. Sized with a fallback height.
    Unknown { tag: String },
}

impl BlockKind {
    /// Wire tag for this kind
    pub fn tag(&self) -> &str {
        match self {
            BlockKind::Fixed(kind) => kind.tag(),
            BlockKind::Paragraph { .. } => PARAGRAPH_TAG,
            BlockKind::BulletList { .. } => BULLET_LIST_TAG,
            BlockKind::Unknown { tag } => tag,
        }
    }

    pub fn is_page_break(&self) -> bool {
        matches!(self, BlockKind::Fixed(FixedKind::PageBreak))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, BlockKind::Unknown { .. })
    }
}

/// One layout unit of a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBlock", into = "RawBlock")]
pub struct Block {
    pub kind: BlockKind,
    pub attrs: Attrs,
}

impl Block {
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            attrs: Attrs::new(),
        }
    }

    pub fn fixed(kind: FixedKind) -> Self {
        Self::new(BlockKind::Fixed(kind))
    }

    pub fn paragraph(content: impl Into<String>) -> Self {
        Self::new(BlockKind::Paragraph {
            content: content.into(),
        })
    }

    pub fn bullet_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(BlockKind::BulletList {
            items: items.into_iter().map(Into::into).collect(),
        })
    }

    pub fn page_break() -> Self {
        Self::fixed(FixedKind::PageBreak)
    }

    pub fn unknown(tag: impl Into<String>) -> Self {
        Self::new(BlockKind::Unknown { tag: tag.into() })
    }

    /// Attach an editorial attribute
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn is_page_break(&self) -> bool {
        self.kind.is_page_break()
    }
}

/// Length of paragraph text in UTF-16 code units, the same count the
/// browser's `String.length` reports
pub fn text_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Wire shape: `{"type": "...", ...payload}`
#[derive(Serialize, Deserialize)]
struct RawBlock {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    tag: Option<String>,
    #[serde(flatten)]
    fields: Attrs,
}

impl TryFrom<RawBlock> for Block {
    type Error = BlockError;

    fn try_from(raw: RawBlock) -> Result<Self, Self::Error> {
        let tag = raw.tag.ok_or(BlockError::MissingType)?;
        let mut attrs = raw.fields;

        let kind = match FixedKind::from_tag(&tag) {
            Some(kind) => BlockKind::Fixed(kind),
            None => match tag.as_str() {
                PARAGRAPH_TAG => BlockKind::Paragraph {
                    content: take_content(&mut attrs),
                },
                BULLET_LIST_TAG => BlockKind::BulletList {
                    items: take_items(&mut attrs),
                },
                _ => {
                    warn!(tag = %tag, "unknown block type, using fallback height");
                    BlockKind::Unknown { tag }
                }
            },
        };

        Ok(Block { kind, attrs })
    }
}

impl From<Block> for RawBlock {
    fn from(block: Block) -> Self {
        let Block { kind, mut attrs } = block;
        let tag = match kind {
            BlockKind::Fixed(kind) => kind.tag().to_string(),
            BlockKind::Paragraph { content } => {
                attrs.insert("content".into(), Value::String(content));
                PARAGRAPH_TAG.to_string()
            }
            BlockKind::BulletList { items } => {
                attrs.insert(
                    "items".into(),
                    Value::Array(items.into_iter().map(Value::String).collect()),
                );
                BULLET_LIST_TAG.to_string()
            }
            BlockKind::Unknown { tag } => tag,
        };

        RawBlock {
            tag: Some(tag),
            fields: attrs,
        }
    }
}

fn take_content(attrs: &mut Attrs) -> String {
    match attrs.remove("content") {
        Some(Value::String(content)) => content,
        None | Some(Value::Null) => String::new(),
        Some(other) => {
            warn!(content = %other, "paragraph content is not a string, treating as empty");
            String::new()
        }
    }
}

fn take_items(attrs: &mut Attrs) -> Vec<String> {
    match attrs.remove("items") {
        Some(Value::Array(values)) => values
            .into_iter()
            .map(|value| match value {
                Value::String(item) => item,
                other => other.to_string(),
            })
            .collect(),
        None | Some(Value::Null) => Vec::new(),
        Some(other) => {
            warn!(items = %other, "bullet list items are not an array, treating as empty");
            Vec::new()
        }
    }
}
