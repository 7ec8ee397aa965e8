//! Error types for configuration and block validation

use thiserror::Error;

use crate::document::FixedKind;

/// Invalid layout configuration. Always fatal: a [`Geometry`](crate::layout::Geometry)
/// is never built from a config that fails these checks.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error(
        "content area is not positive: page height {page_height} leaves nothing after \
         margins ({margins}), header ({header}) and footer ({footer})"
    )]
    NoContentArea {
        page_height: u32,
        margins: u32,
        header: u32,
        footer: u32,
    },

    #[error("usable page height is zero after applying safety margin {safety_margin}")]
    NoUsableHeight { safety_margin: f64 },

    #[error("safety margin must be in (0, 1], got {0}")]
    SafetyMargin(f64),

    #[error("typography.charsPerLine must be greater than zero")]
    ZeroCharsPerLine,

    #[error("no fixed height configured for block type {0:?}")]
    MissingFixedHeight(FixedKind),

    #[error("page break markers must have zero height, got {0}")]
    NonZeroPageBreak(u32),
}

/// A block list rejected by strict validation or by the wire decoder.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BlockError {
    #[error("block {index} has unknown type `{tag}`")]
    UnknownBlockType { index: usize, tag: String },

    #[error("block is missing its `type` tag")]
    MissingType,
}

/// All errors the crate can produce
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Block(#[from] BlockError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
