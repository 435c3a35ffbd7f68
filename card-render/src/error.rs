//! Error types for card rendering

use crate::side::Side;
use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors that can occur while rendering a card side.
#[derive(Error, Debug)]
pub enum RenderError {
    /// References for a side were requested that this render cannot produce.
    ///
    /// Raised when the front's references are requested from a resolver holding back-side
    /// content and no precomputed front list was supplied at construction.
    #[error("cannot resolve {requested} references while rendering the {current} side without a precomputed list")]
    InvalidSideRequest { requested: Side, current: Side },

    /// The card template shell is malformed.
    #[error("Template error: {0}")]
    Template(String),

    /// I/O error while loading a template or card file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Card data could not be decoded.
    #[error("Card data error: {0}")]
    Json(#[from] serde_json::Error),
}
