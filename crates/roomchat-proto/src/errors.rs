//! Protocol error types.

use thiserror::Error;

/// Result alias for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors from encoding or decoding wire frames.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Frame text is not valid JSON.
    #[error("malformed JSON frame: {0}")]
    MalformedJson(String),

    /// Frame is valid JSON but does not match any known frame shape.
    ///
    /// Covers non-object frames and a missing or unknown `type` tag.
    #[error("invalid frame: {0}")]
    InvalidFrame(String),

    /// Frame could not be serialized.
    #[error("failed to encode frame: {0}")]
    Encode(String),
}

impl ProtocolError {
    /// Classify a `serde_json` decode failure.
    pub(crate) fn from_decode(err: &serde_json::Error) -> Self {
        use serde_json::error::Category;

        match err.classify() {
            Category::Syntax | Category::Eof | Category::Io => Self::MalformedJson(err.to_string()),
            Category::Data => Self::InvalidFrame(err.to_string()),
        }
    }

    /// Returns true if the frame text was not JSON at all.
    pub fn is_malformed_json(&self) -> bool {
        matches!(self, Self::MalformedJson(_))
    }
}
