//! Typed errors returned at the library boundary.

use thiserror::Error;

/// Errors produced while turning raw OCR output into a document.
#[derive(Debug, Error)]
pub enum ReflowError {
    /// A raw backend fragment could not be read as `(region, text, confidence)`.
    /// `index` is the fragment's position in flattened emission order.
    #[error("Malformed OCR result at fragment {index}: {reason}")]
    MalformedResult { index: usize, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("OCR engine error: {0}")]
    Engine(#[from] anyhow::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReflowError {
    pub(crate) fn malformed(index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedResult {
            index,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReflowError>;
