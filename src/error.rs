//! Error type shared by synthesis and export.

use thiserror::Error;

/// Errors that can occur while synthesizing or exporting a point cloud.
///
/// Every variant is terminal for the call that produced it. Nothing is
/// retried internally and no partial output is returned.
#[derive(Debug, Error)]
pub enum Error {
    /// No image sources were supplied.
    #[error("No image sources supplied")]
    EmptyInput,

    /// A source could not be fetched or decoded.
    #[error("Failed to load image {label}: {reason}")]
    ImageLoad { label: String, reason: String },

    /// Position and color sequences have different lengths.
    #[error("Malformed point cloud: {positions} positions but {colors} colors")]
    MalformedCloud { positions: usize, colors: usize },

    #[error("Invalid sampling configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn image_load(label: impl Into<String>, reason: impl ToString) -> Self {
        Error::ImageLoad {
            label: label.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
