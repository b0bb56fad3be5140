//! Error types for asset loading and configuration.

use thiserror::Error;

/// Errors raised while fetching or decoding scene assets.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("{asset}:{line}: {message}")]
    ObjParse {
        asset: String,
        line: usize,
        message: String,
    },

    #[error("invalid asset manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

impl AssetError {
    pub(crate) fn obj(asset: &str, line: usize, message: impl Into<String>) -> Self {
        AssetError::ObjParse {
            asset: asset.to_string(),
            line,
            message: message.into(),
        }
    }
}
