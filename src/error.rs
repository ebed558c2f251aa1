//! Errors for scene and settings I/O
//!
//! The physics core itself can't fail; only loading data from disk can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("scene entity {index}: {reason}")]
    InvalidEntity { index: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
