//! Response pipeline errors, including transport I/O.

use pagekit_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    #[error("Invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("Invalid status code: {0}")]
    InvalidStatus(u16),

    #[error("Compression failed: {0}")]
    Compression(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HttpError>;
