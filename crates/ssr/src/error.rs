//! Server errors including I/O operations.

use hut_core::HutError;
use thiserror::Error;

/// Server errors including I/O operations.
///
/// Per-request failures never show up here; they become responses.
#[derive(Error, Debug)]
pub enum SsrError {
    #[error("Core error: {0}")]
    Core(#[from] HutError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("Server is already running")]
    AlreadyRunning,

    #[error("Server is not running")]
    NotRunning,

    #[error("Server task failed: {0}")]
    Serve(String),
}

pub type Result<T> = std::result::Result<T, SsrError>;
