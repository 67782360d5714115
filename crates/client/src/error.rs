//! Client error types.

use hut_core::{ActionError, RouteError};
use thiserror::Error;

/// Result type alias for the client bootstrap.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while bootstrapping or navigating.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    #[error("Mount point not found: #{0}")]
    MountPointMissing(String),

    #[error("Invalid initial state in window.{var}: {reason}")]
    InvalidInitialState { var: String, reason: String },

    #[error("Route error: {0}")]
    Route(#[from] RouteError),

    #[error("Action error: {0}")]
    Action(#[from] ActionError),

    #[error("Too many redirects resolving {0}")]
    RedirectLoop(String),

    #[error("DOM error: {0}")]
    Dom(String),
}
