//! Core harness error types (pure - no I/O variants).

use thiserror::Error;

use crate::routing::RouteError;
use crate::store::ActionError;

/// Errors raised while building configuration or serializing state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HutError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid route table: {0}")]
    Routes(#[from] RouteError),

    #[error("State serialization failed: {0}")]
    Serialization(String),
}

/// Errors that abort a single render.
///
/// Every variant is request-local and surfaces as a 500 whose body is
/// `Error: <display>`, so route and action failures display their own text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error(transparent)]
    Route(#[from] RouteError),

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error("State serialization failed: {0}")]
    Serialization(String),
}

impl From<HutError> for RenderError {
    fn from(err: HutError) -> Self {
        match err {
            HutError::Routes(route) => Self::Route(route),
            other => Self::Serialization(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, HutError>;
