use thiserror::Error;

/// Errors raised while compiling or matching routes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("Invalid route pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Missing param {param:?} for pattern {pattern:?}")]
    MissingParam { pattern: String, param: String },

    #[error("Entry hook failed: {0}")]
    Hook(String),
}

impl RouteError {
    /// Failure reported by an entry hook.
    pub fn hook(reason: impl std::fmt::Display) -> Self {
        Self::Hook(reason.to_string())
    }
}
