//! Pure functions for mapping render outcomes to HTTP status codes.
//!
//! Kept free of any HTTP crate so the server and tests share one table.

use crate::error::RenderError;
use crate::render::RenderOutcome;

/// Maps a [`RenderError`] to an HTTP status code.
///
/// Every render failure is request-local and collapses to 500:
///
/// - `Route` -> 500 (Internal Server Error)
/// - `Action` -> 500 (Internal Server Error)
/// - `Serialization` -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use hut_core::{render_error_to_status_code, ActionError, RenderError};
///
/// let error = RenderError::Action(ActionError::rejected("db down"));
/// assert_eq!(render_error_to_status_code(&error), 500);
/// ```
pub fn render_error_to_status_code(error: &RenderError) -> u16 {
    match error {
        RenderError::Route(_) => 500,
        RenderError::Action(_) => 500,
        RenderError::Serialization(_) => 500,
    }
}

/// Maps a [`RenderOutcome`] to an HTTP status code.
///
/// - `Rendered` -> 200 (OK)
/// - `Redirect` -> 302 (Found)
/// - `NotFound` -> 404 (Not Found)
pub fn render_outcome_to_status_code(outcome: &RenderOutcome) -> u16 {
    match outcome {
        RenderOutcome::Rendered(_) => 200,
        RenderOutcome::Redirect { .. } => 302,
        RenderOutcome::NotFound { .. } => 404,
    }
}
