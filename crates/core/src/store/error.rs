use thiserror::Error;

/// Failure of a dispatched action task.
///
/// Displayed verbatim in the 500 body of a failed render, so the message
/// should read like the rejection reason of the task.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("{0}")]
    Rejected(String),
}

impl ActionError {
    /// Build a rejection from any displayable reason.
    pub fn rejected(reason: impl std::fmt::Display) -> Self {
        Self::Rejected(reason.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_error_display() {
        assert_eq!(
            ActionError::rejected("user 7 not found").to_string(),
            "user 7 not found"
        );
    }
}
