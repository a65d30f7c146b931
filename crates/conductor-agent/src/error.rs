//! Error types for the orchestration core.

use thiserror::Error;

use crate::state::AgentState;

/// Errors that can occur in orchestration operations.
///
/// Missing keys in the task-data or knowledge stores are deliberately not
/// errors; those lookups report a "not found" string on the success channel
/// because callers display the result directly.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The supplied name does not match any operational state.
    #[error("Invalid state: {requested}. Valid states are: {}", AgentState::valid_names())]
    InvalidState {
        /// The name the caller supplied.
        requested: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_state_message_carries_valid_names() {
        let err = AgentError::InvalidState {
            requested: "warp".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid state: warp. Valid states are: Idle, Planning, Researching, Executing, Reviewing, Error"
        );
    }
}
