//! Operational state tracking for the agent.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::AgentError;

/// Operational phase of the agent.
///
/// Exactly one state is current at any time. A session starts in
/// [`AgentState::Idle`] and only changes through
/// [`StateMachine::transition`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentState {
    /// Waiting for instructions.
    #[default]
    Idle,
    /// Breaking a task down into steps.
    Planning,
    /// Gathering information for the task.
    Researching,
    /// Carrying out a plan.
    Executing,
    /// Evaluating results.
    Reviewing,
    /// Recovering from a failure.
    Error,
}

impl AgentState {
    /// All states, in canonical order.
    pub const ALL: [AgentState; 6] = [
        AgentState::Idle,
        AgentState::Planning,
        AgentState::Researching,
        AgentState::Executing,
        AgentState::Reviewing,
        AgentState::Error,
    ];

    /// Canonical name of this state.
    pub fn name(&self) -> &'static str {
        match self {
            AgentState::Idle => "Idle",
            AgentState::Planning => "Planning",
            AgentState::Researching => "Researching",
            AgentState::Executing => "Executing",
            AgentState::Reviewing => "Reviewing",
            AgentState::Error => "Error",
        }
    }

    /// One-line description of what the agent does in this state.
    pub fn description(&self) -> &'static str {
        match self {
            AgentState::Idle => "Waiting for instructions. Ready to accept a new task.",
            AgentState::Planning => "Creating a structured plan to accomplish the task.",
            AgentState::Researching => "Gathering information needed to complete the task.",
            AgentState::Executing => "Carrying out the planned actions step by step.",
            AgentState::Reviewing => "Evaluating the results and determining next steps.",
            AgentState::Error => "Handling an error or unexpected situation.",
        }
    }

    /// Typical next states from this one.
    ///
    /// Informational only: [`StateMachine::transition`] accepts any valid
    /// target regardless of this table. It exists so the current-state
    /// summary can suggest where to go next.
    pub fn advisory_transitions(&self) -> &'static [AgentState] {
        match self {
            AgentState::Idle => &[
                AgentState::Planning,
                AgentState::Researching,
                AgentState::Executing,
            ],
            AgentState::Planning => &[
                AgentState::Idle,
                AgentState::Researching,
                AgentState::Executing,
            ],
            AgentState::Researching => &[
                AgentState::Planning,
                AgentState::Executing,
                AgentState::Reviewing,
            ],
            AgentState::Executing => &[AgentState::Reviewing],
            AgentState::Reviewing => &[
                AgentState::Planning,
                AgentState::Executing,
                AgentState::Idle,
            ],
            AgentState::Error => &[
                AgentState::Idle,
                AgentState::Planning,
                AgentState::Researching,
                AgentState::Executing,
            ],
        }
    }

    /// Comma-separated canonical names, for error messages and summaries.
    pub fn valid_names() -> String {
        AgentState::ALL
            .iter()
            .map(|s| s.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AgentState {
    type Err = AgentError;

    /// Case-insensitive lookup from a caller-supplied name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgentState::ALL
            .iter()
            .copied()
            .find(|state| state.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| AgentError::InvalidState {
                requested: s.to_string(),
            })
    }
}

/// A completed state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// State before the change.
    pub from: AgentState,
    /// State after the change.
    pub to: AgentState,
}

/// Tracks the current state and performs transitions.
#[derive(Debug, Default)]
pub struct StateMachine {
    current: AgentState,
}

impl StateMachine {
    /// Create a state machine in the `Idle` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current state.
    pub fn current(&self) -> AgentState {
        self.current
    }

    /// Replace the current state with the named one.
    ///
    /// Matching is case-insensitive and any valid target is accepted; the
    /// advisory table is not consulted. On an unknown name the current state
    /// is left untouched.
    pub fn transition(&mut self, requested: &str) -> Result<Transition, AgentError> {
        let to = requested.parse::<AgentState>()?;
        let from = self.current;
        self.current = to;
        debug!(from = %from, to = %to, "state changed");
        Ok(Transition { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // === Unit Tests ===

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("planning".parse::<AgentState>().unwrap(), AgentState::Planning);
        assert_eq!("PLANNING".parse::<AgentState>().unwrap(), AgentState::Planning);
        assert_eq!("PlAnNiNg".parse::<AgentState>().unwrap(), AgentState::Planning);
    }

    #[test]
    fn test_parse_rejects_unknown_names() {
        let err = "bogus".parse::<AgentState>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("bogus"));
        // Unknown names report every valid name so the caller can self-correct
        for state in AgentState::ALL {
            assert!(message.contains(state.name()));
        }
    }

    #[test]
    fn test_parse_does_not_trim_whitespace() {
        assert!(" idle".parse::<AgentState>().is_err());
        assert!("idle ".parse::<AgentState>().is_err());
    }

    #[test]
    fn test_transition_replaces_state() {
        let mut machine = StateMachine::new();
        assert_eq!(machine.current(), AgentState::Idle);

        let transition = machine.transition("executing").unwrap();
        assert_eq!(transition.from, AgentState::Idle);
        assert_eq!(transition.to, AgentState::Executing);
        assert_eq!(machine.current(), AgentState::Executing);
    }

    #[test]
    fn test_failed_transition_leaves_state_unchanged() {
        let mut machine = StateMachine::new();
        machine.transition("reviewing").unwrap();

        assert!(machine.transition("nonsense").is_err());
        assert_eq!(machine.current(), AgentState::Reviewing);
    }

    #[test]
    fn test_advisory_table_is_not_enforced() {
        // Executing only advertises Reviewing, but any target is accepted
        let mut machine = StateMachine::new();
        machine.transition("executing").unwrap();
        assert_eq!(
            AgentState::Executing.advisory_transitions(),
            &[AgentState::Reviewing]
        );

        machine.transition("idle").unwrap();
        assert_eq!(machine.current(), AgentState::Idle);
    }

    #[test]
    fn test_every_state_has_advisory_targets() {
        for state in AgentState::ALL {
            assert!(!state.advisory_transitions().is_empty());
        }
    }

    #[test]
    fn test_valid_names_lists_canonical_order() {
        assert_eq!(
            AgentState::valid_names(),
            "Idle, Planning, Researching, Executing, Reviewing, Error"
        );
    }

    // === Property-Based Tests ===

    proptest! {
        // Any casing of a valid name parses back to that state
        #[test]
        fn any_casing_of_valid_name_parses(
            idx in 0usize..AgentState::ALL.len(),
            flips in prop::collection::vec(any::<bool>(), 0..16),
        ) {
            let state = AgentState::ALL[idx];
            let mangled: String = state
                .name()
                .chars()
                .enumerate()
                .map(|(i, c)| {
                    if flips.get(i).copied().unwrap_or(false) {
                        c.to_ascii_uppercase()
                    } else {
                        c.to_ascii_lowercase()
                    }
                })
                .collect();

            prop_assert_eq!(mangled.parse::<AgentState>().unwrap(), state);
        }

        // Names that match no state leave the machine untouched
        #[test]
        fn unknown_name_never_mutates(name in "[a-z]{1,12}") {
            prop_assume!(
                !AgentState::ALL
                    .iter()
                    .any(|s| s.name().eq_ignore_ascii_case(&name))
            );

            let mut machine = StateMachine::new();
            machine.transition("planning").unwrap();

            prop_assert!(machine.transition(&name).is_err());
            prop_assert_eq!(machine.current(), AgentState::Planning);
        }

        // Display and FromStr round-trip for every state
        #[test]
        fn display_round_trips(idx in 0usize..AgentState::ALL.len()) {
            let state = AgentState::ALL[idx];
            prop_assert_eq!(state.to_string().parse::<AgentState>().unwrap(), state);
        }

        // Advisory targets never include the state itself
        #[test]
        fn advisory_targets_exclude_self(idx in 0usize..AgentState::ALL.len()) {
            let state = AgentState::ALL[idx];
            prop_assert!(!state.advisory_transitions().contains(&state));
        }
    }
}
