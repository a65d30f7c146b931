//! Facade operations exposed to the protocol layer.

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::{AgentError, AgentState, Message, PromptCatalog, SessionContext, StateMachine};

/// Messages returned by [`Orchestrator::recent_history`] when no limit is
/// given.
const DEFAULT_HISTORY_LIMIT: usize = 10;

/// One session: the state machine plus the context it governs.
#[derive(Debug, Default)]
struct Session {
    state: StateMachine,
    context: SessionContext,
}

/// The orchestration facade.
///
/// One instance exists per server process, constructed with an empty session
/// in the `Idle` state and shared with the protocol layer via `Arc`. Every
/// operation takes the session lock, so calls are atomic and observed in a
/// total order; none of them performs I/O or suspends beyond lock
/// acquisition.
///
/// Results and errors are rendered as display strings the protocol layer
/// forwards verbatim.
#[derive(Debug, Default)]
pub struct Orchestrator {
    session: RwLock<Session>,
}

impl Orchestrator {
    /// Create an orchestrator with an empty session in the `Idle` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the agent to the named state.
    ///
    /// Matching is case-insensitive; any valid target is accepted from any
    /// state. An unknown name fails without touching the session.
    #[tracing::instrument(skip(self))]
    pub async fn transition(&self, state: &str) -> Result<String, AgentError> {
        let mut session = self.session.write().await;
        let transition = session.state.transition(state)?;
        info!(from = %transition.from, to = %transition.to, "state transition");
        Ok(format!(
            "Transitioned from {} to {}",
            transition.from, transition.to
        ))
    }

    /// Canonical name of the current state.
    pub async fn current_state(&self) -> String {
        self.session.read().await.state.current().to_string()
    }

    /// Append a message to the conversation history.
    pub async fn add_message(&self, role: &str, content: &str) -> String {
        let mut session = self.session.write().await;
        session.context.add_message(role, content);
        debug!(role = %role, "message appended");
        format!("{} message added to conversation history", capitalize(role))
    }

    /// The last `max_messages` messages (default 10) as pretty-printed JSON.
    pub async fn recent_history(&self, max_messages: Option<usize>) -> String {
        let session = self.session.read().await;
        let limit = max_messages.unwrap_or(DEFAULT_HISTORY_LIMIT);
        render_messages(session.context.recent_messages(limit))
    }

    /// The entire conversation history as pretty-printed JSON.
    pub async fn full_history(&self) -> String {
        let session = self.session.read().await;
        render_messages(session.context.history())
    }

    /// Store a value in the task data store.
    pub async fn set_task_data(&self, key: &str, value: &str) -> String {
        let mut session = self.session.write().await;
        session.context.set_task_data(key, value);
        debug!(key = %key, "task data stored");
        format!("Stored value under key: {}", key)
    }

    /// Fetch a value from the task data store, or a not-found notice.
    pub async fn task_data(&self, key: &str) -> String {
        let session = self.session.read().await;
        match session.context.task_data(key) {
            Some(value) => value.to_string(),
            None => format!("No data found for key: {}", key),
        }
    }

    /// All task data keys as a JSON array.
    pub async fn list_task_data_keys(&self) -> String {
        let session = self.session.read().await;
        render_keys(&session.context.task_data_keys())
    }

    /// Store an entry in the knowledge base.
    pub async fn set_knowledge(&self, key: &str, value: &str) -> String {
        let mut session = self.session.write().await;
        session.context.set_knowledge(key, value);
        debug!(key = %key, "knowledge stored");
        format!("Stored knowledge under key: {}", key)
    }

    /// Fetch an entry from the knowledge base, or a not-found notice.
    pub async fn knowledge(&self, key: &str) -> String {
        let session = self.session.read().await;
        match session.context.knowledge(key) {
            Some(value) => value.to_string(),
            None => format!("No knowledge found for key: {}", key),
        }
    }

    /// All knowledge base keys as a JSON array.
    pub async fn list_knowledge_keys(&self) -> String {
        let session = self.session.read().await;
        render_keys(&session.context.knowledge_keys())
    }

    /// Summary of the current state: name, description, and the advisory
    /// transition list.
    pub async fn describe_current_state(&self) -> String {
        let session = self.session.read().await;
        let current = session.state.current();
        let transitions = current
            .advisory_transitions()
            .iter()
            .map(|state| format!("- {}", state))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "Current State: {}\n\nDescription: {}\n\nAvailable Transitions:\n{}",
            current,
            current.description(),
            transitions
        )
    }

    /// Render the instructional prompt for the named state.
    ///
    /// The state name is parsed the same way as [`Orchestrator::transition`];
    /// the current state is not consulted and not changed.
    #[tracing::instrument(skip(self))]
    pub async fn state_prompt(&self, state: &str) -> Result<String, AgentError> {
        let state = state.parse::<AgentState>()?;
        let session = self.session.read().await;
        Ok(PromptCatalog::render(state, &session.context))
    }
}

/// Render messages as the pretty-printed JSON the protocol layer displays
/// verbatim.
fn render_messages(messages: &[Message]) -> String {
    serde_json::to_string_pretty(messages).unwrap_or_else(|_| "[]".to_string())
}

/// Render a key list as a compact JSON array.
fn render_keys(keys: &[&str]) -> String {
    serde_json::to_string(keys).unwrap_or_else(|_| "[]".to_string())
}

/// Uppercase the first character of a role tag for confirmation strings.
fn capitalize(role: &str) -> String {
    let mut chars = role.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
