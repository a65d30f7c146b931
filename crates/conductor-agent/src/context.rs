//! Shared session context: conversation history and key/value stores.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single conversation entry.
///
/// `role` is a free-form tag (`user`, `assistant`, `system`, or anything the
/// caller supplies). Messages are immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who produced the message.
    pub role: String,
    /// The message text.
    pub content: String,
}

/// Mutable context shared across the orchestration session.
///
/// Owns the append-only conversation history and two independent key/value
/// namespaces: task-scoped data and the knowledge base. History is unbounded;
/// nothing is ever evicted.
#[derive(Debug, Default)]
pub struct SessionContext {
    history: Vec<Message>,
    task_data: HashMap<String, String>,
    knowledge: HashMap<String, String>,
}

impl SessionContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to the conversation history.
    pub fn add_message(&mut self, role: impl Into<String>, content: impl Into<String>) {
        self.history.push(Message {
            role: role.into(),
            content: content.into(),
        });
    }

    /// The last `n` messages, oldest first.
    ///
    /// `n = 0` yields an empty slice; `n` past the history length yields the
    /// whole history.
    pub fn recent_messages(&self, n: usize) -> &[Message] {
        let start = self.history.len().saturating_sub(n);
        &self.history[start..]
    }

    /// Full conversation history, oldest first.
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Store a task-scoped value. Overwrites silently; empty keys are
    /// permitted.
    pub fn set_task_data(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.task_data.insert(key.into(), value.into());
    }

    /// Look up a task-scoped value.
    pub fn task_data(&self, key: &str) -> Option<&str> {
        self.task_data.get(key).map(String::as_str)
    }

    /// All task-data keys, in no particular order.
    pub fn task_data_keys(&self) -> Vec<&str> {
        self.task_data.keys().map(String::as_str).collect()
    }

    /// Store a knowledge-base entry. Same semantics as task data, separate
    /// namespace.
    pub fn set_knowledge(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.knowledge.insert(key.into(), value.into());
    }

    /// Look up a knowledge-base entry.
    pub fn knowledge(&self, key: &str) -> Option<&str> {
        self.knowledge.get(key).map(String::as_str)
    }

    /// All knowledge-base keys, in no particular order.
    pub fn knowledge_keys(&self) -> Vec<&str> {
        self.knowledge.keys().map(String::as_str).collect()
    }
}
