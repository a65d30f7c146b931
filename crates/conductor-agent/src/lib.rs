//! Agent orchestration core for Conductor.
//!
//! This crate provides:
//! - A state machine tracking the agent's operational phase
//! - A shared session context (conversation history, task data, knowledge base)
//! - State-specific prompt templates rendered from session values
//! - The facade operations a protocol layer exposes to remote clients
//!
//! The embedding layer constructs one [`Orchestrator`] per process and shares
//! it via `Arc`; every operation returns a display string ready to forward.

mod context;
mod error;
mod orchestrator;
mod prompt;
mod state;

pub use context::{Message, SessionContext};
pub use error::AgentError;
pub use orchestrator::Orchestrator;
pub use prompt::PromptCatalog;
pub use state::{AgentState, StateMachine, Transition};
