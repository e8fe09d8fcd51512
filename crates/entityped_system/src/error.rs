//! System-layer error types.

use crate::system::Hook;

/// Errors raised by system registration, hooks, event handlers and queued
/// actions.
#[derive(Debug, thiserror::Error)]
pub enum SystemError {
    /// A system with this name is already registered.
    #[error("system `{0}` is already registered")]
    DuplicateSystem(String),

    /// A system hook returned an error.
    #[error("system `{system}` failed in {hook}: {source}")]
    Hook {
        system: String,
        hook: Hook,
        #[source]
        source: anyhow::Error,
    },

    /// An event handler returned an error.
    #[error("handler for event `{event}` failed: {source}")]
    Handler {
        event: String,
        #[source]
        source: anyhow::Error,
    },

    /// A queued action returned an error.
    #[error("queued action failed: {source}")]
    Action {
        #[source]
        source: anyhow::Error,
    },
}

/// A failure policy name that is neither `propagate` nor `isolate`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown failure policy `{0}`")]
pub struct UnknownPolicy(pub String);
