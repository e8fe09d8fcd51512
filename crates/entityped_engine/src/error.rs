//! Engine-level error type.

use entityped_component::ComponentError;
use entityped_system::SystemError;

/// Errors surfaced by [`Engine`](crate::Engine) operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Component(#[from] ComponentError),

    #[error(transparent)]
    System(#[from] SystemError),

    /// The engine state could not be rendered as JSON.
    #[error("failed to serialise engine state: {0}")]
    Serialize(#[from] serde_json::Error),
}
