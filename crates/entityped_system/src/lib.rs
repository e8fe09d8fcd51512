//! # entityped_system
//!
//! The behaviour half of the entityped ECS runtime.
//!
//! This crate provides:
//!
//! - [`System`] — a named unit of behaviour with `init` / `update` /
//!   `destroy` hooks and an optional injected context value.
//! - [`SystemRegistry`] — the ordered list of registered systems and their
//!   enable/disable lifecycle.
//! - [`SystemContext`] — what a hook sees: the entity store, its injected
//!   context, the event bus and the action queue.
//! - [`EventBus`] — synchronous named publish/subscribe.
//! - [`ActionQueue`] — deferred operations drained at the start of a tick.
//!
//! Everything here is single-threaded. The event bus and action queue are
//! cheap `Rc` handles so hooks and handlers can hold on to them.

pub mod actions;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod registry;
pub mod system;

pub use actions::{Action, ActionQueue};
pub use config::FailurePolicy;
pub use context::{Resources, SystemContext};
pub use error::{SystemError, UnknownPolicy};
pub use events::{EventBus, Handler};
pub use registry::{SystemRegistry, Toggle};
pub use system::{Hook, System};
