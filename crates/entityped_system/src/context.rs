//! What a system hook gets to work with.

use entityped_component::{EntityStore, Query, QueryResult};
use serde_json::Value;

use crate::actions::ActionQueue;
use crate::error::SystemError;
use crate::events::EventBus;

/// Engine state lent to the registry while it runs hooks.
#[derive(Debug)]
pub struct Resources<'a> {
    pub entities: &'a mut EntityStore,
    pub events: &'a EventBus,
    pub actions: &'a ActionQueue,
}

/// Argument passed to every `init`, `update` and `destroy` hook.
///
/// `entities` is the live store, not a snapshot: changes are visible to
/// every system that runs later in the same tick.
#[derive(Debug)]
pub struct SystemContext<'a, I> {
    /// The live entity store.
    pub entities: &'a mut EntityStore,
    /// The value the system was created with, passed through unmodified.
    pub inject: &'a I,
    /// The engine's event bus.
    pub events: &'a EventBus,
    /// The engine's action queue.
    pub actions: &'a ActionQueue,
}

impl<I> SystemContext<'_, I> {
    /// Filter the live entity set.
    #[must_use]
    pub fn query(&self, query: &Query) -> QueryResult<'_> {
        self.entities.query(query)
    }

    /// Dispatch an event on the engine's bus.
    ///
    /// # Errors
    ///
    /// Propagates the first handler failure.
    pub fn dispatch(&self, name: &str, payload: Option<&Value>) -> Result<usize, SystemError> {
        self.events.dispatch(name, payload)
    }

    /// Defer an operation to the start of the next tick.
    pub fn queue_action<F>(&self, action: F)
    where
        F: FnOnce(&mut EntityStore) -> anyhow::Result<()> + 'static,
    {
        self.actions.queue(action);
    }
}
