//! Synchronous named publish/subscribe.
//!
//! Handlers run in subscription order, on the caller's stack, before
//! [`EventBus::dispatch`] returns. The handler list for an event is
//! snapshotted at dispatch time: a handler may dispatch further events or
//! subscribe new handlers, and those new handlers first see the next
//! dispatch.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;
use tracing::trace;

use crate::error::SystemError;

/// An event handler. Receives the dispatched payload, if any.
pub type Handler = Rc<dyn Fn(Option<&Value>) -> anyhow::Result<()>>;

/// Shared handle to an engine's subscription table. Cloning yields another
/// handle to the same table.
#[derive(Clone, Default)]
pub struct EventBus {
    subscriptions: Rc<RefCell<HashMap<String, Vec<Handler>>>>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler for `name`.
    pub fn subscribe<F>(&self, name: impl Into<String>, handler: F)
    where
        F: Fn(Option<&Value>) -> anyhow::Result<()> + 'static,
    {
        self.subscriptions
            .borrow_mut()
            .entry(name.into())
            .or_default()
            .push(Rc::new(handler));
    }

    /// Invoke every handler subscribed to `name`, in order, and return how
    /// many ran. Events without subscribers are a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::Handler`] for the first failing handler; later
    /// handlers are not invoked.
    pub fn dispatch(&self, name: &str, payload: Option<&Value>) -> Result<usize, SystemError> {
        let handlers = match self.subscriptions.borrow().get(name) {
            Some(handlers) => handlers.clone(),
            None => {
                trace!(event = name, "dispatch without subscribers");
                return Ok(0);
            }
        };

        trace!(event = name, handlers = handlers.len(), "dispatching event");
        for handler in &handlers {
            handler(payload).map_err(|source| SystemError::Handler {
                event: name.to_string(),
                source,
            })?;
        }
        Ok(handlers.len())
    }

    /// Returns the number of handlers subscribed to `name`.
    #[must_use]
    pub fn subscriber_count(&self, name: &str) -> usize {
        self.subscriptions
            .borrow()
            .get(name)
            .map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let subscriptions = self.subscriptions.borrow();
        let mut names: Vec<(&str, usize)> = subscriptions
            .iter()
            .map(|(name, handlers)| (name.as_str(), handlers.len()))
            .collect();
        names.sort_unstable();
        f.debug_struct("EventBus")
            .field("subscriptions", &names)
            .finish()
    }
}
