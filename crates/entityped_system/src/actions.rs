//! Deferred actions drained at the start of each tick.
//!
//! Actions are handed the entity store when they run, so code that cannot
//! borrow the store at the point it decides to act (an event handler, or a
//! system walking a query) can defer the mutation to the next tick.
//!
//! [`ActionQueue::take`] moves out everything queued so far. Actions queued
//! while those run land in the emptied queue and wait for the following
//! tick.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use entityped_component::EntityStore;

/// A deferred operation.
pub type Action = Box<dyn FnOnce(&mut EntityStore) -> anyhow::Result<()>>;

/// Shared FIFO handle. Cloning yields another handle to the same queue.
#[derive(Clone, Default)]
pub struct ActionQueue {
    pending: Rc<RefCell<VecDeque<Action>>>,
}

impl ActionQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action to run at the start of the next tick.
    pub fn queue<F>(&self, action: F)
    where
        F: FnOnce(&mut EntityStore) -> anyhow::Result<()> + 'static,
    {
        self.pending.borrow_mut().push_back(Box::new(action));
    }

    /// Remove and return every queued action in FIFO order.
    #[must_use]
    pub fn take(&self) -> VecDeque<Action> {
        std::mem::take(&mut *self.pending.borrow_mut())
    }

    /// Put actions back at the head of the queue, ahead of anything queued
    /// since they were taken.
    pub fn requeue_front(&self, actions: VecDeque<Action>) {
        let mut pending = self.pending.borrow_mut();
        for action in actions.into_iter().rev() {
            pending.push_front(action);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }
}

impl std::fmt::Debug for ActionQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionQueue")
            .field("pending", &self.len())
            .finish()
    }
}
