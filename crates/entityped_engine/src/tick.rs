//! The tick: drain deferred actions, then update enabled systems.
//!
//! 1. Take every action queued before the tick and run them in FIFO order.
//!    Actions queued while these run wait for the next tick.
//! 2. Run `update` on every enabled system in registration order.
//!
//! The engine has no clock. Callers advance the simulation by calling
//! [`Engine::update_systems`] as often as they like.

use tracing::{debug, error, trace};

use entityped_system::{FailurePolicy, Resources, SystemError};

use crate::engine::Engine;
use crate::error::EngineError;

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// The tick counter after this tick.
    pub tick_id: u64,
    /// Actions that ran successfully.
    pub actions_run: usize,
    /// Systems whose `update` succeeded.
    pub systems_updated: usize,
}

impl Engine {
    /// Run one tick.
    ///
    /// # Errors
    ///
    /// Under [`FailurePolicy::Propagate`] the first failing action or
    /// `update` hook ends the tick. Actions that had not run yet are put
    /// back at the front of the queue for the next tick; systems after the
    /// failing one do not update.
    pub fn update_systems(&mut self) -> Result<TickReport, EngineError> {
        self.tick_id += 1;
        let policy = self.config.failure_policy;

        let mut pending = self.actions.take();
        debug!(tick_id = self.tick_id, actions = pending.len(), "tick start");

        let mut actions_run = 0;
        while let Some(action) = pending.pop_front() {
            match action(&mut self.entities) {
                Ok(()) => actions_run += 1,
                Err(source) => {
                    let err = SystemError::Action { source };
                    match policy {
                        FailurePolicy::Propagate => {
                            self.actions.requeue_front(pending);
                            return Err(err.into());
                        }
                        FailurePolicy::Isolate => {
                            error!(tick_id = self.tick_id, error = %err, "queued action failed, continuing");
                        }
                    }
                }
            }
        }
        trace!(tick_id = self.tick_id, actions_run, "actions drained");

        let mut resources = Resources {
            entities: &mut self.entities,
            events: &self.events,
            actions: &self.actions,
        };
        let systems_updated = self.systems.update(&mut resources, policy)?;

        debug!(tick_id = self.tick_id, systems_updated, "tick complete");
        Ok(TickReport {
            tick_id: self.tick_id,
            actions_run,
            systems_updated,
        })
    }
}
