//! System registry — ordered registration, enable/disable lifecycle and the
//! per-tick update pass.
//!
//! Registration order is permanent: [`SystemRegistry::update`] always walks
//! systems in the order they were registered, no matter how often they have
//! been enabled and disabled since.

use tracing::{debug, error, info, warn};

use crate::config::FailurePolicy;
use crate::context::Resources;
use crate::error::SystemError;
use crate::system::{AnySystem, Hook, System};

/// Outcome of enabling or disabling one system by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// `init` ran and the system is now enabled.
    Enabled,
    /// `destroy` ran and the system is now disabled.
    Disabled,
    /// The system was already in the requested state; no hook ran.
    Unchanged,
    /// No system with this name is registered.
    NotFound,
}

/// Ordered list of registered systems.
#[derive(Default)]
pub struct SystemRegistry {
    systems: Vec<Box<dyn AnySystem>>,
}

impl SystemRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a system. It starts disabled.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::DuplicateSystem`] if the name is taken.
    pub fn register<I: 'static>(&mut self, mut system: System<I>) -> Result<(), SystemError> {
        if self.contains(system.name()) {
            return Err(SystemError::DuplicateSystem(system.name().to_string()));
        }
        system.set_enabled(false);
        debug!(system = system.name(), position = self.systems.len(), "registered system");
        self.systems.push(Box::new(system));
        Ok(())
    }

    /// Unregister a system by name. Its `destroy` hook is not run.
    ///
    /// Returns `true` if a system was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(index) => {
                self.systems.remove(index);
                debug!(system = name, "removed system");
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Returns whether the named system is enabled, or `None` if it is not
    /// registered.
    #[must_use]
    pub fn is_enabled(&self, name: &str) -> Option<bool> {
        self.position(name).map(|index| self.systems[index].is_enabled())
    }

    /// Returns system names in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.systems.iter().map(|system| system.name()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Enable each named system, running its `init` hook first.
    ///
    /// Unknown names are logged and reported as [`Toggle::NotFound`]; the
    /// rest of the list is still processed.
    ///
    /// # Errors
    ///
    /// A failing `init` leaves that system disabled and stops processing the
    /// remaining names.
    pub fn enable<N>(&mut self, names: N, resources: &mut Resources<'_>) -> Result<Vec<Toggle>, SystemError>
    where
        N: IntoIterator,
        N::Item: AsRef<str>,
    {
        names
            .into_iter()
            .map(|name| self.toggle(name.as_ref(), true, resources))
            .collect()
    }

    /// Disable each named system, running its `destroy` hook before the
    /// flag flips.
    ///
    /// # Errors
    ///
    /// A failing `destroy` leaves that system enabled and stops processing
    /// the remaining names.
    pub fn disable<N>(&mut self, names: N, resources: &mut Resources<'_>) -> Result<Vec<Toggle>, SystemError>
    where
        N: IntoIterator,
        N::Item: AsRef<str>,
    {
        names
            .into_iter()
            .map(|name| self.toggle(name.as_ref(), false, resources))
            .collect()
    }

    fn toggle(&mut self, name: &str, enable: bool, resources: &mut Resources<'_>) -> Result<Toggle, SystemError> {
        let Some(index) = self.position(name) else {
            warn!(system = name, enable, "no system registered under this name, skipping");
            return Ok(Toggle::NotFound);
        };

        let system = &mut self.systems[index];
        if system.is_enabled() == enable {
            return Ok(Toggle::Unchanged);
        }

        let hook = if enable { Hook::Init } else { Hook::Destroy };
        system.run(hook, resources).map_err(|source| SystemError::Hook {
            system: name.to_string(),
            hook,
            source,
        })?;
        system.set_enabled(enable);

        if enable {
            info!(system = name, "system enabled");
            Ok(Toggle::Enabled)
        } else {
            info!(system = name, "system disabled");
            Ok(Toggle::Disabled)
        }
    }

    /// Run `update` on every enabled system, in registration order. Returns
    /// the number of systems that updated successfully.
    ///
    /// # Errors
    ///
    /// Under [`FailurePolicy::Propagate`] the first failing hook ends the
    /// pass and is returned. Under [`FailurePolicy::Isolate`] failures are
    /// logged and the pass continues.
    pub fn update(&mut self, resources: &mut Resources<'_>, policy: FailurePolicy) -> Result<usize, SystemError> {
        let mut updated = 0;
        for system in &mut self.systems {
            if !system.is_enabled() {
                continue;
            }
            match system.run(Hook::Update, resources) {
                Ok(()) => updated += 1,
                Err(source) => {
                    let err = SystemError::Hook {
                        system: system.name().to_string(),
                        hook: Hook::Update,
                        source,
                    };
                    match policy {
                        FailurePolicy::Propagate => return Err(err),
                        FailurePolicy::Isolate => {
                            error!(system = system.name(), error = %err, "system update failed, continuing");
                        }
                    }
                }
            }
        }
        Ok(updated)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.systems.iter().position(|system| system.name() == name)
    }
}

impl std::fmt::Debug for SystemRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(
                self.systems
                    .iter()
                    .map(|system| (system.name(), system.is_enabled())),
            )
            .finish()
    }
}
