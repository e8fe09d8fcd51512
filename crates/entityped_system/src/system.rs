//! Systems and their lifecycle hooks.
//!
//! A [`System`] is created detached. It only runs once it has been added to
//! a [`SystemRegistry`](crate::SystemRegistry) and enabled there.
//!
//! The injected context type `I` is erased when the system is registered, so
//! one registry can hold systems with different injected types.

use crate::context::{Resources, SystemContext};

type HookFn<I> = Box<dyn FnMut(&mut SystemContext<'_, I>) -> anyhow::Result<()>>;

fn no_op<I>(_: &mut SystemContext<'_, I>) -> anyhow::Result<()> {
    Ok(())
}

/// The three points at which a system's code runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    /// Once per enable, before the first update of that enable period.
    Init,
    /// Once per tick while enabled.
    Update,
    /// Once per disable.
    Destroy,
}

impl std::fmt::Display for Hook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Init => f.write_str("init"),
            Self::Update => f.write_str("update"),
            Self::Destroy => f.write_str("destroy"),
        }
    }
}

/// A named unit of behaviour.
///
/// `update` is required. `init` is optional and `destroy` defaults to a
/// no-op. Hooks must tolerate repeated enable/disable cycles: the registry
/// re-runs `init` on every enable and does not track what a previous
/// `destroy` undid.
pub struct System<I = ()> {
    name: String,
    inject: I,
    enabled: bool,
    init: Option<HookFn<I>>,
    update: HookFn<I>,
    destroy: HookFn<I>,
}

impl System<()> {
    /// Create a system with no injected context.
    #[must_use]
    pub fn new<F>(name: impl Into<String>, update: F) -> Self
    where
        F: FnMut(&mut SystemContext<'_, ()>) -> anyhow::Result<()> + 'static,
    {
        System::injected(name, (), update)
    }
}

impl<I: 'static> System<I> {
    /// Create a system carrying `inject`, which every hook receives as
    /// [`SystemContext::inject`].
    #[must_use]
    pub fn injected<F>(name: impl Into<String>, inject: I, update: F) -> Self
    where
        F: FnMut(&mut SystemContext<'_, I>) -> anyhow::Result<()> + 'static,
    {
        Self {
            name: name.into(),
            inject,
            enabled: false,
            init: None,
            update: Box::new(update),
            destroy: Box::new(no_op::<I>),
        }
    }

    /// Set the hook run when the system is enabled.
    #[must_use]
    pub fn on_init<F>(mut self, init: F) -> Self
    where
        F: FnMut(&mut SystemContext<'_, I>) -> anyhow::Result<()> + 'static,
    {
        self.init = Some(Box::new(init));
        self
    }

    /// Set the hook run when the system is disabled.
    #[must_use]
    pub fn on_destroy<F>(mut self, destroy: F) -> Self
    where
        F: FnMut(&mut SystemContext<'_, I>) -> anyhow::Result<()> + 'static,
    {
        self.destroy = Box::new(destroy);
        self
    }

    #[must_use]
    pub fn inject(&self) -> &I {
        &self.inject
    }
}

impl<I> System<I> {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl<I> std::fmt::Debug for System<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("System")
            .field("name", &self.name)
            .field("enabled", &self.enabled)
            .field("has_init", &self.init.is_some())
            .finish_non_exhaustive()
    }
}

/// Type-erased system as stored by the registry.
pub(crate) trait AnySystem {
    fn name(&self) -> &str;
    fn is_enabled(&self) -> bool;
    fn set_enabled(&mut self, enabled: bool);
    fn run(&mut self, hook: Hook, resources: &mut Resources<'_>) -> anyhow::Result<()>;
}

impl<I: 'static> AnySystem for System<I> {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn run(&mut self, hook: Hook, resources: &mut Resources<'_>) -> anyhow::Result<()> {
        let mut ctx = SystemContext {
            entities: &mut *resources.entities,
            inject: &self.inject,
            events: resources.events,
            actions: resources.actions,
        };
        match hook {
            Hook::Init => match self.init.as_mut() {
                Some(init) => init(&mut ctx),
                None => Ok(()),
            },
            Hook::Update => (self.update)(&mut ctx),
            Hook::Destroy => (self.destroy)(&mut ctx),
        }
    }
}
