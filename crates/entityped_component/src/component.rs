//! Component payloads, kinds and the kind registry.
//!
//! Components are stored on entities as JSON values keyed by name, so any
//! nested payload (numbers, strings, arrays, objects) can be attached without
//! a Rust type. Strongly-typed access goes through two seams:
//!
//! - [`Component`] — a Rust type with a fixed name, round-tripped through
//!   serde when read from or written to an entity.
//! - [`ComponentKind`] — a named factory that turns an init value into a
//!   stored payload. Kinds are collected into a [`ComponentTypes`] registry
//!   that the engine is constructed with.

use std::collections::HashMap;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ComponentError;

/// A named, built component ready to be attached to an entity.
///
/// The name is fixed at construction. Once attached, the entity's map entry
/// is authoritative and this value is discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitializedComponent {
    name: String,
    /// The component payload.
    pub value: Value,
}

impl InitializedComponent {
    #[must_use]
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Split into `(name, value)`.
    #[must_use]
    pub fn into_parts(self) -> (String, Value) {
        (self.name, self.value)
    }
}

/// A strongly-typed component payload.
///
/// # Examples
///
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use entityped_component::{Component, Entity};
///
/// #[derive(Debug, Serialize, Deserialize, PartialEq)]
/// struct Health {
///     current: f32,
///     max: f32,
/// }
///
/// impl Component for Health {
///     fn type_name() -> &'static str { "health" }
/// }
///
/// let mut entity = Entity::new();
/// entity.insert(&Health { current: 5.0, max: 10.0 }).unwrap();
/// assert!(entity.has_component("health"));
/// ```
pub trait Component: Serialize + DeserializeOwned {
    /// The name this component is stored under.
    fn type_name() -> &'static str;

    /// Encode this value as an [`InitializedComponent`].
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::Encode`] if serialisation fails.
    fn to_initialized(&self) -> Result<InitializedComponent, ComponentError> {
        let value = serde_json::to_value(self).map_err(|source| ComponentError::Encode {
            kind: Self::type_name().to_string(),
            source,
        })?;
        Ok(InitializedComponent::new(Self::type_name(), value))
    }
}

type Transform<I, S> = Rc<dyn Fn(I) -> anyhow::Result<S>>;

/// A named component factory.
///
/// `I` is the init input accepted by [`ComponentKind::create`]; `S` is the
/// stored state produced by the transform. The transform is expected to be a
/// pure function of its input. The factory does no validation of its own; a
/// failing transform surfaces as [`ComponentError::Transform`].
pub struct ComponentKind<I, S> {
    name: String,
    transform: Transform<I, S>,
}

impl<I: 'static, S: Serialize + 'static> ComponentKind<I, S> {
    /// Create a kind from an infallible transform.
    #[must_use]
    pub fn new<F>(name: impl Into<String>, transform: F) -> Self
    where
        F: Fn(I) -> S + 'static,
    {
        Self::try_new(name, move |init| Ok(transform(init)))
    }

    /// Create a kind from a transform that may reject its input.
    #[must_use]
    pub fn try_new<F>(name: impl Into<String>, transform: F) -> Self
    where
        F: Fn(I) -> anyhow::Result<S> + 'static,
    {
        Self {
            name: name.into(),
            transform: Rc::new(transform),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the transform and wrap its output under this kind's name.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::Transform`] if the transform fails, or
    /// [`ComponentError::Encode`] if its output cannot be serialised.
    pub fn create(&self, init: I) -> Result<InitializedComponent, ComponentError> {
        let state = (self.transform)(init).map_err(|source| ComponentError::Transform {
            kind: self.name.clone(),
            source,
        })?;
        let value = serde_json::to_value(state).map_err(|source| ComponentError::Encode {
            kind: self.name.clone(),
            source,
        })?;
        Ok(InitializedComponent::new(self.name.clone(), value))
    }
}

impl<I, S> Clone for ComponentKind<I, S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            transform: Rc::clone(&self.transform),
        }
    }
}

impl<I, S> std::fmt::Debug for ComponentKind<I, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentKind")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Object-safe view of a [`ComponentKind`] driven by JSON init input.
trait ErasedKind {
    fn create_from_json(&self, init: Value) -> Result<InitializedComponent, ComponentError>;
}

impl<I, S> ErasedKind for ComponentKind<I, S>
where
    I: DeserializeOwned + 'static,
    S: Serialize + 'static,
{
    fn create_from_json(&self, init: Value) -> Result<InitializedComponent, ComponentError> {
        // Missing init input behaves like an empty object.
        let init = if init.is_null() {
            Value::Object(Map::new())
        } else {
            init
        };
        let init = I::deserialize(init).map_err(|source| ComponentError::Decode {
            kind: self.name.clone(),
            source,
        })?;
        self.create(init)
    }
}

/// The fixed set of component kinds an engine is constructed with, keyed by
/// kind name.
#[derive(Default)]
pub struct ComponentTypes {
    kinds: HashMap<String, Box<dyn ErasedKind>>,
}

impl ComponentTypes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a kind, builder style.
    #[must_use]
    pub fn with<I, S>(mut self, kind: ComponentKind<I, S>) -> Self
    where
        I: DeserializeOwned + 'static,
        S: Serialize + 'static,
    {
        self.register(kind);
        self
    }

    /// Add a kind. Returns `true` if a kind with the same name was replaced.
    pub fn register<I, S>(&mut self, kind: ComponentKind<I, S>) -> bool
    where
        I: DeserializeOwned + 'static,
        S: Serialize + 'static,
    {
        self.kinds
            .insert(kind.name().to_string(), Box::new(kind))
            .is_some()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.kinds.contains_key(name)
    }

    /// Returns the registered kind names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.kinds.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Build a component of the named kind from JSON init input.
    ///
    /// `Value::Null` is treated as an empty object, so kinds whose init
    /// fields are all optional can be built without input.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::UnknownKind`] for unregistered names, and
    /// propagates decode, transform and encode failures from the kind.
    pub fn create(&self, name: &str, init: Value) -> Result<InitializedComponent, ComponentError> {
        self.kinds
            .get(name)
            .ok_or_else(|| ComponentError::UnknownKind(name.to_string()))?
            .create_from_json(init)
    }
}

impl std::fmt::Debug for ComponentTypes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentTypes")
            .field("kinds", &self.names())
            .finish()
    }
}
