//! Entity identity and the per-entity component map.
//!
//! An [`Entity`] is an [`EntityId`] plus the components attached to it. The
//! entity owns its map; mutations through [`Entity::add_component`] and
//! [`Entity::remove_component`] act on it in place, so a system that edits an
//! entity is immediately visible to every later reader in the same tick.

use std::borrow::Borrow;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::component::{Component, InitializedComponent};
use crate::error::ComponentError;

/// An opaque entity identity.
///
/// Identities are either supplied by the caller or generated as random
/// version-4 UUID strings. Uniqueness of generated ids is probabilistic; no
/// collision check is performed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Wrap a caller-supplied identity.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random identity (`xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx`).
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identity as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for EntityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An identity together with its named component payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    id: EntityId,
    components: HashMap<String, Value>,
}

impl Entity {
    /// Build an entity that is not yet part of any store.
    ///
    /// A missing `id` is generated. Components are folded in order, so a
    /// later entry replaces an earlier one with the same name.
    #[must_use]
    pub fn create<C>(id: Option<EntityId>, components: C) -> Self
    where
        C: IntoIterator<Item = InitializedComponent>,
    {
        let components = components
            .into_iter()
            .map(InitializedComponent::into_parts)
            .collect();
        Self {
            id: id.unwrap_or_else(EntityId::generate),
            components,
        }
    }

    /// Build an empty entity with a generated identity.
    #[must_use]
    pub fn new() -> Self {
        Self::create(None, [])
    }

    /// Build an empty entity with the given identity.
    #[must_use]
    pub fn with_id(id: impl Into<EntityId>) -> Self {
        Self::create(Some(id.into()), [])
    }

    #[must_use]
    pub fn id(&self) -> &EntityId {
        &self.id
    }

    /// Returns the full component map.
    #[must_use]
    pub fn components(&self) -> &HashMap<String, Value> {
        &self.components
    }

    /// Returns the raw payload of a component, if attached.
    #[must_use]
    pub fn component(&self, name: &str) -> Option<&Value> {
        self.components.get(name)
    }

    /// Returns the raw payload of a component for in-place editing.
    pub fn component_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.components.get_mut(name)
    }

    /// Attach a component, replacing any payload already stored under its
    /// name. Returns the replaced payload.
    pub fn add_component(&mut self, component: InitializedComponent) -> Option<Value> {
        let (name, value) = component.into_parts();
        self.components.insert(name, value)
    }

    /// Detach a component. Absent names are a no-op.
    pub fn remove_component(&mut self, name: &str) -> Option<Value> {
        self.components.remove(name)
    }

    /// Returns `true` if a component with this name is attached.
    ///
    /// This is a presence check: a component whose payload is `0`, `""` or
    /// `null` still counts as attached.
    #[must_use]
    pub fn has_component(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// Returns the number of attached components.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Decode the payload stored under `T::type_name()`.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::Decode`] if the stored JSON does not match `T`.
    pub fn get<T: Component>(&self) -> Result<Option<T>, ComponentError> {
        self.components
            .get(T::type_name())
            .map(|value| {
                T::deserialize(value).map_err(|source| ComponentError::Decode {
                    kind: T::type_name().to_string(),
                    source,
                })
            })
            .transpose()
    }

    /// Encode `component` and attach it under `T::type_name()`.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::Encode`] if `component` cannot be serialised.
    pub fn insert<T: Component>(&mut self, component: &T) -> Result<Option<Value>, ComponentError> {
        Ok(self.add_component(component.to_initialized()?))
    }

    /// Log the entity as pretty-printed JSON at debug level.
    pub fn debug(&self) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => debug!(entity = %self.id, "{json}"),
            Err(err) => debug!(entity = %self.id, error = %err, "entity is not representable as JSON"),
        }
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use serde_json::json;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Position {
        x: f64,
        y: f64,
    }

    impl Component for Position {
        fn type_name() -> &'static str {
            "position"
        }
    }

    #[test]
    fn test_generated_id_is_v4_uuid() {
        let id = EntityId::generate();
        let parsed = Uuid::parse_str(id.as_str()).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
        assert_eq!(id.as_str().len(), 36);
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let ids: HashSet<EntityId> = (0..1_000).map(|_| EntityId::generate()).collect();
        assert_eq!(ids.len(), 1_000);
    }

    #[test]
    fn test_create_uses_supplied_id() {
        let entity = Entity::create(Some("player".into()), []);
        assert_eq!(entity.id().as_str(), "player");
        assert_eq!(entity.component_count(), 0);
    }

    #[test]
    fn test_create_last_component_wins() {
        let entity = Entity::create(
            None,
            [
                InitializedComponent::new("health", json!(10)),
                InitializedComponent::new("name", json!("orc")),
                InitializedComponent::new("health", json!(25)),
            ],
        );
        assert_eq!(entity.component_count(), 2);
        assert_eq!(entity.component("health"), Some(&json!(25)));
    }

    #[test]
    fn test_add_component_overwrites() {
        let mut entity = Entity::create(None, [InitializedComponent::new("a", json!(1))]);
        let previous = entity.add_component(InitializedComponent::new("a", json!(2)));
        assert_eq!(previous, Some(json!(1)));
        assert!(entity.has_component("a"));
        assert_eq!(entity.component_count(), 1);
        assert_eq!(entity.component("a"), Some(&json!(2)));
    }

    #[test]
    fn test_remove_component_absent_is_noop() {
        let mut entity = Entity::with_id("e1");
        assert_eq!(entity.remove_component("missing"), None);
        entity.add_component(InitializedComponent::new("tag", json!(null)));
        assert!(entity.has_component("tag"));
        assert_eq!(entity.remove_component("tag"), Some(json!(null)));
        assert!(!entity.has_component("tag"));
    }

    #[test]
    fn test_has_component_counts_falsy_payloads() {
        let entity = Entity::create(None, [InitializedComponent::new("score", json!(0))]);
        assert!(entity.has_component("score"));
    }

    #[test]
    fn test_typed_insert_and_get() {
        let mut entity = Entity::new();
        assert_eq!(entity.get::<Position>().unwrap(), None);

        entity.insert(&Position { x: 1.0, y: 2.0 }).unwrap();
        assert_eq!(
            entity.get::<Position>().unwrap(),
            Some(Position { x: 1.0, y: 2.0 })
        );
        assert_eq!(entity.component("position"), Some(&json!({"x": 1.0, "y": 2.0})));
    }

    #[test]
    fn test_typed_get_reports_mismatch() {
        let entity = Entity::create(None, [InitializedComponent::new("position", json!("north"))]);
        let err = entity.get::<Position>().unwrap_err();
        assert!(matches!(err, ComponentError::Decode { ref kind, .. } if kind == "position"));
    }

    #[test]
    fn test_entity_json_shape() {
        let entity = Entity::create(Some("e1".into()), [InitializedComponent::new("a", json!([1, 2]))]);
        let value = serde_json::to_value(&entity).unwrap();
        assert_eq!(value, json!({"id": "e1", "components": {"a": [1, 2]}}));
    }
}
