//! The live entity set.
//!
//! [`EntityStore`] exclusively owns every entity that has been added to it,
//! keyed by identity. There is no snapshotting: systems read and write the
//! same map in place, and iteration order is unspecified.

use std::collections::HashMap;

use serde::Serialize;

use crate::component::InitializedComponent;
use crate::entity::{Entity, EntityId};
use crate::query::Query;

/// Entities matched by a query, keyed by identity.
pub type QueryResult<'a> = HashMap<&'a EntityId, &'a Entity>;

/// Outcome of [`EntityStore::add`].
#[derive(Debug, Clone, PartialEq)]
pub enum Insertion {
    /// No entity with this identity was live.
    Inserted,
    /// An entity with the same identity was replaced wholesale (no merge).
    Replaced(Entity),
}

/// Live mapping from entity identity to entity.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct EntityStore {
    entities: HashMap<EntityId, Entity>,
}

impl EntityStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an entity without adding it. See [`Entity::create`].
    #[must_use]
    pub fn create<C>(id: Option<EntityId>, components: C) -> Entity
    where
        C: IntoIterator<Item = InitializedComponent>,
    {
        Entity::create(id, components)
    }

    /// Insert an entity keyed by its identity, replacing any live entity
    /// with the same identity.
    pub fn add(&mut self, entity: Entity) -> Insertion {
        match self.entities.insert(entity.id().clone(), entity) {
            Some(previous) => Insertion::Replaced(previous),
            None => Insertion::Inserted,
        }
    }

    /// Remove an entity. Absent ids are a no-op.
    pub fn remove_by_id(&mut self, id: &str) -> Option<Entity> {
        self.entities.remove(id)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entities.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.values_mut()
    }

    /// Returns the identities of every live entity.
    #[must_use]
    pub fn ids(&self) -> Vec<EntityId> {
        self.entities.keys().cloned().collect()
    }

    /// Filter the live set. Runs in O(E · (|include| + |exclude|)).
    #[must_use]
    pub fn query(&self, query: &Query) -> QueryResult<'_> {
        self.entities
            .iter()
            .filter(|(_, entity)| query.matches(entity))
            .collect()
    }

    /// Identities of the entities matching `query`.
    ///
    /// Useful when the caller needs to add or remove entities while walking
    /// the matches.
    #[must_use]
    pub fn query_ids(&self, query: &Query) -> Vec<EntityId> {
        self.entities
            .values()
            .filter(|entity| query.matches(entity))
            .map(|entity| entity.id().clone())
            .collect()
    }

    /// Mutable access to the entities matching `query`.
    pub fn query_mut<'a>(&'a mut self, query: &'a Query) -> impl Iterator<Item = &'a mut Entity> {
        self.entities
            .values_mut()
            .filter(move |entity| query.matches(entity))
    }
}


#[cfg(test)]
mod proptests {
    use std::collections::HashSet;

    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    const NAMES: [&str; 4] = ["a", "b", "c", "d"];

    fn entity_masks() -> impl Strategy<Value = Vec<u8>> {
        prop::collection::vec(0u8..16, 0..40)
    }

    fn build(masks: &[u8]) -> EntityStore {
        let mut store = EntityStore::new();
        for (i, mask) in masks.iter().enumerate() {
            let components = NAMES
                .iter()
                .enumerate()
                .filter(|(bit, _)| mask & (1 << bit) != 0)
                .map(|(_, name)| InitializedComponent::new(*name, json!(i)));
            store.add(EntityStore::create(Some(format!("e{i}").into()), components));
        }
        store
    }

    proptest! {
        #[test]
        fn generated_ids_never_collide(count in 1usize..200) {
            let mut store = EntityStore::new();
            for _ in 0..count {
                store.add(Entity::new());
            }
            prop_assert_eq!(store.len(), count);
        }

        #[test]
        fn query_matches_brute_force(
            masks in entity_masks(),
            include in 0u8..16,
            exclude in 0u8..16,
            skip in 0usize..40,
        ) {
            let store = build(&masks);
            let mut query = Query::new();
            for (bit, name) in NAMES.iter().enumerate() {
                if include & (1 << bit) != 0 {
                    query = query.include(*name);
                }
                if exclude & (1 << bit) != 0 {
                    query = query.exclude(*name);
                }
            }
            query = query.exclude_id(format!("e{skip}"));

            let expected: HashSet<String> = masks
                .iter()
                .enumerate()
                .filter(|(i, mask)| {
                    *i != skip && **mask & include == include && **mask & exclude == 0
                })
                .map(|(i, _)| format!("e{i}"))
                .collect();
            let actual: HashSet<String> = store
                .query(&query)
                .keys()
                .map(|id| id.to_string())
                .collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
