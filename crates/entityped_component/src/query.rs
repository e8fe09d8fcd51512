//! Component-presence queries over the entity set.
//!
//! A [`Query`] keeps an entity when its id is not excluded, it carries every
//! `include` component, and it carries none of the `exclude` components.
//! Empty lists impose no restriction.

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId};

/// Filters applied to the live entity set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Query {
    /// Component names an entity must have.
    pub include: Vec<String>,
    /// Component names an entity must not have.
    pub exclude: Vec<String>,
    /// Entities dropped regardless of their components.
    pub exclude_ids: Vec<EntityId>,
}

impl Query {
    /// Create a query that matches every entity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a component.
    #[must_use]
    pub fn include(mut self, name: impl Into<String>) -> Self {
        self.include.push(name.into());
        self
    }

    /// Reject entities carrying a component.
    #[must_use]
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.exclude.push(name.into());
        self
    }

    /// Reject a specific entity.
    #[must_use]
    pub fn exclude_id(mut self, id: impl Into<EntityId>) -> Self {
        self.exclude_ids.push(id.into());
        self
    }

    /// Returns `true` if `entity` passes every filter.
    #[must_use]
    pub fn matches(&self, entity: &Entity) -> bool {
        if self.exclude_ids.contains(entity.id()) {
            return false;
        }

        self.include.iter().all(|name| entity.has_component(name))
            && !self.exclude.iter().any(|name| entity.has_component(name))
    }
}
