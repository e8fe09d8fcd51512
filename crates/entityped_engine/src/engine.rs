//! The engine value that owns all runtime state.
//!
//! One [`Engine`] holds one entity store, one system registry, one event bus
//! and one action queue. Engines share nothing, so any number can coexist in
//! a process (or a test binary).

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use entityped_component::{
    ComponentTypes, Entity, EntityId, EntityStore, InitializedComponent, Insertion, Query,
    QueryResult,
};
use entityped_system::{ActionQueue, EventBus, Resources, System, SystemRegistry, Toggle};

use crate::config::EngineConfig;
use crate::error::EngineError;

#[derive(Serialize)]
struct Snapshot<'a> {
    entities: &'a EntityStore,
    #[serde(skip_serializing_if = "Option::is_none")]
    systems: Option<Vec<&'a str>>,
}

/// Process-local ECS runtime.
pub struct Engine {
    pub(crate) config: EngineConfig,
    components: ComponentTypes,
    pub(crate) entities: EntityStore,
    pub(crate) systems: SystemRegistry,
    pub(crate) events: EventBus,
    pub(crate) actions: ActionQueue,
    pub(crate) tick_id: u64,
}

impl Engine {
    /// Create an engine over a fixed set of component kinds, with default
    /// configuration.
    #[must_use]
    pub fn new(components: ComponentTypes) -> Self {
        Self::with_config(components, EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(components: ComponentTypes, config: EngineConfig) -> Self {
        debug!(kinds = ?components.names(), policy = %config.failure_policy, "engine created");
        Self {
            config,
            components,
            entities: EntityStore::new(),
            systems: SystemRegistry::new(),
            events: EventBus::new(),
            actions: ActionQueue::new(),
            tick_id: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The component kinds this engine was built with.
    #[must_use]
    pub fn components(&self) -> &ComponentTypes {
        &self.components
    }

    /// Number of completed or attempted ticks.
    #[must_use]
    pub fn tick_id(&self) -> u64 {
        self.tick_id
    }

    // -- Entities --

    /// Build a component of a registered kind from JSON init input.
    ///
    /// # Errors
    ///
    /// Fails for unknown kinds and propagates the kind's own failures.
    pub fn create_component(&self, kind: &str, init: Value) -> Result<InitializedComponent, EngineError> {
        Ok(self.components.create(kind, init)?)
    }

    /// Build an entity without adding it. See [`Entity::create`].
    #[must_use]
    pub fn create_entity<C>(&self, id: Option<EntityId>, components: C) -> Entity
    where
        C: IntoIterator<Item = InitializedComponent>,
    {
        EntityStore::create(id, components)
    }

    /// Make an entity live, replacing any live entity with the same id.
    pub fn add_entity(&mut self, entity: Entity) -> Insertion {
        let id = entity.id().clone();
        let outcome = self.entities.add(entity);
        if let Insertion::Replaced(_) = outcome {
            debug!(entity = %id, "replaced live entity");
        }
        outcome
    }

    /// Remove a live entity. Absent ids are a no-op.
    pub fn remove_entity_by_id(&mut self, id: &str) -> Option<Entity> {
        self.entities.remove_by_id(id)
    }

    #[must_use]
    pub fn entity_by_id(&self, id: &str) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn entity_by_id_mut(&mut self, id: &str) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    #[must_use]
    pub fn entities(&self) -> &EntityStore {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut EntityStore {
        &mut self.entities
    }

    /// Filter the live entity set.
    #[must_use]
    pub fn entity_query(&self, query: &Query) -> QueryResult<'_> {
        self.entities.query(query)
    }

    // -- Systems --

    /// Register a system. It starts disabled.
    ///
    /// # Errors
    ///
    /// Fails if a system with the same name is already registered.
    pub fn add_system<I: 'static>(&mut self, system: System<I>) -> Result<(), EngineError> {
        Ok(self.systems.register(system)?)
    }

    /// Unregister a system without running its `destroy` hook.
    pub fn remove_system(&mut self, name: &str) -> bool {
        self.systems.remove(name)
    }

    #[must_use]
    pub fn systems(&self) -> &SystemRegistry {
        &self.systems
    }

    /// Enable systems by name, running each one's `init` hook.
    ///
    /// # Errors
    ///
    /// Propagates the first failing `init`.
    pub fn enable_systems<N>(&mut self, names: N) -> Result<Vec<Toggle>, EngineError>
    where
        N: IntoIterator,
        N::Item: AsRef<str>,
    {
        let mut resources = Resources {
            entities: &mut self.entities,
            events: &self.events,
            actions: &self.actions,
        };
        Ok(self.systems.enable(names, &mut resources)?)
    }

    /// Disable systems by name, running each one's `destroy` hook.
    ///
    /// # Errors
    ///
    /// Propagates the first failing `destroy`.
    pub fn disable_systems<N>(&mut self, names: N) -> Result<Vec<Toggle>, EngineError>
    where
        N: IntoIterator,
        N::Item: AsRef<str>,
    {
        let mut resources = Resources {
            entities: &mut self.entities,
            events: &self.events,
            actions: &self.actions,
        };
        Ok(self.systems.disable(names, &mut resources)?)
    }

    // -- Actions and events --

    /// Defer an operation to the start of the next tick.
    pub fn queue_action<F>(&self, action: F)
    where
        F: FnOnce(&mut EntityStore) -> anyhow::Result<()> + 'static,
    {
        self.actions.queue(action);
    }

    /// Handle to the action queue, for closures that outlive a borrow of
    /// the engine.
    #[must_use]
    pub fn actions(&self) -> &ActionQueue {
        &self.actions
    }

    /// Subscribe a handler to a named event.
    pub fn subscribe<F>(&self, name: impl Into<String>, handler: F)
    where
        F: Fn(Option<&Value>) -> anyhow::Result<()> + 'static,
    {
        self.events.subscribe(name, handler);
    }

    /// Invoke every handler subscribed to `name`. Returns how many ran.
    ///
    /// # Errors
    ///
    /// Propagates the first failing handler.
    pub fn dispatch(&self, name: &str, payload: Option<&Value>) -> Result<usize, EngineError> {
        Ok(self.events.dispatch(name, payload)?)
    }

    /// Handle to the event bus.
    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    // -- Inspection --

    /// Render the live entities as compact JSON: `{"entities": {id: entity}}`.
    ///
    /// # Errors
    ///
    /// Fails only if a payload cannot be represented as JSON.
    pub fn to_json(&self) -> Result<String, EngineError> {
        let snapshot = Snapshot {
            entities: &self.entities,
            systems: None,
        };
        Ok(serde_json::to_string(&snapshot)?)
    }

    /// Log the live entities and registered system names at debug level.
    pub fn debug(&self) {
        let snapshot = Snapshot {
            entities: &self.entities,
            systems: Some(self.systems.names()),
        };
        match serde_json::to_string_pretty(&snapshot) {
            Ok(pretty) => debug!(tick_id = self.tick_id, "{pretty}"),
            Err(err) => debug!(tick_id = self.tick_id, error = %err, "engine state is not representable as JSON"),
        }
    }
}

impl std::fmt::Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let json = self.to_json().map_err(|_| std::fmt::Error)?;
        f.write_str(&json)
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("components", &self.components)
            .field("entities", &self.entities.len())
            .field("systems", &self.systems)
            .field("events", &self.events)
            .field("actions", &self.actions)
            .field("tick_id", &self.tick_id)
            .finish()
    }
}
