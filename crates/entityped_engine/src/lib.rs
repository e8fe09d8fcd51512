//! # entityped_engine
//!
//! A process-local entity-component-system runtime.
//!
//! An [`Engine`] is built from a fixed [`ComponentTypes`] registry and then
//! driven by the caller:
//!
//! 1. Build components from registered kinds and fold them into entities.
//! 2. Add entities to the engine.
//! 3. Register systems, then enable them by name.
//! 4. Call [`Engine::update_systems`] once per tick.
//!
//! Each tick drains the action queue, then updates every enabled system in
//! registration order. Systems coordinate through the event bus and the
//! action queue.
//!
//! ## Usage
//!
//! ```rust
//! use entityped_engine::prelude::*;
//! use serde_json::json;
//!
//! let components = ComponentTypes::new()
//!     .with(ComponentKind::new("score", |init: u32| init));
//! let mut engine = Engine::new(components);
//!
//! let score = engine.create_component("score", json!(10)).unwrap();
//! engine.add_entity(engine.create_entity(None, [score]));
//!
//! engine
//!     .add_system(System::new("double", |ctx| {
//!         for entity in ctx.entities.query_mut(&Query::new().include("score")) {
//!             if let Some(score) = entity.component_mut("score") {
//!                 *score = json!(score.as_u64().unwrap_or(0) * 2);
//!             }
//!         }
//!         Ok(())
//!     }))
//!     .unwrap();
//! engine.enable_systems(["double"]).unwrap();
//! engine.update_systems().unwrap();
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod prelude;
pub mod tick;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::EngineError;
pub use tick::TickReport;

pub use entityped_component::{
    Component, ComponentError, ComponentKind, ComponentTypes, Entity, EntityId, EntityStore,
    InitializedComponent, Insertion, Query, QueryResult,
};
pub use entityped_system::{
    ActionQueue, EventBus, FailurePolicy, Hook, System, SystemContext, SystemError, Toggle,
};
