//! Common imports for building on the engine.

pub use crate::{
    Component, ComponentKind, ComponentTypes, Engine, EngineConfig, EngineError, Entity, EntityId,
    FailurePolicy, InitializedComponent, Query, System, SystemContext, Toggle,
};
