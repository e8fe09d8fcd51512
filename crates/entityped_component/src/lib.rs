//! # entityped_component
//!
//! The data half of the entityped ECS runtime: what an entity is, how
//! components are built and attached, and how the live entity set is stored
//! and filtered.
//!
//! This crate provides:
//!
//! - [`EntityId`] — opaque string identities, generated as random v4 UUIDs.
//! - [`Entity`] — an identity plus a map of named JSON component payloads.
//! - [`Component`] — trait for strongly-typed payloads stored under a name.
//! - [`ComponentKind`] — a named factory turning init input into a component.
//! - [`ComponentTypes`] — the registry of kinds an engine is built with.
//! - [`Query`] — include/exclude/exclude-id filters over the entity set.
//! - [`EntityStore`] — the live mapping from identity to entity.

pub mod component;
pub mod entity;
pub mod error;
pub mod query;
pub mod store;

pub use component::{Component, ComponentKind, ComponentTypes, InitializedComponent};
pub use entity::{Entity, EntityId};
pub use error::ComponentError;
pub use query::Query;
pub use store::{EntityStore, Insertion, QueryResult};
