//! Critter ECS -- a small, safe, deterministic entity/component store.
//!
//! Components live in per-type slot columns indexed by entity index, so
//! lookups are O(1) and queries walk entities in ascending slot order.
//! Generational [`EntityId`](entity::EntityId)s make a handle to a despawned
//! entity fail loudly instead of aliasing the slot's next occupant.
//!
//! # Quick Start
//!
//! ```
//! use critter_ecs::prelude::*;
//!
//! #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
//! struct Energy(u32);
//! impl Component for Energy { const NAME: &'static str = "energy"; }
//!
//! let mut world = World::new();
//! world.register_component::<Energy>();
//!
//! let pet = world.spawn_with(Energy(100)).unwrap();
//! world.get_component_mut::<Energy>(pet).unwrap().0 -= 10;
//! assert_eq!(world.get_component::<Energy>(pet).unwrap(), &Energy(90));
//!
//! world.despawn(pet).unwrap();
//! assert!(matches!(
//!     world.get_component::<Energy>(pet),
//!     Err(EcsError::StaleEntity { .. })
//! ));
//! ```

#![deny(unsafe_code)]

pub mod command;
pub mod component;
pub mod entity;
pub mod query;
pub mod snapshot;
mod storage;
pub mod world;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced by world operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EcsError {
    /// The handle is dead or its generation no longer matches the slot.
    #[error("entity {entity:?} does not exist (stale or never allocated)")]
    StaleEntity { entity: entity::EntityId },

    #[error("component type '{name}' was never registered")]
    UnregisteredComponent { name: String },

    /// A component was addressed by a name nobody registered.
    #[error("component type '{name}' not registered. Registered components: [{registered}]")]
    UnknownComponent { name: String, registered: String },

    #[error("entity {entity:?} has no '{component}' component")]
    MissingComponent {
        entity: entity::EntityId,
        component: String,
    },

    #[error("failed to deserialize component '{component}': {details}")]
    ComponentDeserialization { component: String, details: String },

    #[error("failed to serialize component '{component}': {details}")]
    ComponentSerialization { component: String, details: String },
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

pub mod prelude {
    pub use crate::command::{ApplyReport, CausalReason, Command, CommandBuffer, CommandKind, SystemId};
    pub use crate::component::{Component, ComponentRegistry};
    pub use crate::entity::EntityId;
    pub use crate::query::{Query, QueryItem, QueryIter};
    pub use crate::snapshot::{EntitySnapshot, WorldSnapshot};
    pub use crate::world::{ComponentBundle, World};
    pub use crate::EcsError;
}
