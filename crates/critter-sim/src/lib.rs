//! Critter Sim -- tick-driven virtual pet simulation.
//!
//! Pets carry four vital stats that decay over time and are restored by
//! their owners' actions. Actions are validated and applied one at a time;
//! a per-pet activity lock keeps two actions from occupying the same pet at
//! once. A small leaderboard tracks the highest-level pets and an advisory
//! pass turns each idle pet's stats into a line of thought.
//!
//! # Quick Start
//!
//! ```
//! use critter_sim::prelude::*;
//!
//! let mut sim = Simulation::new(SimConfig::default()).unwrap();
//! sim.submit("ada", Request::CreatePlayer).unwrap();
//! sim.tick();
//! sim.submit("ada", Request::CreatePet { nickname: "Manny".into() }).unwrap();
//! sim.submit("ada", Request::BuyItem { item: "Ball".into() }).unwrap();
//! sim.tick();
//! sim.submit("ada", Request::Play { nickname: "Manny".into(), item: "Ball".into() }).unwrap();
//! let receipts = sim.tick();
//! assert!(receipts[0].is_ok());
//! assert_eq!(sim.pet_energy("Manny").unwrap(), 90);
//! ```

#![deny(unsafe_code)]

pub mod actions;
pub mod bootstrap;
pub mod catalog;
pub mod components;
pub mod config;
pub mod events;
pub mod inbox;
pub mod queries;
pub mod snapshot;
pub mod systems;
pub mod tick;

/// Re-export the ECS crate for convenience.
pub use critter_ecs;

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

pub mod prelude {
    pub use critter_ecs::prelude::*;

    pub use crate::actions::{ActionError, ActionKind, ErrorCategory, Reply, Request};
    pub use crate::bootstrap::WorldHandles;
    pub use crate::components::{
        Activity, ActivityKind, Energy, Gender, Health, Hygiene, Item, ItemKind, Leaderboard, Pet, PetRef, Player,
        StoreKind, Think, Wellness,
    };
    pub use crate::config::{ConfigError, SimConfig};
    pub use crate::events::{EventKind, GameEvent};
    pub use crate::inbox::{InboxClosed, Submitter};
    pub use crate::queries::{ItemListing, PetSummary, QueryError};
    pub use crate::tick::{Receipt, SimError, Simulation, TickDiagnostics};
}
