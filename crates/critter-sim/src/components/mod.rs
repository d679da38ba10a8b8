//! Component schema of the pet world.

pub mod activity;
pub mod genetics;
pub mod item;
pub mod leaderboard;
pub mod pet;
pub mod player;
pub mod store;
pub mod think;
pub mod vitals;

use critter_ecs::world::World;

pub use activity::{Activity, ActivityKind, Progress};
pub use genetics::{Dna, Element, Magic, Progression, Skill, SkillKind};
pub use item::{Item, ItemKind};
pub use leaderboard::{Leaderboard, Placement};
pub use pet::{level_threshold, Gender, Pet};
pub use player::{PetRef, Player};
pub use store::{Store, StoreKind};
pub use think::{Think, IDLE_THOUGHT};
pub use vitals::{Energy, Health, Hygiene, Vital, Wellness, STAT_MAX};

/// Register every component type the simulation uses.
pub fn register_all(world: &mut World) {
    world.register_component::<Pet>();
    world.register_component::<Health>();
    world.register_component::<Energy>();
    world.register_component::<Hygiene>();
    world.register_component::<Wellness>();
    world.register_component::<Activity>();
    world.register_component::<Think>();
    world.register_component::<Dna>();
    world.register_component::<Magic>();
    world.register_component::<Skill>();
    world.register_component::<Item>();
    world.register_component::<Player>();
    world.register_component::<Store>();
    world.register_component::<Leaderboard>();
}
