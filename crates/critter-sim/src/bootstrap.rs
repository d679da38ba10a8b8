//! World initialization.
//!
//! Creates the leaderboard and the three store singletons exactly once and
//! returns their ids as [`WorldHandles`]. Systems and actions receive the
//! handles explicitly instead of searching the world for them.

use critter_ecs::prelude::*;
use tracing::{debug, info};

use crate::catalog::{self, CatalogEntry, Effect};
use crate::components::{self, Health, Hygiene, Item, Leaderboard, Store, StoreKind, Wellness};
use crate::config::SimConfig;

/// Ids of the world's singleton entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldHandles {
    pub leaderboard: EntityId,
    pub food_store: EntityId,
    pub drug_store: EntityId,
    pub toy_store: EntityId,
}

impl WorldHandles {
    pub fn store(&self, kind: StoreKind) -> EntityId {
        match kind {
            StoreKind::Food => self.food_store,
            StoreKind::Drug => self.drug_store,
            StoreKind::Toy => self.toy_store,
        }
    }
}

/// Build a fresh world: register components, stock the stores, create the
/// leaderboard.
pub fn init_world(config: &SimConfig) -> Result<(World, WorldHandles), EcsError> {
    let mut world = World::new();
    components::register_all(&mut world);

    let leaderboard = world.spawn_with(Leaderboard::new(config.leaderboard_size))?;
    let food_store = stock_store(&mut world, StoreKind::Food)?;
    let drug_store = stock_store(&mut world, StoreKind::Drug)?;
    let toy_store = stock_store(&mut world, StoreKind::Toy)?;

    info!(
        entities = world.entity_count(),
        leaderboard_size = config.leaderboard_size,
        "world initialized"
    );
    Ok((
        world,
        WorldHandles {
            leaderboard,
            food_store,
            drug_store,
            toy_store,
        },
    ))
}

fn stock_store(world: &mut World, kind: StoreKind) -> Result<EntityId, EcsError> {
    let mut items = Vec::new();
    for entry in catalog::stock(kind) {
        items.push(world.spawn_bundle(item_bundle(entry))?);
    }
    debug!(store = %kind, items = items.len(), "store stocked");
    world.spawn_with(Store { kind, items })
}

fn item_bundle(entry: &CatalogEntry) -> ComponentBundle {
    let bundle = ComponentBundle::new().with(Item {
        name: entry.name.to_owned(),
        kind: entry.kind,
        price: entry.price,
        description: entry.description.to_owned(),
    });
    match entry.effect {
        Effect::Health(v) => bundle.with(Health::new(v)),
        Effect::Hygiene(v) => bundle.with(Hygiene::new(v)),
        Effect::Wellness(v) => bundle.with(Wellness::new(v)),
    }
}
