//! Read-only views of the world for outside callers.
//!
//! Every endpoint returns owned, flat records; nothing here can mutate.

use critter_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use crate::bootstrap::WorldHandles;
use crate::components::{
    Activity, ActivityKind, Energy, Gender, Health, Hygiene, Item, ItemKind, Leaderboard, Pet, Player, Store,
    StoreKind, Think, Wellness,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("pet not found")]
    PetNotFound { nickname: String },

    #[error("player not found")]
    PlayerNotFound { persona_tag: String },

    #[error(transparent)]
    Store(#[from] EcsError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetSummary {
    pub entity: EntityId,
    pub nickname: String,
    pub owner: String,
    pub gender: Gender,
    pub level: u32,
    pub xp: u64,
    pub next_level_xp: u64,
    pub health: u32,
    pub energy: u32,
    pub hygiene: u32,
    pub wellness: u32,
    pub activity: ActivityKind,
    pub countdown: u32,
    pub percentage: u32,
    pub think: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemListing {
    pub entity: EntityId,
    pub name: String,
    pub kind: ItemKind,
    pub price: f64,
    pub description: String,
}

fn pet_by_nickname(world: &World, nickname: &str) -> Result<EntityId, QueryError> {
    world
        .find::<(&Pet,), _>(|&(p,)| p.nickname == nickname)
        .map(|(id, _)| id)
        .ok_or_else(|| QueryError::PetNotFound {
            nickname: nickname.to_owned(),
        })
}

fn player_by_tag<'w>(world: &'w World, persona_tag: &str) -> Result<&'w Player, QueryError> {
    world
        .find::<(&Player,), _>(|&(p,)| p.persona_tag == persona_tag)
        .map(|(_, (p,))| p)
        .ok_or_else(|| QueryError::PlayerNotFound {
            persona_tag: persona_tag.to_owned(),
        })
}

pub fn pet_health(world: &World, nickname: &str) -> Result<u32, QueryError> {
    let pet = pet_by_nickname(world, nickname)?;
    Ok(world.get_component::<Health>(pet)?.value())
}

pub fn pet_energy(world: &World, nickname: &str) -> Result<u32, QueryError> {
    let pet = pet_by_nickname(world, nickname)?;
    Ok(world.get_component::<Energy>(pet)?.value())
}

/// Every pet in entity order.
pub fn pets(world: &World) -> Result<Vec<PetSummary>, QueryError> {
    world
        .query::<(&Pet, &Activity, &Think)>()
        .map(|(entity, (pet, activity, think))| {
            Ok(PetSummary {
                entity,
                nickname: pet.nickname.clone(),
                owner: pet.owner.clone(),
                gender: pet.gender,
                level: pet.level,
                xp: pet.xp,
                next_level_xp: pet.next_level_xp,
                health: world.get_component::<Health>(entity)?.value(),
                energy: world.get_component::<Energy>(entity)?.value(),
                hygiene: world.get_component::<Hygiene>(entity)?.value(),
                wellness: world.get_component::<Wellness>(entity)?.value(),
                activity: activity.kind,
                countdown: activity.countdown,
                percentage: activity.percentage,
                think: think.as_str().to_owned(),
            })
        })
        .collect()
}

fn listings(world: &World, ids: &[EntityId]) -> Result<Vec<ItemListing>, QueryError> {
    ids.iter()
        .map(|&entity| {
            let item = world.get_component::<Item>(entity)?;
            Ok(ItemListing {
                entity,
                name: item.name.clone(),
                kind: item.kind,
                price: item.price,
                description: item.description.clone(),
            })
        })
        .collect()
}

/// A store's catalog in stocking order.
pub fn store_items(world: &World, handles: &WorldHandles, kind: StoreKind) -> Result<Vec<ItemListing>, QueryError> {
    let store = world.get_component::<Store>(handles.store(kind))?;
    listings(world, &store.items)
}

pub fn food_store(world: &World, handles: &WorldHandles) -> Result<Vec<ItemListing>, QueryError> {
    store_items(world, handles, StoreKind::Food)
}

pub fn drug_store(world: &World, handles: &WorldHandles) -> Result<Vec<ItemListing>, QueryError> {
    store_items(world, handles, StoreKind::Drug)
}

pub fn toy_store(world: &World, handles: &WorldHandles) -> Result<Vec<ItemListing>, QueryError> {
    store_items(world, handles, StoreKind::Toy)
}

/// Items a player holds, duplicates included.
pub fn player_items(world: &World, persona_tag: &str) -> Result<Vec<ItemListing>, QueryError> {
    let player = player_by_tag(world, persona_tag)?;
    listings(world, &player.items)
}

pub fn leaderboard(world: &World, handles: &WorldHandles) -> Result<Vec<Pet>, QueryError> {
    Ok(world.get_component::<Leaderboard>(handles.leaderboard)?.entries.clone())
}

pub fn player_exists(world: &World, persona_tag: &str) -> bool {
    player_by_tag(world, persona_tag).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::init_world;
    use crate::config::SimConfig;

    #[test]
    fn store_endpoints_list_catalog() {
        let (world, handles) = init_world(&SimConfig::default()).unwrap();
        let food: Vec<_> = food_store(&world, &handles).unwrap().into_iter().map(|i| i.name).collect();
        assert_eq!(food, vec!["Apple", "Banana", "Soup", "Carrots"]);
        assert_eq!(drug_store(&world, &handles).unwrap().len(), 5);
        assert_eq!(toy_store(&world, &handles).unwrap()[0].price, 5.0);
    }

    #[test]
    fn unknown_names_are_not_found() {
        let (world, handles) = init_world(&SimConfig::default()).unwrap();
        assert_eq!(
            pet_health(&world, "Rex"),
            Err(QueryError::PetNotFound {
                nickname: "Rex".into()
            })
        );
        assert!(matches!(
            player_items(&world, "ada"),
            Err(QueryError::PlayerNotFound { .. })
        ));
        assert!(!player_exists(&world, "ada"));
        assert!(leaderboard(&world, &handles).unwrap().is_empty());
    }

    #[test]
    fn pets_report_current_stats() {
        let (mut world, _) = init_world(&SimConfig::default()).unwrap();
        world
            .spawn_bundle(
                ComponentBundle::new()
                    .with(Pet::newborn("ada", "Rex", Gender::Male, 0))
                    .with(Health::new(40))
                    .with(Energy::full())
                    .with(Hygiene::full())
                    .with(Wellness::full())
                    .with(Activity::idle())
                    .with(Think::default()),
            )
            .unwrap();
        let all = pets(&world).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!((all[0].nickname.as_str(), all[0].health), ("Rex", 40));
        assert_eq!(pet_health(&world, "Rex"), Ok(40));
        assert_eq!(pet_energy(&world, "Rex"), Ok(100));
    }
}
