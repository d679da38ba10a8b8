//! Name resolution and input validation shared by the handlers.

use critter_ecs::prelude::*;

use super::{ActionError, ActionKind};
use crate::bootstrap::WorldHandles;
use crate::components::{Activity, Item, ItemKind, Pet, Player, Store, StoreKind, Vital};
use crate::config::SimConfig;

pub fn validate_nickname(config: &SimConfig, nickname: &str) -> Result<(), ActionError> {
    let reason = if nickname.is_empty() {
        Some("must not be empty")
    } else if nickname.chars().count() > config.max_nickname_len {
        Some("too long")
    } else if !nickname.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some("only letters and digits are allowed")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(ActionError::InvalidNickname {
            nickname: nickname.to_owned(),
            reason,
        }),
        None => Ok(()),
    }
}

pub fn validate_persona_tag(config: &SimConfig, persona_tag: &str) -> Result<(), ActionError> {
    let reason = if persona_tag.is_empty() {
        Some("must not be empty")
    } else if persona_tag.chars().count() > config.max_persona_tag_len {
        Some("too long")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(ActionError::InvalidPersonaTag {
            persona_tag: persona_tag.to_owned(),
            reason,
        }),
        None => Ok(()),
    }
}

pub fn player<'w>(world: &'w World, persona_tag: &str) -> Result<(EntityId, &'w Player), ActionError> {
    world
        .find::<(&Player,), _>(|&(p,)| p.persona_tag == persona_tag)
        .map(|(id, (p,))| (id, p))
        .ok_or_else(|| ActionError::PlayerNotFound {
            persona_tag: persona_tag.to_owned(),
        })
}

pub fn player_exists(world: &World, persona_tag: &str) -> bool {
    world
        .find::<(&Player,), _>(|&(p,)| p.persona_tag == persona_tag)
        .is_some()
}

/// Any pet in the world with this nickname.
pub fn pet_anywhere<'w>(world: &'w World, nickname: &str) -> Result<(EntityId, &'w Pet), ActionError> {
    world
        .find::<(&Pet,), _>(|&(p,)| p.nickname == nickname)
        .map(|(id, (p,))| (id, p))
        .ok_or_else(|| ActionError::PetNotFound {
            nickname: nickname.to_owned(),
        })
}

pub fn nickname_taken(world: &World, nickname: &str) -> bool {
    pet_anywhere(world, nickname).is_ok()
}

/// A pet in `owner`'s list, matched by nickname.
///
/// Removed entities left in the list are skipped; if nothing live matches
/// and a removed entry was registered under `nickname`, the failure names it.
pub fn owned_pet<'w>(world: &'w World, owner: &Player, nickname: &str) -> Result<(EntityId, &'w Pet), ActionError> {
    let mut stale = None;
    for entry in &owner.pets {
        match world.get_component::<Pet>(entry.entity) {
            Ok(pet) if pet.nickname == nickname => return Ok((entry.entity, pet)),
            Ok(_) => {}
            Err(EcsError::StaleEntity { .. }) => {
                if entry.nickname == nickname {
                    stale.get_or_insert(entry.entity);
                }
            }
            Err(e) => return Err(e.into()),
        }
    }
    Err(match stale {
        Some(entity) => ActionError::StalePetReference {
            nickname: nickname.to_owned(),
            entity,
        },
        None => ActionError::PetNotFound {
            nickname: nickname.to_owned(),
        },
    })
}

pub fn ensure_idle(world: &World, pet: EntityId, nickname: &str) -> Result<(), ActionError> {
    let activity = world.get_component::<Activity>(pet)?;
    if activity.is_idle() {
        Ok(())
    } else {
        Err(ActionError::PetBusy {
            nickname: nickname.to_owned(),
            activity: activity.kind,
        })
    }
}

/// An item the player holds, with the magnitude of effect `T` it carries.
///
/// The item must be of `kind` and carry a `T` effect, otherwise it cannot be
/// used for `action`.
pub fn held_item<'w, T: Vital>(
    world: &'w World,
    owner: &Player,
    name: &str,
    kind: ItemKind,
    action: ActionKind,
) -> Result<(EntityId, &'w Item, u32), ActionError> {
    let (id, item) = owner
        .items
        .iter()
        .find_map(|&id| {
            world
                .get_component::<Item>(id)
                .ok()
                .filter(|item| item.name == name)
                .map(|item| (id, item))
        })
        .ok_or_else(|| ActionError::ItemNotFound { item: name.to_owned() })?;

    let effect = world.get_component::<T>(id).ok().copied();
    match effect {
        Some(effect) if item.kind == kind => Ok((id, item, effect.value())),
        _ => Err(ActionError::ItemNotUsable {
            item: name.to_owned(),
            action,
        }),
    }
}

/// First catalog item with this name, searching Food, Drug then Toy stores.
pub fn catalog_item<'w>(
    world: &'w World,
    handles: &WorldHandles,
    name: &str,
) -> Result<(EntityId, &'w Item), ActionError> {
    for kind in StoreKind::ALL {
        let store = world.get_component::<Store>(handles.store(kind))?;
        for &id in &store.items {
            let item = world.get_component::<Item>(id)?;
            if item.name == name {
                return Ok((id, item));
            }
        }
    }
    Err(ActionError::ItemNotFound { item: name.to_owned() })
}

pub fn ensure_balance(player: &Player, price: f64) -> Result<(), ActionError> {
    if player.money < price {
        return Err(ActionError::InsufficientBalance {
            balance: player.money,
            price,
        });
    }
    Ok(())
}
