//! Player and pet creation.

use critter_ecs::prelude::*;
use rand::Rng;
use rand_pcg::Pcg64;
use tracing::info;

use super::lookup::{self, ensure_balance, validate_nickname, validate_persona_tag};
use super::{ActionContext, ActionError, ActionKind, Reply};
use crate::components::{
    Activity, Dna, Energy, Gender, Health, Hygiene, Pet, Player, Think, Wellness,
};
use crate::events::EventKind;

pub(super) fn create_player(ctx: &mut ActionContext<'_>, persona_tag: &str) -> Result<Reply, ActionError> {
    validate_persona_tag(ctx.config, persona_tag)?;
    if lookup::player_exists(ctx.world, persona_tag) {
        return Err(ActionError::DuplicatePlayer {
            persona_tag: persona_tag.to_owned(),
        });
    }

    let entity = ctx
        .world
        .spawn_with(Player::new(persona_tag, ctx.config.player_initial_money))?;
    ctx.events.emit(ctx.tick, EventKind::NewPlayer, entity, persona_tag);
    info!(persona = %persona_tag, entity = %entity, "player created");
    Ok(Reply::PlayerCreated { entity })
}

pub(super) fn create_pet(ctx: &mut ActionContext<'_>, persona_tag: &str, nickname: &str) -> Result<Reply, ActionError> {
    validate_nickname(ctx.config, nickname)?;
    let (player_id, player) = lookup::player(ctx.world, persona_tag)?;
    if lookup::nickname_taken(ctx.world, nickname) {
        return Err(ActionError::DuplicateNickname {
            nickname: nickname.to_owned(),
        });
    }
    ensure_balance(player, ctx.config.pet_cost)?;
    let mut owner = player.clone();

    let gender = random_gender(ctx.rng);
    let bundle = newborn(ctx.rng, persona_tag, nickname, gender, ctx.tick);
    let entity = ctx.world.spawn_bundle(bundle)?;

    owner.money -= ctx.config.pet_cost;
    owner.adopt(entity, nickname);
    link_owner(ctx, player_id, &owner, entity, ActionKind::CreatePet)?;

    ctx.events.emit(ctx.tick, EventKind::NewPet, entity, nickname);
    info!(persona = %persona_tag, pet = %nickname, %gender, entity = %entity, "pet created");
    Ok(Reply::PetCreated { entity })
}

/// Components every new pet starts with: full stats, idle, random DNA.
pub(super) fn newborn(rng: &mut Pcg64, owner: &str, nickname: &str, gender: Gender, tick: u64) -> ComponentBundle {
    ComponentBundle::new()
        .with(Pet::newborn(owner, nickname, gender, tick))
        .with(Health::full())
        .with(Energy::full())
        .with(Hygiene::full())
        .with(Wellness::full())
        .with(Activity::idle())
        .with(Think::default())
        .with(random_dna(rng))
}

pub(super) fn random_gender(rng: &mut Pcg64) -> Gender {
    if rng.gen_bool(0.5) {
        Gender::Female
    } else {
        Gender::Male
    }
}

fn random_dna(rng: &mut Pcg64) -> Dna {
    Dna {
        a: rng.gen_range(0..=100),
        c: rng.gen_range(0..=100),
        g: rng.gen_range(0..=100),
        t: rng.gen_range(0..=100),
    }
}

/// Queue the owner's updated record. If that cannot be queued the freshly
/// spawned pet is removed again so no orphan survives.
pub(super) fn link_owner(
    ctx: &mut ActionContext<'_>,
    player_id: EntityId,
    owner: &Player,
    pet: EntityId,
    kind: ActionKind,
) -> Result<(), ActionError> {
    let reason = CausalReason::PlayerInput(kind.to_string());
    if let Err(e) = ctx.cmds.set(player_id, owner, kind.system_id(), reason) {
        ctx.world.despawn(pet)?;
        return Err(e.into());
    }
    Ok(())
}
