//! Breeding two of a player's pets into a new one.

use critter_ecs::prelude::*;
use rand::Rng;
use tracing::info;

use super::lookup::{self, ensure_balance, validate_nickname};
use super::spawn::{link_owner, newborn, random_gender};
use super::{ActionContext, ActionError, ActionKind, Reply};
use crate::components::{Element, Magic, Progression, Skill, SkillKind};
use crate::events::EventKind;

pub(super) fn breed(
    ctx: &mut ActionContext<'_>,
    persona_tag: &str,
    mother: &str,
    father: &str,
    child: &str,
) -> Result<Reply, ActionError> {
    validate_nickname(ctx.config, child)?;
    let world: &World = ctx.world;
    if lookup::nickname_taken(world, child) {
        return Err(ActionError::DuplicateNickname {
            nickname: child.to_owned(),
        });
    }
    let (player_id, player) = lookup::player(world, persona_tag)?;
    let (mother_id, mother_pet) = lookup::pet_anywhere(world, mother)?;
    let (father_id, father_pet) = lookup::pet_anywhere(world, father)?;
    for (id, nickname) in [(mother_id, mother), (father_id, father)] {
        if !player.owns(id) {
            return Err(ActionError::NotOwner {
                nickname: nickname.to_owned(),
            });
        }
    }
    if mother_pet.gender == father_pet.gender {
        return Err(ActionError::SameGender {
            mother: mother.to_owned(),
            father: father.to_owned(),
        });
    }
    ensure_balance(player, ctx.config.pet_cost)?;
    let mut owner = player.clone();

    let gender = random_gender(ctx.rng);
    let element = Element::ALL[ctx.rng.gen_range(0..Element::ALL.len())];
    let skill = SkillKind::ALL[ctx.rng.gen_range(0..SkillKind::ALL.len())];
    let bundle = newborn(ctx.rng, persona_tag, child, gender, ctx.tick)
        .with(Magic {
            element,
            progress: Progression::default(),
        })
        .with(Skill {
            kind: skill,
            progress: Progression::default(),
        });
    let entity = ctx.world.spawn_bundle(bundle)?;

    owner.money -= ctx.config.pet_cost;
    owner.adopt(entity, child);
    link_owner(ctx, player_id, &owner, entity, ActionKind::Breed)?;

    ctx.events.emit(ctx.tick, EventKind::NewPet, entity, child);
    info!(
        persona = %persona_tag,
        pet = %child,
        %mother,
        %father,
        ?element,
        ?skill,
        entity = %entity,
        "pet bred"
    );
    Ok(Reply::Bred { entity })
}
