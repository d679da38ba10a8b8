//! Stat decay.
//!
//! Each stat has its own interval. When it comes due every pet loses one
//! point of that stat; Health only drops while Hygiene is at or below the
//! illness threshold. Stats at 0 stay at 0. Decay is best-effort:
//! a pet missing a component is skipped and the pass continues.

use critter_ecs::prelude::*;
use tracing::warn;

use super::{ids, queue, SystemContext};
use crate::components::{Energy, Health, Hygiene, Pet, Vital, Wellness};

fn decline<T: Vital>(
    ctx: &SystemContext<'_>,
    world: &World,
    cmds: &mut CommandBuffer,
    interval: u64,
    issued_by: SystemId,
    rule: &str,
) {
    if !ctx.due(interval) {
        return;
    }
    for (pet, (_, stat)) in world.query::<(&Pet, &T)>() {
        if stat.value() == 0 {
            continue;
        }
        queue(cmds, pet, &stat.drain(1), issued_by, CausalReason::GameRule(rule.to_owned()));
    }
}

pub fn energy_decline(ctx: &SystemContext<'_>, world: &World, cmds: &mut CommandBuffer) {
    decline::<Energy>(ctx, world, cmds, ctx.config.energy_decline_interval, ids::ENERGY_DECLINE, "energy_decline");
}

pub fn hygiene_decline(ctx: &SystemContext<'_>, world: &World, cmds: &mut CommandBuffer) {
    decline::<Hygiene>(ctx, world, cmds, ctx.config.hygiene_decline_interval, ids::HYGIENE_DECLINE, "hygiene_decline");
}

pub fn wellness_decline(ctx: &SystemContext<'_>, world: &World, cmds: &mut CommandBuffer) {
    decline::<Wellness>(ctx, world, cmds, ctx.config.wellness_decline_interval, ids::WELLNESS_DECLINE, "wellness_decline");
}

/// Health only declines while the pet is dirty.
pub fn health_decline(ctx: &SystemContext<'_>, world: &World, cmds: &mut CommandBuffer) {
    if !ctx.due(ctx.config.health_decline_interval) {
        return;
    }
    for (pet, (_, health, hygiene)) in world.query::<(&Pet, &Health, Option<&Hygiene>)>() {
        let Some(hygiene) = hygiene else {
            warn!(entity = ?pet, "pet has no hygiene, skipping health decline");
            continue;
        };
        if hygiene.value() > ctx.config.illness_hygiene_threshold || health.value() == 0 {
            continue;
        }
        queue(
            cmds,
            pet,
            &health.drain(1),
            ids::HEALTH_DECLINE,
            CausalReason::GameRule("illness_from_filth".to_owned()),
        );
    }
}
