//! Status advisory ("what is my pet thinking").
//!
//! Every `think_interval` ticks, each idle pet's stats are checked against
//! per-stat bands. Within a stat the first matching band applies; across
//! stats the order is Health, Hygiene, Wellness, Energy and the last stat
//! with a match decides the thought. Busy pets keep their activity line.

use critter_ecs::prelude::*;

use super::{ids, queue, SystemContext};
use crate::components::{Activity, Energy, Health, Hygiene, Pet, Think, Wellness};

/// Inclusive value range mapped to a thought.
#[derive(Debug, Clone, Copy)]
pub struct Band {
    pub min: u32,
    pub max: u32,
    pub text: &'static str,
}

const fn band(min: u32, max: u32, text: &'static str) -> Band {
    Band { min, max, text }
}

pub const HEALTH_BANDS: &[Band] = &[
    band(30, 40, "I don't feel well."),
    band(0, 29, "I'm gonna die!!!"),
];

pub const HYGIENE_BANDS: &[Band] = &[
    band(50, 60, "My whole body itches"),
    band(0, 40, "OMG!!! I'm really dirty! Someone please bathe me. Please!"),
];

pub const WELLNESS_BANDS: &[Band] = &[
    band(30, 70, "I feel a little depressed today."),
    band(0, 29, "Don't know what to do..."),
];

pub const ENERGY_BANDS: &[Band] = &[
    band(70, 80, "I'm bored. I would kill to go outside."),
    band(0, 60, "I'm bored... to death? Play with me!"),
];

fn first_match(bands: &[Band], value: u32) -> Option<&'static str> {
    bands
        .iter()
        .find(|b| (b.min..=b.max).contains(&value))
        .map(|b| b.text)
}

/// The thought for a pet with these stats, if any band matches.
pub fn advise(health: u32, hygiene: u32, wellness: u32, energy: u32) -> Option<&'static str> {
    [
        first_match(HEALTH_BANDS, health),
        first_match(HYGIENE_BANDS, hygiene),
        first_match(WELLNESS_BANDS, wellness),
        first_match(ENERGY_BANDS, energy),
    ]
    .into_iter()
    .flatten()
    .last()
}

pub fn think(ctx: &SystemContext<'_>, world: &World, cmds: &mut CommandBuffer) {
    if !ctx.due(ctx.config.think_interval) {
        return;
    }
    for (pet, (_, activity, current)) in world.query::<(&Pet, &Activity, &Think)>() {
        if !activity.is_idle() {
            continue;
        }
        let stats = (
            world.get_component::<Health>(pet),
            world.get_component::<Hygiene>(pet),
            world.get_component::<Wellness>(pet),
            world.get_component::<Energy>(pet),
        );
        let (Ok(health), Ok(hygiene), Ok(wellness), Ok(energy)) = stats else {
            continue;
        };
        let Some(text) = advise(health.value(), hygiene.value(), wellness.value(), energy.value()) else {
            continue;
        };
        if current.as_str() != text {
            queue(
                cmds,
                pet,
                &Think::new(text),
                ids::ADVISORY,
                CausalReason::GameRule("status_advisory".to_owned()),
            );
        }
    }
}
