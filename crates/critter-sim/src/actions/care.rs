//! Pet care: play, feed, cure, bathe and sleep.
//!
//! Every handler resolves the player, then the pet through the player's own
//! list, then checks the busy flag (except Cure, which is instant). Items are
//! consumed from the player's list only; the catalog entity stays in its
//! store.

use critter_ecs::prelude::*;
use tracing::{debug, info};

use super::lookup::{self, ensure_idle, held_item};
use super::{delta, ActionContext, ActionError, ActionKind, Reply};
use crate::components::{
    Activity, ActivityKind, Energy, Health, Hygiene, ItemKind, Pet, Player, Think, Wellness,
};

const PLAY_THOUGHT: &str = "Love to play!";
const BATH_THOUGHT: &str = "(Singing...)";
const FEED_THOUGHT: &str = "Mmm Yummy!";
const SLEEP_THOUGHT: &str = "Zzz...Zzz";

/// A player and one of their pets, as read at the start of an action.
struct Target<'w> {
    player_id: EntityId,
    player: &'w Player,
    pet_id: EntityId,
    pet: &'w Pet,
}

fn target<'w>(world: &'w World, persona_tag: &str, nickname: &str) -> Result<Target<'w>, ActionError> {
    let (player_id, player) = lookup::player(world, persona_tag)?;
    let (pet_id, pet) = lookup::owned_pet(world, player, nickname)?;
    Ok(Target {
        player_id,
        player,
        pet_id,
        pet,
    })
}

/// Queues writes on behalf of one action.
struct Writes<'c> {
    cmds: &'c mut CommandBuffer,
    kind: ActionKind,
}

impl Writes<'_> {
    fn set<T: Component>(&mut self, entity: EntityId, value: &T) -> Result<(), ActionError> {
        self.cmds.set(
            entity,
            value,
            self.kind.system_id(),
            CausalReason::PlayerInput(self.kind.to_string()),
        )?;
        Ok(())
    }

    /// Put the pet to work and give it something to say about it.
    fn engage(
        &mut self,
        pet: EntityId,
        activity: ActivityKind,
        duration: u32,
        thought: &str,
    ) -> Result<(), ActionError> {
        self.set(pet, &Activity::begin(activity, duration))?;
        self.set(pet, &Think::new(thought))
    }

    fn consume(&mut self, player_id: EntityId, player: &Player, item: EntityId) -> Result<(), ActionError> {
        let mut player = player.clone();
        player.take_item(item);
        self.set(player_id, &player)
    }
}

pub(super) fn play(
    ctx: &mut ActionContext<'_>,
    persona_tag: &str,
    nickname: &str,
    item: &str,
) -> Result<Reply, ActionError> {
    let config = ctx.config;
    let world: &World = ctx.world;
    let t = target(world, persona_tag, nickname)?;
    ensure_idle(world, t.pet_id, nickname)?;
    if t.pet.at_max_level(config.max_level) {
        return Err(ActionError::MaxLevel {
            nickname: nickname.to_owned(),
            level: t.pet.level,
        });
    }
    let (toy, _, boost) = held_item::<Wellness>(world, t.player, item, ItemKind::Toy, ActionKind::Play)?;
    let energy = *world.get_component::<Energy>(t.pet_id)?;
    if energy.value() <= config.play_energy_cost {
        return Err(ActionError::InsufficientEnergy {
            nickname: nickname.to_owned(),
            energy: energy.value(),
            cost: config.play_energy_cost,
        });
    }
    let hygiene = *world.get_component::<Hygiene>(t.pet_id)?;
    let wellness = *world.get_component::<Wellness>(t.pet_id)?;

    let energy_after = energy.drain(config.play_energy_cost);
    let hygiene_after = hygiene.drain(config.play_hygiene_cost);
    let wellness_after = wellness.grant(boost);
    let mut pet = t.pet.clone();
    let levels = pet.add_xp(config.play_xp, config.max_level);
    if levels > 0 {
        info!(pet = %nickname, level = pet.level, "pet levelled up");
    }

    let mut w = Writes {
        cmds: &mut ctx.cmds,
        kind: ActionKind::Play,
    };
    w.set(t.pet_id, &energy_after)?;
    w.set(t.pet_id, &hygiene_after)?;
    w.set(t.pet_id, &wellness_after)?;
    w.set(t.pet_id, &pet)?;
    w.engage(t.pet_id, ActivityKind::Playing, config.play_duration, PLAY_THOUGHT)?;
    w.consume(t.player_id, t.player, toy)?;

    Ok(Reply::Played {
        energy: delta(energy.value(), energy_after.value()),
        hygiene: delta(hygiene.value(), hygiene_after.value()),
        wellness: delta(wellness.value(), wellness_after.value()),
        xp: config.play_xp,
        activity: ActivityKind::Playing,
        duration: config.play_duration,
    })
}

pub(super) fn feed(
    ctx: &mut ActionContext<'_>,
    persona_tag: &str,
    nickname: &str,
    item: &str,
) -> Result<Reply, ActionError> {
    let config = ctx.config;
    let world: &World = ctx.world;
    let t = target(world, persona_tag, nickname)?;
    ensure_idle(world, t.pet_id, nickname)?;
    let (food, _, boost) = held_item::<Health>(world, t.player, item, ItemKind::Food, ActionKind::Feed)?;
    let health = *world.get_component::<Health>(t.pet_id)?;
    let health_after = health.grant(boost);

    let mut w = Writes {
        cmds: &mut ctx.cmds,
        kind: ActionKind::Feed,
    };
    w.set(t.pet_id, &health_after)?;
    w.engage(t.pet_id, ActivityKind::Eating, config.eat_duration, FEED_THOUGHT)?;
    w.consume(t.player_id, t.player, food)?;

    Ok(Reply::Fed {
        health: delta(health.value(), health_after.value()),
        activity: ActivityKind::Eating,
        duration: config.eat_duration,
    })
}

/// Instant: heals without occupying the pet.
pub(super) fn cure(
    ctx: &mut ActionContext<'_>,
    persona_tag: &str,
    nickname: &str,
    item: &str,
) -> Result<Reply, ActionError> {
    let world: &World = ctx.world;
    let t = target(world, persona_tag, nickname)?;
    let (drug, _, boost) = held_item::<Health>(world, t.player, item, ItemKind::Care, ActionKind::Cure)?;
    let health = *world.get_component::<Health>(t.pet_id)?;
    let health_after = health.grant(boost);
    debug!(pet = %nickname, item = %item, health = health_after.value(), "pet cured");

    let mut w = Writes {
        cmds: &mut ctx.cmds,
        kind: ActionKind::Cure,
    };
    w.set(t.pet_id, &health_after)?;
    w.consume(t.player_id, t.player, drug)?;

    Ok(Reply::Cured {
        health: delta(health.value(), health_after.value()),
    })
}

pub(super) fn bathe(
    ctx: &mut ActionContext<'_>,
    persona_tag: &str,
    nickname: &str,
    item: &str,
) -> Result<Reply, ActionError> {
    let config = ctx.config;
    let world: &World = ctx.world;
    let t = target(world, persona_tag, nickname)?;
    ensure_idle(world, t.pet_id, nickname)?;
    let (soap, _, boost) = held_item::<Hygiene>(world, t.player, item, ItemKind::Care, ActionKind::Bathe)?;
    let energy = *world.get_component::<Energy>(t.pet_id)?;
    if energy.value() <= config.bath_energy_cost {
        return Err(ActionError::InsufficientEnergy {
            nickname: nickname.to_owned(),
            energy: energy.value(),
            cost: config.bath_energy_cost,
        });
    }
    let hygiene = *world.get_component::<Hygiene>(t.pet_id)?;
    let hygiene_after = hygiene.grant(boost);
    let energy_after = energy.drain(config.bath_energy_cost);

    let mut w = Writes {
        cmds: &mut ctx.cmds,
        kind: ActionKind::Bathe,
    };
    w.set(t.pet_id, &hygiene_after)?;
    w.set(t.pet_id, &energy_after)?;
    w.engage(t.pet_id, ActivityKind::Bathing, config.bath_duration, BATH_THOUGHT)?;
    w.consume(t.player_id, t.player, soap)?;

    Ok(Reply::Bathed {
        hygiene: delta(hygiene.value(), hygiene_after.value()),
        activity: ActivityKind::Bathing,
        duration: config.bath_duration,
    })
}

pub(super) fn sleep(ctx: &mut ActionContext<'_>, persona_tag: &str, nickname: &str) -> Result<Reply, ActionError> {
    let config = ctx.config;
    let world: &World = ctx.world;
    let t = target(world, persona_tag, nickname)?;
    ensure_idle(world, t.pet_id, nickname)?;
    let energy = *world.get_component::<Energy>(t.pet_id)?;
    let energy_after = energy.grant(config.sleep_energy_gain);

    let mut w = Writes {
        cmds: &mut ctx.cmds,
        kind: ActionKind::Sleep,
    };
    w.set(t.pet_id, &energy_after)?;
    w.engage(t.pet_id, ActivityKind::Sleeping, config.sleep_duration, SLEEP_THOUGHT)?;

    Ok(Reply::Slept {
        energy: delta(energy.value(), energy_after.value()),
        activity: ActivityKind::Sleeping,
        duration: config.sleep_duration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::test_support::Harness;
    use crate::actions::{ErrorCategory, Request};

    fn play(nickname: &str, item: &str) -> Request {
        Request::Play {
            nickname: nickname.into(),
            item: item.into(),
        }
    }

    fn setup() -> (Harness, EntityId, EntityId) {
        let mut h = Harness::new();
        let player = h.player("ada");
        let pet = h.pet("ada", "Manny");
        (h, player, pet)
    }

    #[test]
    fn play_applies_costs_and_rewards() {
        let (mut h, player, pet) = setup();
        h.buy("ada", "Ball");
        let reply = h.run("ada", play("Manny", "Ball")).unwrap();
        assert_eq!(
            reply,
            Reply::Played {
                energy: -10,
                hygiene: -5,
                wellness: 0,
                xp: 20,
                activity: ActivityKind::Playing,
                duration: 3600,
            }
        );
        assert_eq!(h.component::<Energy>(pet).value(), 90);
        assert_eq!(h.component::<Hygiene>(pet).value(), 95);
        assert_eq!(h.component::<Pet>(pet).xp, 20);
        let activity = h.component::<Activity>(pet);
        assert_eq!((activity.kind, activity.countdown), (ActivityKind::Playing, 3600));
        assert_eq!(h.component::<Think>(pet).as_str(), PLAY_THOUGHT);
        assert!(h.component::<Player>(player).items.is_empty());
    }

    #[test]
    fn second_play_sees_busy_pet() {
        let (mut h, player, _) = setup();
        h.buy("ada", "Ball");
        h.buy("ada", "Ball");
        h.run("ada", play("Manny", "Ball")).unwrap();
        let err = h.run("ada", play("Manny", "Ball")).unwrap_err();
        assert_eq!(err.to_string(), "pet is already engaged in an activity");
        // The second ball was not consumed.
        assert_eq!(h.component::<Player>(player).items.len(), 1);
    }

    #[test]
    fn play_without_toy_fails_and_writes_nothing() {
        let (mut h, _, pet) = setup();
        let err = h.run("ada", play("Manny", "Ball")).unwrap_err();
        assert_eq!(err.to_string(), "item not found");
        assert_eq!(h.component::<Energy>(pet).value(), 100);
        assert!(h.component::<Activity>(pet).is_idle());
    }

    #[test]
    fn play_rejects_non_toys() {
        let (mut h, _, _) = setup();
        h.buy("ada", "Apple");
        let err = h.run("ada", play("Manny", "Apple")).unwrap_err();
        assert!(matches!(err, ActionError::ItemNotUsable { .. }));
    }

    #[test]
    fn play_checks_max_level_before_item() {
        let (mut h, _, pet) = setup();
        h.world.get_component_mut::<Pet>(pet).unwrap().level = 10;
        let err = h.run("ada", play("Manny", "Ball")).unwrap_err();
        assert_eq!(err.to_string(), "pet max level reached, can't grow more");
    }

    #[test]
    fn play_cannot_level_past_cap() {
        let (mut h, _, pet) = setup();
        h.config.play_xp = 5000;
        h.buy("ada", "Ball");
        {
            let p = h.world.get_component_mut::<Pet>(pet).unwrap();
            p.level = 9;
            p.next_level_xp = crate::components::level_threshold(9);
        }
        h.run("ada", play("Manny", "Ball")).unwrap();
        let p = h.component::<Pet>(pet);
        assert_eq!((p.level, p.xp), (10, 0));
    }

    #[test]
    fn play_needs_energy_above_cost() {
        let (mut h, _, pet) = setup();
        h.buy("ada", "Ball");
        h.world.insert_component(pet, Energy::new(10)).unwrap();
        let err = h.run("ada", play("Manny", "Ball")).unwrap_err();
        assert_eq!(err.to_string(), "pet energy is insufficient");
        assert_eq!(err.category(), ErrorCategory::Precondition);
    }

    #[test]
    fn other_players_pets_are_not_found() {
        let (mut h, _, _) = setup();
        h.player("bob");
        h.buy("bob", "Ball");
        let err = h.run("bob", play("Manny", "Ball")).unwrap_err();
        assert_eq!(err.to_string(), "pet not found");
    }

    #[test]
    fn feed_clamps_health_and_occupies_pet() {
        let (mut h, _, pet) = setup();
        h.world.insert_component(pet, Health::new(95)).unwrap();
        h.buy("ada", "Soup");
        let reply = h
            .run(
                "ada",
                Request::Feed {
                    nickname: "Manny".into(),
                    item: "Soup".into(),
                },
            )
            .unwrap();
        assert_eq!(
            reply,
            Reply::Fed {
                health: 5,
                activity: ActivityKind::Eating,
                duration: 3600
            }
        );
        assert_eq!(h.component::<Health>(pet).value(), 100);
        assert_eq!(h.component::<Think>(pet).as_str(), FEED_THOUGHT);
    }

    #[test]
    fn cure_works_on_busy_pet() {
        let (mut h, _, pet) = setup();
        h.run(
            "ada",
            Request::Sleep {
                nickname: "Manny".into(),
            },
        )
        .unwrap();
        h.world.insert_component(pet, Health::new(20)).unwrap();
        h.buy("ada", "Vaccine");
        let reply = h
            .run(
                "ada",
                Request::Cure {
                    nickname: "Manny".into(),
                    item: "Vaccine".into(),
                },
            )
            .unwrap();
        assert_eq!(reply, Reply::Cured { health: 80 });
        assert_eq!(h.component::<Activity>(pet).kind, ActivityKind::Sleeping);
    }

    #[test]
    fn bathe_uses_sponge() {
        let (mut h, _, pet) = setup();
        h.world.insert_component(pet, Hygiene::new(40)).unwrap();
        h.buy("ada", "Sponge");
        let reply = h
            .run(
                "ada",
                Request::Bathe {
                    nickname: "Manny".into(),
                    item: "Sponge".into(),
                },
            )
            .unwrap();
        assert_eq!(
            reply,
            Reply::Bathed {
                hygiene: 30,
                activity: ActivityKind::Bathing,
                duration: 3600
            }
        );
        assert_eq!(h.component::<Hygiene>(pet).value(), 70);
        assert_eq!(h.component::<Energy>(pet).value(), 90);
        assert_eq!(h.component::<Think>(pet).as_str(), BATH_THOUGHT);
    }

    fn bathe(h: &mut Harness) -> Result<Reply, ActionError> {
        h.run(
            "ada",
            Request::Bathe {
                nickname: "Manny".into(),
                item: "Sponge".into(),
            },
        )
    }

    #[test]
    fn bathe_refuses_when_energy_equals_cost() {
        let (mut h, player, pet) = setup();
        h.buy("ada", "Sponge");
        h.world.insert_component(pet, Energy::new(h.config.bath_energy_cost)).unwrap();
        h.world.insert_component(pet, Hygiene::new(40)).unwrap();

        let err = bathe(&mut h).unwrap_err();
        assert!(matches!(err, ActionError::InsufficientEnergy { energy: 10, cost: 10, .. }));
        assert_eq!(h.component::<Energy>(pet).value(), 10);
        assert_eq!(h.component::<Hygiene>(pet).value(), 40);
        assert!(h.component::<Activity>(pet).is_idle());
        assert_eq!(h.component::<Player>(player).items.len(), 1);
    }

    #[test]
    fn bathe_accepts_one_point_above_cost() {
        let (mut h, player, pet) = setup();
        h.buy("ada", "Sponge");
        h.world.insert_component(pet, Energy::new(h.config.bath_energy_cost + 1)).unwrap();

        bathe(&mut h).unwrap();
        assert_eq!(h.component::<Energy>(pet).value(), 1);
        assert_eq!(h.component::<Activity>(pet).kind, ActivityKind::Bathing);
        assert!(h.component::<Player>(player).items.is_empty());
    }

    #[test]
    fn bathe_rejects_medicine() {
        let (mut h, _, _) = setup();
        h.buy("ada", "Pill");
        let err = h
            .run(
                "ada",
                Request::Bathe {
                    nickname: "Manny".into(),
                    item: "Pill".into(),
                },
            )
            .unwrap_err();
        assert!(matches!(err, ActionError::ItemNotUsable { .. }));
    }

    #[test]
    fn sleep_restores_energy_for_eight_hours() {
        let (mut h, _, pet) = setup();
        h.world.insert_component(pet, Energy::new(50)).unwrap();
        let reply = h
            .run(
                "ada",
                Request::Sleep {
                    nickname: "Manny".into(),
                },
            )
            .unwrap();
        assert_eq!(
            reply,
            Reply::Slept {
                energy: 50,
                activity: ActivityKind::Sleeping,
                duration: 28_800
            }
        );
        assert_eq!(h.component::<Activity>(pet).countdown, 28_800);
        assert_eq!(h.component::<Think>(pet).as_str(), SLEEP_THOUGHT);
    }
}
