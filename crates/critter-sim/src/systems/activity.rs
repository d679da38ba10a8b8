//! Activity countdown.
//!
//! Every `activity_interval` ticks each busy pet's countdown drops by one.
//! When it reaches zero the pet returns to idle and its thought resets.
//! Each step that leaves the pet still busy pays its owner `pet_earn_money`.

use std::collections::BTreeMap;

use critter_ecs::prelude::*;
use tracing::{debug, warn};

use super::{ids, queue, SystemContext};
use crate::components::{Activity, ActivityKind, Pet, Player, Progress, Think};

pub fn activity_countdown(ctx: &SystemContext<'_>, world: &World, cmds: &mut CommandBuffer) {
    if !ctx.due(ctx.config.activity_interval) {
        return;
    }

    let mut earnings: BTreeMap<&str, f64> = BTreeMap::new();
    for (pet_id, (pet, activity)) in world.query::<(&Pet, &Activity)>() {
        let mut next = activity.clone();
        match next.step() {
            Progress::Idle => continue,
            Progress::Running => {
                queue(cmds, pet_id, &next, ids::ACTIVITY_COUNTDOWN, timer(activity.kind));
                *earnings.entry(pet.owner.as_str()).or_default() += ctx.config.pet_earn_money;
            }
            Progress::Finished => {
                debug!(pet = %pet.nickname, activity = %activity.kind, "activity finished");
                queue(
                    cmds,
                    pet_id,
                    &next,
                    ids::ACTIVITY_COUNTDOWN,
                    CausalReason::StateTransition {
                        from: activity.kind.to_string(),
                        to: next.kind.to_string(),
                    },
                );
                queue(cmds, pet_id, &Think::default(), ids::ACTIVITY_COUNTDOWN, timer(activity.kind));
            }
        }
    }

    if earnings.is_empty() || ctx.config.pet_earn_money == 0.0 {
        return;
    }
    for (player_id, (player,)) in world.query::<(&Player,)>() {
        let Some(earned) = earnings.remove(player.persona_tag.as_str()) else {
            continue;
        };
        let mut paid = player.clone();
        paid.money += earned;
        queue(
            cmds,
            player_id,
            &paid,
            ids::ACTIVITY_COUNTDOWN,
            CausalReason::GameRule("pet_income".to_owned()),
        );
    }
    for owner in earnings.keys() {
        warn!(owner = %owner, "busy pet has no owning player, income dropped");
    }
}

fn timer(kind: ActivityKind) -> CausalReason {
    CausalReason::Timer(kind.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::{init_world, WorldHandles};
    use crate::components::Gender;
    use crate::config::SimConfig;

    struct Fixture {
        world: World,
        handles: WorldHandles,
        config: SimConfig,
        pet: EntityId,
        player: EntityId,
    }

    fn fixture(activity: Activity) -> Fixture {
        let config = SimConfig::default();
        let (mut world, handles) = init_world(&config).unwrap();
        let pet = world
            .spawn_bundle(
                ComponentBundle::new()
                    .with(Pet::newborn("ada", "Rex", Gender::Female, 0))
                    .with(activity)
                    .with(Think::new("Love to play!")),
            )
            .unwrap();
        let mut owner = Player::new("ada", 10.0);
        owner.adopt(pet, "Rex");
        let player = world.spawn_with(owner).unwrap();
        Fixture {
            world,
            handles,
            config,
            pet,
            player,
        }
    }

    fn step(f: &mut Fixture, tick: u64) {
        let ctx = SystemContext {
            tick,
            config: &f.config,
            handles: &f.handles,
        };
        let mut cmds = CommandBuffer::new();
        activity_countdown(&ctx, &f.world, &mut cmds);
        cmds.apply(&mut f.world);
    }

    #[test]
    fn busy_pet_counts_down_and_pays_owner() {
        let mut f = fixture(Activity::begin(ActivityKind::Playing, 10));
        step(&mut f, 1);
        let activity = f.world.get_component::<Activity>(f.pet).unwrap();
        assert_eq!((activity.countdown, activity.percentage), (9, 90));
        let money = f.world.get_component::<Player>(f.player).unwrap().money;
        assert!((money - 10.0001).abs() < 1e-9);
    }

    #[test]
    fn finishing_resets_activity_and_thought() {
        let mut f = fixture(Activity::begin(ActivityKind::Sleeping, 1));
        step(&mut f, 1);
        assert_eq!(f.world.get_component::<Activity>(f.pet).unwrap(), &Activity::idle());
        assert_eq!(f.world.get_component::<Think>(f.pet).unwrap(), &Think::default());
        assert_eq!(f.world.get_component::<Player>(f.player).unwrap().money, 10.0);
    }

    #[test]
    fn finishing_step_is_unpaid() {
        let mut f = fixture(Activity::begin(ActivityKind::Sleeping, 3));
        f.config.pet_earn_money = 1.0;
        for tick in 1..=5 {
            step(&mut f, tick);
        }
        assert!(f.world.get_component::<Activity>(f.pet).unwrap().is_idle());
        assert_eq!(f.world.get_component::<Player>(f.player).unwrap().money, 12.0);
    }

    #[test]
    fn idle_pet_is_untouched_and_earns_nothing() {
        let mut f = fixture(Activity::idle());
        step(&mut f, 1);
        assert_eq!(f.world.get_component::<Think>(f.pet).unwrap().as_str(), "Love to play!");
        assert_eq!(f.world.get_component::<Player>(f.player).unwrap().money, 10.0);
    }
}
