//! Leaderboard maintenance: every `leaderboard_interval` ticks, offer every
//! pet to the board in entity order.

use critter_ecs::prelude::*;
use tracing::{debug, warn};

use super::{ids, queue, SystemContext};
use crate::components::{Leaderboard, Pet};

pub fn rebuild_leaderboard(ctx: &SystemContext<'_>, world: &World, cmds: &mut CommandBuffer) {
    if !ctx.due(ctx.config.leaderboard_interval) {
        return;
    }
    let board_id = ctx.handles.leaderboard;
    let mut board = match world.get_component::<Leaderboard>(board_id) {
        Ok(board) => board.clone(),
        Err(e) => {
            warn!(entity = ?board_id, error = %e, "leaderboard unavailable");
            return;
        }
    };

    let mut changed = false;
    for (_, (pet,)) in world.query::<(&Pet,)>() {
        let placement = board.offer(pet);
        if placement.admitted() {
            debug!(pet = %pet.nickname, level = pet.level, ?placement, "leaderboard entry");
            changed = true;
        }
    }

    if changed {
        queue(
            cmds,
            board_id,
            &board,
            ids::LEADERBOARD,
            CausalReason::Timer("leaderboard_maintenance".to_owned()),
        );
    }
}
