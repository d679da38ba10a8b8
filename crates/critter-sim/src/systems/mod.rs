//! Periodic mechanics systems.
//!
//! A system reads the world through a shared reference and queues its
//! writes into a [`CommandBuffer`]; the tick driver applies the buffer as
//! soon as the system returns, so each system sees everything the systems
//! before it wrote. Systems gate themselves on their configured interval
//! via [`SystemContext::due`].

pub mod activity;
pub mod advisory;
pub mod decay;
pub mod leaderboard;

use critter_ecs::prelude::*;
use tracing::warn;

use crate::bootstrap::WorldHandles;
use crate::config::SimConfig;

/// Per-tick context handed to every system.
#[derive(Debug, Clone, Copy)]
pub struct SystemContext<'a> {
    pub tick: u64,
    pub config: &'a SimConfig,
    pub handles: &'a WorldHandles,
}

impl SystemContext<'_> {
    /// `true` on ticks that are a multiple of `interval`.
    pub fn due(&self, interval: u64) -> bool {
        interval != 0 && self.tick % interval == 0
    }
}

/// Signature shared by every mechanics system.
pub type SystemFn = fn(&SystemContext<'_>, &World, &mut CommandBuffer);

/// Issuer ids for commands queued by systems.
pub mod ids {
    use critter_ecs::command::SystemId;

    pub const LEADERBOARD: SystemId = SystemId(1);
    pub const ENERGY_DECLINE: SystemId = SystemId(10);
    pub const HYGIENE_DECLINE: SystemId = SystemId(11);
    pub const WELLNESS_DECLINE: SystemId = SystemId(12);
    pub const HEALTH_DECLINE: SystemId = SystemId(13);
    pub const ACTIVITY_COUNTDOWN: SystemId = SystemId(20);
    pub const ADVISORY: SystemId = SystemId(30);
}

/// Queue a write, logging and skipping the entity if the value cannot be
/// serialized.
pub(crate) fn queue<T: Component>(
    cmds: &mut CommandBuffer,
    entity: EntityId,
    value: &T,
    issued_by: SystemId,
    reason: CausalReason,
) {
    if let Err(e) = cmds.set(entity, value, issued_by, reason) {
        warn!(entity = ?entity, system_id = issued_by.0, error = %e, "skipping entity");
    }
}
