//! The action pipeline.
//!
//! An action turns one inbound [`Request`] into either a [`Reply`] and a set
//! of world writes, or an [`ActionError`] and no writes at all. Handlers
//! read the world through a shared reference, run every check first, and
//! queue their writes into the context's [`CommandBuffer`]. [`execute`]
//! applies that buffer only when the handler succeeds. Spawns go straight
//! to the world but only after every check has passed.
//!
//! Actions run one at a time, in the order the tick driver hands them over,
//! so a write made by one action is visible to the next. That is what makes
//! the per-pet busy flag a race-free test-and-set.

mod breed;
mod care;
pub mod error;
mod lookup;
mod shop;
mod spawn;
#[cfg(test)]
mod test_support;

use std::fmt;

use critter_ecs::prelude::*;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use error::{ActionError, ErrorCategory};
pub use lookup::{validate_nickname, validate_persona_tag};

use crate::bootstrap::WorldHandles;
use crate::components::ActivityKind;
use crate::config::SimConfig;
use crate::events::EventLog;

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// An inbound player request. The submitting persona travels alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Request {
    CreatePlayer,
    CreatePet { nickname: String },
    Play { nickname: String, item: String },
    Feed { nickname: String, item: String },
    Cure { nickname: String, item: String },
    Bathe { nickname: String, item: String },
    Sleep { nickname: String },
    Breed { mother: String, father: String, child: String },
    BuyItem { item: String },
}

impl Request {
    pub fn kind(&self) -> ActionKind {
        match self {
            Request::CreatePlayer => ActionKind::CreatePlayer,
            Request::CreatePet { .. } => ActionKind::CreatePet,
            Request::Play { .. } => ActionKind::Play,
            Request::Feed { .. } => ActionKind::Feed,
            Request::Cure { .. } => ActionKind::Cure,
            Request::Bathe { .. } => ActionKind::Bathe,
            Request::Sleep { .. } => ActionKind::Sleep,
            Request::Breed { .. } => ActionKind::Breed,
            Request::BuyItem { .. } => ActionKind::BuyItem,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    CreatePet,
    CreatePlayer,
    Play,
    Cure,
    Bathe,
    Sleep,
    Feed,
    Breed,
    BuyItem,
}

impl ActionKind {
    /// Processing order within a tick. Spawn actions come first.
    pub const ORDER: [ActionKind; 9] = [
        ActionKind::CreatePet,
        ActionKind::CreatePlayer,
        ActionKind::Play,
        ActionKind::Cure,
        ActionKind::Bathe,
        ActionKind::Sleep,
        ActionKind::Feed,
        ActionKind::Breed,
        ActionKind::BuyItem,
    ];

    /// Issuer id stamped on the commands this action queues.
    pub fn system_id(self) -> SystemId {
        let rank = Self::ORDER.iter().position(|k| *k == self).unwrap_or(0);
        SystemId(100 + rank as u32)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ActionKind::CreatePet => "create_pet",
            ActionKind::CreatePlayer => "create_player",
            ActionKind::Play => "play",
            ActionKind::Cure => "cure",
            ActionKind::Bathe => "bathe",
            ActionKind::Sleep => "sleep",
            ActionKind::Feed => "feed",
            ActionKind::Breed => "breed",
            ActionKind::BuyItem => "buy_item",
        };
        f.write_str(label)
    }
}

// ---------------------------------------------------------------------------
// Replies
// ---------------------------------------------------------------------------

/// Result of a successful action. Stat fields are the deltas actually
/// applied after clamping, so they may be smaller than the nominal amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reply", rename_all = "snake_case")]
pub enum Reply {
    PlayerCreated {
        entity: EntityId,
    },
    PetCreated {
        entity: EntityId,
    },
    Played {
        energy: i32,
        hygiene: i32,
        wellness: i32,
        xp: u64,
        activity: ActivityKind,
        duration: u32,
    },
    Fed {
        health: i32,
        activity: ActivityKind,
        duration: u32,
    },
    Cured {
        health: i32,
    },
    Bathed {
        hygiene: i32,
        activity: ActivityKind,
        duration: u32,
    },
    Slept {
        energy: i32,
        activity: ActivityKind,
        duration: u32,
    },
    Bred {
        entity: EntityId,
    },
    Bought {
        entity: EntityId,
    },
}

// ---------------------------------------------------------------------------
// ActionContext
// ---------------------------------------------------------------------------

/// Everything an action handler may touch.
pub struct ActionContext<'a> {
    pub world: &'a mut World,
    pub tick: u64,
    pub config: &'a SimConfig,
    pub handles: &'a WorldHandles,
    pub rng: &'a mut Pcg64,
    pub events: &'a mut EventLog,
    pub cmds: CommandBuffer,
}

impl<'a> ActionContext<'a> {
    pub fn new(
        world: &'a mut World,
        tick: u64,
        config: &'a SimConfig,
        handles: &'a WorldHandles,
        rng: &'a mut Pcg64,
        events: &'a mut EventLog,
    ) -> Self {
        Self {
            world,
            tick,
            config,
            handles,
            rng,
            events,
            cmds: CommandBuffer::new(),
        }
    }
}

/// Run one request to completion on behalf of `persona_tag`.
pub fn execute(ctx: &mut ActionContext<'_>, persona_tag: &str, request: &Request) -> Result<Reply, ActionError> {
    let result = match request {
        Request::CreatePlayer => spawn::create_player(ctx, persona_tag),
        Request::CreatePet { nickname } => spawn::create_pet(ctx, persona_tag, nickname),
        Request::Play { nickname, item } => care::play(ctx, persona_tag, nickname, item),
        Request::Feed { nickname, item } => care::feed(ctx, persona_tag, nickname, item),
        Request::Cure { nickname, item } => care::cure(ctx, persona_tag, nickname, item),
        Request::Bathe { nickname, item } => care::bathe(ctx, persona_tag, nickname, item),
        Request::Sleep { nickname } => care::sleep(ctx, persona_tag, nickname),
        Request::Breed { mother, father, child } => breed::breed(ctx, persona_tag, mother, father, child),
        Request::BuyItem { item } => shop::buy_item(ctx, persona_tag, item),
    };

    match &result {
        Ok(_) => {
            let report = ctx.cmds.apply(ctx.world);
            if report.failed_count > 0 {
                warn!(
                    persona = %persona_tag,
                    action = %request.kind(),
                    failed = report.failed_count,
                    "action writes partially failed to apply"
                );
            }
        }
        Err(e) => {
            let dropped = ctx.cmds.discard();
            debug!(
                persona = %persona_tag,
                action = %request.kind(),
                error = %e,
                dropped,
                "action rejected"
            );
        }
    }
    result
}

/// Signed change between two stat readings.
fn delta(before: u32, after: u32) -> i32 {
    after as i32 - before as i32
}
