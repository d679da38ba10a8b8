//! Deferred world mutations with causality metadata.
//!
//! A [`CommandBuffer`] collects writes that a system or action wants to make
//! and applies them later, in insertion order. Each command records which
//! system issued it ([`SystemId`]) and why ([`CausalReason`]), which is what
//! the tick log prints when something fails.
//!
//! Component values travel as [`serde_json::Value`] and are converted back to
//! typed components by [`World::set_component_by_name`] on apply.
//!
//! ```
//! use critter_ecs::prelude::*;
//!
//! #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
//! struct Hunger(u32);
//! impl Component for Hunger { const NAME: &'static str = "hunger"; }
//!
//! let mut world = World::new();
//! world.register_component::<Hunger>();
//! let pet = world.spawn_with(Hunger(10)).unwrap();
//!
//! let mut cmds = CommandBuffer::new();
//! cmds.set(pet, &Hunger(4), SystemId(0), CausalReason::GameRule("fed".into()))
//!     .unwrap();
//! let report = cmds.apply(&mut world);
//! assert_eq!(report.success_count, 1);
//! assert_eq!(world.get_component::<Hunger>(pet).unwrap(), &Hunger(4));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::component::Component;
use crate::entity::EntityId;
use crate::world::World;
use crate::EcsError;

// ---------------------------------------------------------------------------
// SystemId
// ---------------------------------------------------------------------------

/// Identifies the system or action that issued a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SystemId(pub u32);

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "system#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// CausalReason
// ---------------------------------------------------------------------------

/// Why a command was issued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CausalReason {
    /// A request submitted on behalf of a player (payload: persona tag).
    PlayerInput(String),
    /// A game rule, e.g. `"energy_decline"`.
    GameRule(String),
    /// A state-machine transition.
    StateTransition { from: String, to: String },
    /// A countdown or periodic timer.
    Timer(String),
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CommandKind {
    SetComponent {
        component_name: String,
        value: serde_json::Value,
    },
    RemoveComponent {
        component_name: String,
    },
    Despawn,
}

impl CommandKind {
    fn component_name(&self) -> Option<&str> {
        match self {
            CommandKind::SetComponent { component_name, .. }
            | CommandKind::RemoveComponent { component_name } => Some(component_name),
            CommandKind::Despawn => None,
        }
    }
}

/// A single deferred mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub target: EntityId,
    pub kind: CommandKind,
    pub issued_by: SystemId,
    pub reason: CausalReason,
    /// Position within the buffer at the time it was queued.
    pub command_index: u32,
}

// ---------------------------------------------------------------------------
// ApplyReport
// ---------------------------------------------------------------------------

/// Outcome of one [`CommandBuffer::apply`] call.
///
/// `conflict_count` counts `(entity, component)` pairs written more than
/// once in the same batch; the last write wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub conflict_count: usize,
    pub failed_count: usize,
    pub success_count: usize,
}

impl ApplyReport {
    /// Fold another report into this one.
    pub fn absorb(&mut self, other: &ApplyReport) {
        self.conflict_count += other.conflict_count;
        self.failed_count += other.failed_count;
        self.success_count += other.success_count;
    }
}

// ---------------------------------------------------------------------------
// CommandBuffer
// ---------------------------------------------------------------------------

/// FIFO queue of [`Command`]s.
#[derive(Debug, Default)]
pub struct CommandBuffer {
    commands: Vec<Command>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a typed `SetComponent`.
    pub fn set<T: Component>(
        &mut self,
        target: EntityId,
        value: &T,
        issued_by: SystemId,
        reason: CausalReason,
    ) -> Result<(), EcsError> {
        let value = serde_json::to_value(value).map_err(|e| EcsError::ComponentSerialization {
            component: T::NAME.to_owned(),
            details: e.to_string(),
        })?;
        self.set_component(target, T::NAME, value, issued_by, reason);
        Ok(())
    }

    /// Queue a `SetComponent` with an already-serialized value.
    pub fn set_component(
        &mut self,
        target: EntityId,
        component_name: &str,
        value: serde_json::Value,
        issued_by: SystemId,
        reason: CausalReason,
    ) {
        self.push(
            target,
            CommandKind::SetComponent {
                component_name: component_name.to_owned(),
                value,
            },
            issued_by,
            reason,
        );
    }

    pub fn remove<T: Component>(&mut self, target: EntityId, issued_by: SystemId, reason: CausalReason) {
        self.push(
            target,
            CommandKind::RemoveComponent {
                component_name: T::NAME.to_owned(),
            },
            issued_by,
            reason,
        );
    }

    pub fn despawn(&mut self, target: EntityId, issued_by: SystemId, reason: CausalReason) {
        self.push(target, CommandKind::Despawn, issued_by, reason);
    }

    fn push(&mut self, target: EntityId, kind: CommandKind, issued_by: SystemId, reason: CausalReason) {
        let command_index = self.commands.len() as u32;
        self.commands.push(Command {
            target,
            kind,
            issued_by,
            reason,
            command_index,
        });
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drop everything queued without touching the world.
    pub fn discard(&mut self) -> usize {
        let dropped = self.commands.len();
        self.commands.clear();
        dropped
    }

    /// Apply every queued command in insertion order and empty the buffer.
    ///
    /// A command whose target is stale, or whose payload does not
    /// deserialize, is logged and skipped; the rest still apply.
    pub fn apply(&mut self, world: &mut World) -> ApplyReport {
        let commands = std::mem::take(&mut self.commands);

        let mut writes: BTreeMap<(EntityId, &str), Vec<u32>> = BTreeMap::new();
        for cmd in &commands {
            if let Some(name) = cmd.kind.component_name() {
                writes
                    .entry((cmd.target, name))
                    .or_default()
                    .push(cmd.command_index);
            }
        }
        let mut report = ApplyReport::default();
        for ((entity, component), indices) in &writes {
            if indices.len() > 1 {
                report.conflict_count += 1;
                debug!(
                    entity = ?entity,
                    component = %component,
                    command_indices = ?indices,
                    "{} writes to the same component in one batch (last-write-wins)",
                    indices.len()
                );
            }
        }

        for cmd in &commands {
            let result = match &cmd.kind {
                CommandKind::SetComponent {
                    component_name,
                    value,
                } => world.set_component_by_name(cmd.target, component_name, value),
                CommandKind::RemoveComponent { component_name } => {
                    world.remove_component_by_name(cmd.target, component_name)
                }
                CommandKind::Despawn => world.despawn(cmd.target),
            };
            match result {
                Ok(()) => report.success_count += 1,
                Err(e) => {
                    report.failed_count += 1;
                    warn!(
                        command_index = cmd.command_index,
                        target = ?cmd.target,
                        system_id = cmd.issued_by.0,
                        reason = ?cmd.reason,
                        error = %e,
                        "command application failed"
                    );
                }
            }
        }

        report
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Hunger(u32);
    impl Component for Hunger {
        const NAME: &'static str = "hunger";
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Mood(String);
    impl Component for Mood {
        const NAME: &'static str = "mood";
    }

    fn setup_world() -> World {
        let mut world = World::new();
        world.register_component::<Hunger>();
        world.register_component::<Mood>();
        world
    }

    fn rule(name: &str) -> CausalReason {
        CausalReason::GameRule(name.to_owned())
    }

    #[test]
    fn commands_apply_in_fifo_order() {
        let mut world = setup_world();
        let e = world.spawn_with(Hunger(0)).unwrap();
        let mut cmds = CommandBuffer::new();
        for v in [1, 2, 3] {
            cmds.set(e, &Hunger(v), SystemId(1), rule("tick")).unwrap();
        }
        let report = cmds.apply(&mut world);
        assert_eq!(world.get_component::<Hunger>(e).unwrap(), &Hunger(3));
        assert_eq!(report.success_count, 3);
        assert_eq!(report.conflict_count, 1);
        assert!(cmds.is_empty());
    }

    #[test]
    fn command_indices_follow_insertion() {
        let mut world = setup_world();
        let e = world.spawn_empty();
        let mut cmds = CommandBuffer::new();
        cmds.set(e, &Hunger(1), SystemId(0), rule("a")).unwrap();
        cmds.remove::<Mood>(e, SystemId(0), rule("b"));
        cmds.despawn(e, SystemId(0), rule("c"));
        let indices: Vec<_> = cmds.commands().iter().map(|c| c.command_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn stale_target_is_skipped_and_counted() {
        let mut world = setup_world();
        let gone = world.spawn_with(Hunger(1)).unwrap();
        let kept = world.spawn_with(Hunger(1)).unwrap();
        world.despawn(gone).unwrap();

        let mut cmds = CommandBuffer::new();
        cmds.set(gone, &Hunger(9), SystemId(2), rule("x")).unwrap();
        cmds.set(kept, &Hunger(9), SystemId(2), rule("x")).unwrap();
        let report = cmds.apply(&mut world);

        assert_eq!(report.failed_count, 1);
        assert_eq!(report.success_count, 1);
        assert_eq!(world.get_component::<Hunger>(kept).unwrap(), &Hunger(9));
    }

    #[test]
    fn discard_leaves_world_untouched() {
        let mut world = setup_world();
        let e = world.spawn_with(Hunger(5)).unwrap();
        let mut cmds = CommandBuffer::new();
        cmds.set(e, &Hunger(0), SystemId(0), rule("x")).unwrap();
        cmds.despawn(e, SystemId(0), rule("x"));
        assert_eq!(cmds.discard(), 2);
        assert_eq!(cmds.apply(&mut world), ApplyReport::default());
        assert_eq!(world.get_component::<Hunger>(e).unwrap(), &Hunger(5));
    }

    #[test]
    fn remove_and_despawn_apply() {
        let mut world = setup_world();
        let a = world.spawn_with(Mood("ok".into())).unwrap();
        let b = world.spawn_with(Hunger(1)).unwrap();
        let mut cmds = CommandBuffer::new();
        cmds.remove::<Mood>(a, SystemId(0), rule("x"));
        cmds.despawn(b, SystemId(0), rule("x"));
        let report = cmds.apply(&mut world);
        assert_eq!(report.success_count, 2);
        assert!(!world.has_component::<Mood>(a));
        assert!(!world.is_alive(b));
    }

    #[test]
    fn report_absorb_sums_fields() {
        let mut total = ApplyReport::default();
        total.absorb(&ApplyReport {
            conflict_count: 1,
            failed_count: 2,
            success_count: 3,
        });
        total.absorb(&ApplyReport {
            conflict_count: 0,
            failed_count: 1,
            success_count: 1,
        });
        assert_eq!(
            total,
            ApplyReport {
                conflict_count: 1,
                failed_count: 3,
                success_count: 4
            }
        );
    }

    #[test]
    fn causal_reasons_survive_json() {
        let reasons = [
            CausalReason::PlayerInput("ada".into()),
            CausalReason::GameRule("energy_decline".into()),
            CausalReason::StateTransition {
                from: "sleeping".into(),
                to: "none".into(),
            },
            CausalReason::Timer("playing".into()),
        ];
        for reason in reasons {
            let json = serde_json::to_string(&reason).unwrap();
            assert_eq!(serde_json::from_str::<CausalReason>(&json).unwrap(), reason);
        }
    }
}
