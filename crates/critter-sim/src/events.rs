//! Notifications emitted by successful spawn actions.

use std::fmt;

use critter_ecs::entity::EntityId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    NewPet,
    NewPlayer,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::NewPet => f.write_str("new_pet"),
            EventKind::NewPlayer => f.write_str("new_player"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    pub tick: u64,
    pub kind: EventKind,
    pub entity: EntityId,
    /// Nickname for `new_pet`, persona tag for `new_player`.
    pub label: String,
}

/// Events accumulated since the last drain, in emission order.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, tick: u64, kind: EventKind, entity: EntityId, label: &str) {
        self.events.push(GameEvent {
            tick,
            kind,
            entity,
            label: label.to_owned(),
        });
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
