//! Serializable captures of world state.
//!
//! A [`WorldSnapshot`] lists allocator state and every live entity's
//! components as JSON, keyed by component name in sorted order. Two worlds
//! with the same history produce byte-identical snapshots, which is what the
//! determinism checks hash.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entity::EntityId;
use crate::world::World;
use crate::EcsError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocatorSnapshot {
    pub generations: Vec<u32>,
    pub alive: Vec<bool>,
    /// Free slots in reuse (FIFO) order.
    pub free_indices: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub entity_id: EntityId,
    pub components: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub allocator: AllocatorSnapshot,
    pub component_names: Vec<String>,
    /// Live entities in slot order.
    pub entities: Vec<EntitySnapshot>,
}

impl WorldSnapshot {
    pub fn entity(&self, id: EntityId) -> Option<&EntitySnapshot> {
        self.entities.iter().find(|e| e.entity_id == id)
    }
}

impl World {
    /// Capture the full world state.
    pub fn capture_snapshot(&self) -> Result<WorldSnapshot, EcsError> {
        let (generations, alive, free_indices) = self.allocator().snapshot_state();
        let component_names: Vec<String> =
            self.registry().names().map(str::to_owned).collect();

        let mut entities = Vec::with_capacity(self.entity_count());
        for entity_id in self.entities() {
            let mut components = BTreeMap::new();
            for name in &component_names {
                if let Some(value) = self.component_json(entity_id, name)? {
                    components.insert(name.clone(), value);
                }
            }
            entities.push(EntitySnapshot {
                entity_id,
                components,
            });
        }

        Ok(WorldSnapshot {
            allocator: AllocatorSnapshot {
                generations,
                alive,
                free_indices,
            },
            component_names,
            entities,
        })
    }
}
