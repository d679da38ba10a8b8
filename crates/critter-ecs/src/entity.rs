//! Entity handles and slot allocation.
//!
//! An [`EntityId`] packs a *generation* into the high 32 bits and a slot
//! *index* into the low 32 bits. Recycling a slot bumps its generation, so a
//! handle that outlived its entity never resolves to the slot's next tenant.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

// ---------------------------------------------------------------------------
// EntityId
// ---------------------------------------------------------------------------

/// A generational entity handle.
///
/// Layout: `[generation: u32 | index: u32]`
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u64);

impl EntityId {
    #[inline]
    pub fn new(index: u32, generation: u32) -> Self {
        Self((generation as u64) << 32 | index as u64)
    }

    /// Slot index (low 32 bits).
    #[inline]
    pub fn index(self) -> u32 {
        self.0 as u32
    }

    /// Generation (high 32 bits).
    #[inline]
    pub fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

    #[inline]
    pub fn to_raw(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({}v{})", self.index(), self.generation())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index(), self.generation())
    }
}

// ---------------------------------------------------------------------------
// EntityAllocator
// ---------------------------------------------------------------------------

/// Hands out [`EntityId`]s and tracks which slots are live.
///
/// Freed slots are reused in FIFO order so a single hot slot does not burn
/// through its generations.
#[derive(Debug, Default)]
pub struct EntityAllocator {
    generations: Vec<u32>,
    alive: Vec<bool>,
    free_indices: VecDeque<u32>,
    live: usize,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a handle, recycling the oldest freed slot when one exists.
    pub fn allocate(&mut self) -> EntityId {
        self.live += 1;
        match self.free_indices.pop_front() {
            Some(index) => {
                self.alive[index as usize] = true;
                EntityId::new(index, self.generations[index as usize])
            }
            None => {
                let index = self.generations.len() as u32;
                self.generations.push(0);
                self.alive.push(true);
                EntityId::new(index, 0)
            }
        }
    }

    /// Free the slot behind `id` and bump its generation.
    ///
    /// Returns `false` when `id` is already dead or stale.
    pub fn deallocate(&mut self, id: EntityId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        let idx = id.index() as usize;
        self.alive[idx] = false;
        self.generations[idx] = self.generations[idx].wrapping_add(1);
        self.free_indices.push_back(id.index());
        self.live -= 1;
        true
    }

    /// `true` when the slot is live and its generation matches `id`.
    pub fn is_alive(&self, id: EntityId) -> bool {
        let idx = id.index() as usize;
        idx < self.generations.len() && self.alive[idx] && self.generations[idx] == id.generation()
    }

    pub fn alive_count(&self) -> usize {
        self.live
    }

    /// Number of slots ever handed out (live or free).
    pub fn slot_count(&self) -> u32 {
        self.generations.len() as u32
    }

    /// Current handle for slot `index`, if that slot is live.
    pub fn live_at(&self, index: u32) -> Option<EntityId> {
        let idx = index as usize;
        if idx < self.alive.len() && self.alive[idx] {
            Some(EntityId::new(index, self.generations[idx]))
        } else {
            None
        }
    }

    /// Live handles in ascending slot order.
    pub fn iter_alive(&self) -> impl Iterator<Item = EntityId> + '_ {
        (0..self.slot_count()).filter_map(move |index| self.live_at(index))
    }

    /// `(generations, alive, free_indices)` for snapshot capture.
    pub fn snapshot_state(&self) -> (Vec<u32>, Vec<bool>, Vec<u32>) {
        (
            self.generations.clone(),
            self.alive.clone(),
            self.free_indices.iter().copied().collect(),
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
