//! Bounded top-K board of pet snapshots.
//!
//! Invariants after every [`Leaderboard::offer`]:
//! - at most `capacity` entries,
//! - sorted descending by level,
//! - no two entries share a nickname.
//!
//! Entries are value snapshots taken when the pet was admitted. A listed pet
//! is never refreshed in place; its entry only changes when it is evicted.

use critter_ecs::component::Component;
use serde::{Deserialize, Serialize};

use super::pet::Pet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub capacity: usize,
    pub entries: Vec<Pet>,
}

impl Component for Leaderboard {
    const NAME: &'static str = "leaderboard";
}

/// What happened to a candidate offered to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Room was left; appended without comparison.
    Appended,
    /// Outranked the lowest entry and was merged in.
    Ranked,
    /// A pet with that nickname is already listed.
    AlreadyListed,
    /// Level not above the current lowest entry.
    BelowCutoff,
}

impl Placement {
    pub fn admitted(self) -> bool {
        matches!(self, Placement::Appended | Placement::Ranked)
    }
}

impl Leaderboard {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn contains(&self, nickname: &str) -> bool {
        self.entries.iter().any(|entry| entry.nickname == nickname)
    }

    /// Offer `candidate` for a place on the board.
    pub fn offer(&mut self, candidate: &Pet) -> Placement {
        if self.contains(&candidate.nickname) {
            return Placement::AlreadyListed;
        }
        if self.entries.len() < self.capacity {
            self.entries.push(candidate.clone());
            self.sort();
            return Placement::Appended;
        }
        match self.entries.last() {
            Some(lowest) if candidate.level > lowest.level => {
                self.entries.push(candidate.clone());
                self.sort();
                self.entries.truncate(self.capacity);
                Placement::Ranked
            }
            _ => Placement::BelowCutoff,
        }
    }

    // Stable, so equal levels keep admission order.
    fn sort(&mut self) {
        self.entries.sort_by(|a, b| b.level.cmp(&a.level));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::pet::Gender;

    fn pet(nickname: &str, level: u32) -> Pet {
        let mut p = Pet::newborn("ada", nickname, Gender::Female, 0);
        p.level = level;
        p
    }

    #[test]
    fn fills_up_then_compares() {
        let mut board = Leaderboard::new(2);
        assert_eq!(board.offer(&pet("A", 1)), Placement::Appended);
        assert_eq!(board.offer(&pet("B", 3)), Placement::Appended);
        assert_eq!(board.entries[0].nickname, "B");
        assert_eq!(board.offer(&pet("C", 1)), Placement::BelowCutoff);
        assert_eq!(board.offer(&pet("D", 2)), Placement::Ranked);
        let names: Vec<_> = board.entries.iter().map(|p| p.nickname.as_str()).collect();
        assert_eq!(names, vec!["B", "D"]);
    }

    #[test]
    fn duplicates_are_rejected_even_with_room() {
        let mut board = Leaderboard::new(3);
        board.offer(&pet("A", 1));
        assert_eq!(board.offer(&pet("A", 9)), Placement::AlreadyListed);
        assert_eq!(board.entries.len(), 1);
        assert_eq!(board.entries[0].level, 1);
    }

    #[test]
    fn equal_level_does_not_evict() {
        let mut board = Leaderboard::new(1);
        board.offer(&pet("A", 4));
        assert_eq!(board.offer(&pet("B", 4)), Placement::BelowCutoff);
        assert!(!Placement::BelowCutoff.admitted());
    }
}
