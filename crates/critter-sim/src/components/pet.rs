//! Pet identity and progression.

use std::fmt;

use critter_ecs::component::Component;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Female,
    Male,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Female => f.write_str("female"),
            Gender::Male => f.write_str("male"),
        }
    }
}

const BASE_LEVEL_XP: f64 = 100.0;
const LEVEL_GROWTH: f64 = 1.1;

/// XP needed to leave `level`: `floor((level + 1)^1.1) * 100`.
pub fn level_threshold(level: u32) -> u64 {
    let factor = (f64::from(level) + 1.0).powf(LEVEL_GROWTH).floor();
    (factor * BASE_LEVEL_XP) as u64
}

/// A pet's identity and experience.
///
/// `owner` is the persona tag of the player that created or bred the pet.
/// It is informational; ownership checks go through the player's pet list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub owner: String,
    pub nickname: String,
    pub gender: Gender,
    pub level: u32,
    pub xp: u64,
    pub next_level_xp: u64,
    pub born_tick: u64,
}

impl Component for Pet {
    const NAME: &'static str = "pet";
}

impl Pet {
    /// A level-0 pet with no experience.
    pub fn newborn(owner: &str, nickname: &str, gender: Gender, born_tick: u64) -> Self {
        Self {
            owner: owner.to_owned(),
            nickname: nickname.to_owned(),
            gender,
            level: 0,
            xp: 0,
            next_level_xp: level_threshold(0),
            born_tick,
        }
    }

    /// Add experience, levelling up as many times as the total allows but
    /// never past `max_level`.
    ///
    /// Returns the number of levels gained. A pet at `max_level` holds no
    /// experience; any surplus is dropped. The outcome depends only on the
    /// total granted, so `add_xp(a, m); add_xp(b, m)` equals `add_xp(a + b, m)`.
    pub fn add_xp(&mut self, amount: u64, max_level: u32) -> u32 {
        if self.level >= max_level {
            self.xp = 0;
            return 0;
        }
        self.xp = self.xp.saturating_add(amount);
        let mut gained = 0;
        while self.xp >= self.next_level_xp {
            self.xp -= self.next_level_xp;
            self.level += 1;
            self.next_level_xp = level_threshold(self.level);
            gained += 1;
            if self.level >= max_level {
                self.xp = 0;
                break;
            }
        }
        gained
    }

    pub fn at_max_level(&self, max_level: u32) -> bool {
        self.level >= max_level
    }
}
