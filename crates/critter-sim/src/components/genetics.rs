//! Inherited traits: DNA for every pet, plus magic and skill lines for bred
//! pets.

use critter_ecs::component::Component;
use serde::{Deserialize, Serialize};

use super::pet::level_threshold;

/// Four base values, each drawn from `0..100` at birth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dna {
    pub a: u8,
    pub c: u8,
    pub g: u8,
    pub t: u8,
}

impl Component for Dna {
    const NAME: &'static str = "dna";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Wynd,
    Water,
    Fire,
    Earth,
}

impl Element {
    pub const ALL: [Element; 4] = [Element::Wynd, Element::Water, Element::Fire, Element::Earth];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillKind {
    Intellect,
    Force,
    Skilled,
}

impl SkillKind {
    pub const ALL: [SkillKind; 3] = [SkillKind::Intellect, SkillKind::Force, SkillKind::Skilled];
}

/// Progress along one trait line. Uses the same curve as pet levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    pub level: u32,
    pub xp: u64,
    pub next_level_xp: u64,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            level: 0,
            xp: 0,
            next_level_xp: level_threshold(0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Magic {
    pub element: Element,
    pub progress: Progression,
}

impl Component for Magic {
    const NAME: &'static str = "magic";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub kind: SkillKind,
    pub progress: Progression,
}

impl Component for Skill {
    const NAME: &'static str = "skill";
}
