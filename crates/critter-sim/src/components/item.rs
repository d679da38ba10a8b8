//! Consumable items.
//!
//! An item entity carries an [`Item`] plus one or more effect components
//! reused from [`vitals`](super::vitals): the effect's value is the amount
//! granted to the pet that consumes it.

use std::fmt;

use critter_ecs::component::Component;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Food,
    Care,
    Toy,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Food => f.write_str("Food"),
            ItemKind::Care => f.write_str("Care"),
            ItemKind::Toy => f.write_str("Toy"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub kind: ItemKind,
    pub price: f64,
    pub description: String,
}

impl Component for Item {
    const NAME: &'static str = "item";
}
