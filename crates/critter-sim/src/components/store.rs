use std::fmt;

use critter_ecs::component::Component;
use critter_ecs::entity::EntityId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoreKind {
    Food,
    Drug,
    Toy,
}

impl StoreKind {
    /// Search order used when an item is bought by name.
    pub const ALL: [StoreKind; 3] = [StoreKind::Food, StoreKind::Drug, StoreKind::Toy];
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::Food => f.write_str("food store"),
            StoreKind::Drug => f.write_str("drug store"),
            StoreKind::Toy => f.write_str("toy store"),
        }
    }
}

/// A shop singleton. Its items are shared catalog entries, never consumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub kind: StoreKind,
    pub items: Vec<EntityId>,
}

impl Component for Store {
    const NAME: &'static str = "store";
}
