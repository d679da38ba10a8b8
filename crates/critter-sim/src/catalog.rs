//! The fixed shop catalog stocked at world start.
//!
//! Rows are listed in stocking order; that order is also the order of each
//! store's item list.

use crate::components::{ItemKind, StoreKind};

/// Which stat an item restores, and by how much.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Health(u32),
    Hygiene(u32),
    Wellness(u32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub kind: ItemKind,
    pub price: f64,
    pub effect: Effect,
    pub description: &'static str,
}

const fn entry(
    name: &'static str,
    kind: ItemKind,
    price: f64,
    effect: Effect,
    description: &'static str,
) -> CatalogEntry {
    CatalogEntry {
        name,
        kind,
        price,
        effect,
        description,
    }
}

pub const FOOD: &[CatalogEntry] = &[
    entry("Apple", ItemKind::Food, 0.1, Effect::Health(10), "Yummy red food"),
    entry("Banana", ItemKind::Food, 0.3, Effect::Health(5), "What is this yellow food?"),
    entry("Soup", ItemKind::Food, 0.5, Effect::Health(15), "Spicy!!!"),
    entry("Carrots", ItemKind::Food, 0.1, Effect::Health(5), "Cheap, but powerful"),
];

pub const DRUGS: &[CatalogEntry] = &[
    entry("Vaccine", ItemKind::Care, 5.0, Effect::Health(80), "A vaccine to boost your health!"),
    entry("Pill", ItemKind::Care, 1.0, Effect::Health(20), "A small pill to help you recover."),
    entry("Vitamin", ItemKind::Care, 0.5, Effect::Health(15), "Essential vitamins for daily health."),
    entry("Mineral", ItemKind::Care, 0.1, Effect::Health(10), "Important minerals to keep you strong."),
    entry("Sponge", ItemKind::Care, 0.1, Effect::Hygiene(30), "Basic clean up item."),
];

pub const TOYS: &[CatalogEntry] = &[
    entry("Ball", ItemKind::Toy, 5.0, Effect::Wellness(15), "Yuuju!"),
    entry("Frisbee", ItemKind::Toy, 1.0, Effect::Wellness(10), "Will it come back?"),
    entry("Rope", ItemKind::Toy, 0.5, Effect::Wellness(10), "Grrrr"),
    entry("Stick", ItemKind::Toy, 0.1, Effect::Wellness(5), "Throw it! Throw it!"),
];

/// Catalog rows stocked by `store`.
pub fn stock(store: StoreKind) -> &'static [CatalogEntry] {
    match store {
        StoreKind::Food => FOOD,
        StoreKind::Drug => DRUGS,
        StoreKind::Toy => TOYS,
    }
}
