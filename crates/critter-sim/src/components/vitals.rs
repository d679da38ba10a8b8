//! The four bounded pet stats.
//!
//! Health, Energy, Hygiene and Wellness are each a single value in
//! `0..=STAT_MAX`. Every mutation goes through [`grant`](Health::grant) or
//! [`drain`](Health::drain), which clamp, so no code path can push a stat out
//! of range. The same component types double as an item's effect magnitude
//! (an apple carries a `Health`).

use critter_ecs::component::Component;
use serde::{Deserialize, Serialize};

/// Upper bound of every stat.
pub const STAT_MAX: u32 = 100;

/// Shared surface of the four stats, for code that treats them uniformly.
pub trait Vital: Component + Copy {
    fn value(self) -> u32;
    fn grant(self, amount: u32) -> Self;
    fn drain(self, amount: u32) -> Self;
}

macro_rules! vital {
    ($(#[$meta:meta])* $name:ident, $component:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(from = "u32", into = "u32")]
        pub struct $name(u32);

        impl From<u32> for $name {
            fn from(value: u32) -> Self {
                Self::new(value)
            }
        }

        impl From<$name> for u32 {
            fn from(stat: $name) -> u32 {
                stat.0
            }
        }

        impl $name {
            /// Build a stat, clamping to `STAT_MAX`.
            pub fn new(value: u32) -> Self {
                Self(value.min(STAT_MAX))
            }

            pub fn full() -> Self {
                Self(STAT_MAX)
            }

            pub fn value(self) -> u32 {
                self.0
            }

            /// Add `amount`, saturating at `STAT_MAX`.
            pub fn grant(self, amount: u32) -> Self {
                Self::new(self.0.saturating_add(amount))
            }

            /// Subtract `amount`, saturating at 0.
            pub fn drain(self, amount: u32) -> Self {
                Self(self.0.saturating_sub(amount))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::full()
            }
        }

        impl Component for $name {
            const NAME: &'static str = $component;
        }

        impl Vital for $name {
            fn value(self) -> u32 {
                $name::value(self)
            }

            fn grant(self, amount: u32) -> Self {
                $name::grant(self, amount)
            }

            fn drain(self, amount: u32) -> Self {
                $name::drain(self, amount)
            }
        }
    };
}

vital!(
    /// Declines every decay pass while the pet is dirty; restored by food and medicine.
    Health,
    "health"
);
vital!(
    /// Spent by Play and Bathe, restored by Sleep.
    Energy,
    "energy"
);
vital!(
    /// Worn down by Play and time, restored by Bathe.
    Hygiene,
    "hygiene"
);
vital!(
    /// Mood; restored by toys.
    Wellness,
    "wellness"
);
