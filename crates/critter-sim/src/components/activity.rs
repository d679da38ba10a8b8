//! What a pet is currently busy with.
//!
//! A pet is idle when `countdown == 0`; its kind is then always
//! [`ActivityKind::None`]. Actions move a pet from idle to busy, and the
//! activity countdown system moves it back.

use std::fmt;

use critter_ecs::component::Component;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ActivityKind {
    #[default]
    None,
    Playing,
    Sleeping,
    Bathing,
    Eating,
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ActivityKind::None => "None",
            ActivityKind::Playing => "Playing",
            ActivityKind::Sleeping => "Sleeping",
            ActivityKind::Bathing => "Bathing",
            ActivityKind::Eating => "Eating",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Activity {
    pub kind: ActivityKind,
    pub countdown: u32,
    pub total_ticks: u32,
    /// Remaining share of the activity, `countdown * 100 / total_ticks`.
    pub percentage: u32,
}

impl Component for Activity {
    const NAME: &'static str = "activity";
}

/// Result of one countdown step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Still busy after the step.
    Running,
    /// The countdown hit zero and the pet is idle again.
    Finished,
    /// Nothing to do.
    Idle,
}

impl Activity {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.countdown == 0
    }

    /// A fresh busy state lasting `duration` ticks.
    pub fn begin(kind: ActivityKind, duration: u32) -> Self {
        Self {
            kind,
            countdown: duration,
            total_ticks: duration,
            percentage: if duration == 0 { 0 } else { 100 },
        }
    }

    /// Advance the countdown by one tick.
    pub fn step(&mut self) -> Progress {
        if self.is_idle() {
            if self.kind != ActivityKind::None {
                *self = Self::idle();
                return Progress::Finished;
            }
            return Progress::Idle;
        }
        self.countdown -= 1;
        if self.countdown == 0 {
            *self = Self::idle();
            return Progress::Finished;
        }
        self.percentage = if self.total_ticks == 0 {
            0
        } else {
            ((u64::from(self.countdown) * 100) / u64::from(self.total_ticks)) as u32
        };
        Progress::Running
    }
}
