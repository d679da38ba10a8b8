use critter_ecs::component::Component;
use serde::{Deserialize, Serialize};

/// What the pet "says": a status advisory or an activity flavor line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Think(pub String);

/// Default thought of an idle pet with nothing to report.
pub const IDLE_THOUGHT: &str = "...";

impl Default for Think {
    fn default() -> Self {
        Self(IDLE_THOUGHT.to_owned())
    }
}

impl Think {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Component for Think {
    const NAME: &'static str = "think";
}
