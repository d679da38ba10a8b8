//! Simulation tuning.
//!
//! Every rate, duration, cost and threshold the game rules use lives in
//! [`SimConfig`]. The defaults reproduce the stock game; a JSON document can
//! override any subset of fields.

use serde::{Deserialize, Serialize};

/// Configuration problems detected before a simulation starts.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("'{field}' must be greater than zero")]
    Zero { field: &'static str },

    #[error("'{field}' must be finite and non-negative, got {value}")]
    Negative { field: &'static str, value: f64 },
}

/// Tunable parameters of the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Wall-clock seconds represented by one tick.
    pub seconds_per_tick: f64,

    // -- system cadence (in ticks) ------------------------------------------
    pub energy_decline_interval: u64,
    pub hygiene_decline_interval: u64,
    pub wellness_decline_interval: u64,
    pub health_decline_interval: u64,
    pub think_interval: u64,
    pub activity_interval: u64,
    pub leaderboard_interval: u64,
    pub leaderboard_size: usize,

    // -- activity durations (in ticks) --------------------------------------
    pub play_duration: u32,
    pub bath_duration: u32,
    pub eat_duration: u32,
    pub sleep_duration: u32,

    // -- action effects -----------------------------------------------------
    pub max_level: u32,
    pub play_xp: u64,
    pub play_energy_cost: u32,
    pub play_hygiene_cost: u32,
    pub bath_energy_cost: u32,
    pub sleep_energy_gain: u32,

    /// Health only declines while Hygiene is at or below this value.
    pub illness_hygiene_threshold: u32,

    // -- economy ------------------------------------------------------------
    pub pet_cost: f64,
    pub player_initial_money: f64,
    /// Credited to the owner for every countdown tick a pet spends busy.
    pub pet_earn_money: f64,

    // -- validation ---------------------------------------------------------
    pub max_nickname_len: usize,
    pub max_persona_tag_len: usize,

    /// Seed for the simulation RNG (genders, DNA, breed traits).
    pub seed: u64,
}

/// One in-game hour, in ticks.
pub const TICKS_PER_HOUR: u32 = 3600;

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seconds_per_tick: 1.0,
            energy_decline_interval: 5,
            hygiene_decline_interval: 5,
            wellness_decline_interval: 5,
            health_decline_interval: 5,
            think_interval: 5,
            activity_interval: 1,
            leaderboard_interval: 60,
            leaderboard_size: 2,
            play_duration: TICKS_PER_HOUR,
            bath_duration: TICKS_PER_HOUR,
            eat_duration: TICKS_PER_HOUR,
            sleep_duration: 8 * TICKS_PER_HOUR,
            max_level: 10,
            play_xp: 20,
            play_energy_cost: 10,
            play_hygiene_cost: 5,
            bath_energy_cost: 10,
            sleep_energy_gain: 80,
            illness_hygiene_threshold: 70,
            pet_cost: 5.0,
            player_initial_money: 1000.0,
            pet_earn_money: 0.0001,
            max_nickname_len: 16,
            max_persona_tag_len: 32,
            seed: 0x5EED_CAFE,
        }
    }
}

impl SimConfig {
    /// Parse a (possibly partial) JSON document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would stall or corrupt the simulation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let intervals = [
            ("energy_decline_interval", self.energy_decline_interval),
            ("hygiene_decline_interval", self.hygiene_decline_interval),
            ("wellness_decline_interval", self.wellness_decline_interval),
            ("health_decline_interval", self.health_decline_interval),
            ("think_interval", self.think_interval),
            ("activity_interval", self.activity_interval),
            ("leaderboard_interval", self.leaderboard_interval),
            ("leaderboard_size", self.leaderboard_size as u64),
            ("max_nickname_len", self.max_nickname_len as u64),
            ("max_persona_tag_len", self.max_persona_tag_len as u64),
        ];
        if let Some((field, _)) = intervals.iter().find(|(_, v)| *v == 0) {
            return Err(ConfigError::Zero { field: *field });
        }

        let durations = [
            ("play_duration", self.play_duration),
            ("bath_duration", self.bath_duration),
            ("eat_duration", self.eat_duration),
            ("sleep_duration", self.sleep_duration),
        ];
        if let Some((field, _)) = durations.iter().find(|(_, v)| *v == 0) {
            return Err(ConfigError::Zero { field: *field });
        }

        if !(self.seconds_per_tick > 0.0 && self.seconds_per_tick.is_finite()) {
            return Err(ConfigError::Negative {
                field: "seconds_per_tick",
                value: self.seconds_per_tick,
            });
        }
        let money = [
            ("pet_cost", self.pet_cost),
            ("player_initial_money", self.player_initial_money),
            ("pet_earn_money", self.pet_earn_money),
        ];
        if let Some((field, value)) = money.iter().find(|(_, v)| !(v.is_finite() && *v >= 0.0)) {
            return Err(ConfigError::Negative {
                field: *field,
                value: *value,
            });
        }
        Ok(())
    }
}
