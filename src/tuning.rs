//! Data-driven game balance
//!
//! A flat table of named numeric constants. Any entry may be missing, in which
//! case the consuming component falls back to its own default from `consts`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Names of the tunable constants
pub mod keys {
    pub const SPAWN_INTERVAL: &str = "spawn_interval";
    pub const MAX_ANIMALS: &str = "max_animals";
    pub const SPEED_VARIANCE: &str = "speed_variance";
    pub const WANDER_CHANCE: &str = "wander_chance";
    pub const IDLE_TIME: &str = "idle_time";
    pub const FLEE_SPEED_MULTIPLIER: &str = "flee_speed_multiplier";
    pub const MAX_FLEE_TIME: &str = "max_flee_time";
    pub const REGION_HALF_HEIGHT: &str = "region_half_height";
    pub const SPAWN_AHEAD_DISTANCE: &str = "spawn_ahead_distance";
    pub const DETECTION_RADIUS: &str = "detection_radius";
    pub const ANIMAL_SPEED: &str = "animal_speed";
    pub const SPAWN_PROBABILITY: &str = "spawn_probability";
    pub const ASCEND_STEP: &str = "ascend_step";
    pub const CLIMB_STEP: &str = "climb_step";
    pub const GRAVITY: &str = "gravity";
    pub const MAX_FALL_SPEED: &str = "max_fall_speed";
    pub const STEER_ACCEL: &str = "steer_accel";
    pub const STEER_DAMPING: &str = "steer_damping";
    pub const STAMINA_DRAIN_RATE: &str = "stamina_drain_rate";
    pub const PHOTO_RANGE: &str = "photo_range";
    pub const PHOTO_STAMINA_COST: &str = "photo_stamina_cost";
}

/// Tunable constants, read-only to the simulation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TweakConfig {
    values: BTreeMap<String, f32>,
}

impl TweakConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object of `name: number` pairs
    pub fn from_json(json: &str) -> SimResult<Self> {
        let config: TweakConfig =
            serde_json::from_str(json).map_err(|e| SimError::InvalidTweaks(e.to_string()))?;

        if let Some((key, _)) = config.values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(SimError::InvalidTweaks(format!("{key} is not finite")));
        }

        log::info!("Loaded {} tweak values", config.values.len());
        Ok(config)
    }

    /// Builder-style setter
    pub fn with(mut self, key: &str, value: f32) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: f32) {
        self.values.insert(key.to_string(), value);
    }

    /// Value for `key`, or `default` when absent
    pub fn get(&self, key: &str, default: f32) -> f32 {
        self.values.get(key).copied().unwrap_or(default)
    }

    /// Per-type override wins over the table, the table wins over `default`
    pub fn resolve(&self, override_value: Option<f32>, key: &str, default: f32) -> f32 {
        override_value.unwrap_or_else(|| self.get(key, default))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
