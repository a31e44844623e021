//! Stamina gauge
//!
//! Owned by the game state; consumers read `value()` and never write.

use serde::{Deserialize, Serialize};

use crate::consts::{STAMINA_DRAIN_RATE, STAMINA_MAX};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaminaGauge {
    value: f32,
    drain_rate: f32,
}

impl Default for StaminaGauge {
    fn default() -> Self {
        Self::new(STAMINA_DRAIN_RATE)
    }
}

impl StaminaGauge {
    /// Full gauge draining at `drain_rate` units per second
    pub fn new(drain_rate: f32) -> Self {
        Self {
            value: STAMINA_MAX,
            drain_rate: drain_rate.max(0.0),
        }
    }

    /// Drain for `dt` seconds, never below zero
    pub fn update(&mut self, dt: f32) {
        let drained = self.value - dt.max(0.0) * self.drain_rate;
        self.value = drained.clamp(0.0, STAMINA_MAX);
    }

    /// Refill to full
    pub fn reset(&mut self) {
        self.value = STAMINA_MAX;
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn drain_rate(&self) -> f32 {
        self.drain_rate
    }

    pub fn is_empty(&self) -> bool {
        self.value <= 0.0
    }
}
