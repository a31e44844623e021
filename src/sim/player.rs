//! Player state and per-mode motion
//!
//! Ascending is step-based with no momentum: velocity is cleared every tick,
//! so letting go of the keys stops the climber on the very next tick.
//! Descending is velocity-based (gravity plus steering with damping).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, CollisionResult};
use crate::consts::*;
use crate::tuning::{TweakConfig, keys};

/// Which way the player is travelling on the mountain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MotionMode {
    Ascending,
    #[default]
    Descending,
}

/// Upgrade levels bought outside the core; applied as multipliers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Upgrades {
    pub speed: u8,
    pub camera: u8,
}

impl Upgrades {
    /// +10% movement per speed level
    pub fn speed_multiplier(&self) -> f32 {
        1.0 + 0.1 * self.speed as f32
    }

    /// Extra center-of-frame tolerance per camera level
    pub fn camera_accuracy_bonus(&self) -> f32 {
        0.25 * self.camera as f32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Horizontal position, cyclic within the current layer
    pub x: f32,
    /// Absolute depth from the summit
    pub abs_y: f32,
    pub vel: Vec2,
    pub layer_index: u32,
    pub upgrades: Upgrades,
    pub size: Vec2,
}

impl Player {
    pub fn new(x: f32, abs_y: f32) -> Self {
        Self {
            x,
            abs_y,
            vel: Vec2::ZERO,
            layer_index: 0,
            upgrades: Upgrades::default(),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.abs_y)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.position(), self.size)
    }

    /// Take the center of a resolved box as the new position
    pub fn apply_bounds(&mut self, bounds: &Aabb) {
        self.x = bounds.center.x;
        self.abs_y = bounds.center.y;
    }

    /// Cancel the part of the velocity driving into a surface
    pub fn absorb_hit(&mut self, hit: &CollisionResult) {
        if !hit.hit {
            return;
        }
        let into = self.vel.dot(hit.normal);
        if into < 0.0 {
            self.vel -= hit.normal * into;
        }
    }
}

/// One ascending tick. `horizontal`/`vertical` are -1, 0 or 1.
///
/// Up is negative vertical (toward the summit).
pub fn step_ascending(player: &mut Player, horizontal: f32, vertical: f32, tweaks: &TweakConfig) {
    let multiplier = player.upgrades.speed_multiplier();
    let step = tweaks.get(keys::ASCEND_STEP, ASCEND_STEP) * multiplier;
    let climb = tweaks.get(keys::CLIMB_STEP, CLIMB_STEP) * multiplier;

    player.x += horizontal.clamp(-1.0, 1.0) * step;
    player.abs_y += vertical.clamp(-1.0, 1.0) * climb;
    player.vel = Vec2::ZERO;
}

/// One descending tick of `dt` seconds
pub fn step_descending(player: &mut Player, horizontal: f32, dt: f32, tweaks: &TweakConfig) {
    let gravity = tweaks.get(keys::GRAVITY, GRAVITY);
    let max_fall = tweaks.get(keys::MAX_FALL_SPEED, MAX_FALL_SPEED);
    let accel = tweaks.get(keys::STEER_ACCEL, STEER_ACCEL) * player.upgrades.speed_multiplier();
    let damping = tweaks.get(keys::STEER_DAMPING, STEER_DAMPING).clamp(0.0, 1.0);

    player.vel.y = (player.vel.y + gravity * dt).min(max_fall);
    player.vel.x += horizontal.clamp(-1.0, 1.0) * accel * dt;
    player.vel.x *= damping.powf(dt);

    player.x += player.vel.x * dt;
    player.abs_y += player.vel.y * dt;
}
