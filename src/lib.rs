//! Peak Descent - gameplay simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (wrapping world, collisions, wildlife, stamina)
//! - `tuning`: Data-driven game balance
//! - `error`: Error types surfaced by the simulation

pub mod error;
pub mod sim;
pub mod tuning;

pub use error::{SimError, SimResult};
pub use tuning::TweakConfig;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Default layer width used when a layout is not supplied
    pub const DEFAULT_LAYER_WIDTH: f32 = 1000.0;
    /// Vertical extent of one mountain layer
    pub const LAYER_HEIGHT: f32 = 2400.0;

    /// Player hitbox
    pub const PLAYER_WIDTH: f32 = 24.0;
    pub const PLAYER_HEIGHT: f32 = 32.0;

    /// Ascending mode: horizontal step per tick with a direction held
    pub const ASCEND_STEP: f32 = 4.0;
    /// Ascending mode: vertical step per tick with up/down held
    pub const CLIMB_STEP: f32 = 3.0;

    /// Descending mode physics
    pub const GRAVITY: f32 = 420.0;
    pub const MAX_FALL_SPEED: f32 = 520.0;
    pub const STEER_ACCEL: f32 = 900.0;
    /// Fraction of horizontal velocity kept per second without steering
    pub const STEER_DAMPING: f32 = 0.08;

    /// Fraction of the smaller-axis overlap removed per resolve
    pub const PUSH_OUT_FRACTION: f32 = 0.3;

    /// Stamina gauge bounds and drain (units per second)
    pub const STAMINA_MAX: f32 = 100.0;
    pub const STAMINA_DRAIN_RATE: f32 = 1.5;

    /// Wildlife defaults (overridable per type and through tuning)
    pub const SPAWN_INTERVAL: f32 = 1.5;
    pub const MAX_ANIMALS: usize = 12;
    pub const DEFAULT_SPAWN_PROBABILITY: f32 = 0.2;
    pub const DEFAULT_DETECTION_RADIUS: f32 = 140.0;
    pub const DEFAULT_ANIMAL_SPEED: f32 = 60.0;
    pub const IDLE_TIME: f32 = 2.5;
    pub const WANDER_CHANCE: f32 = 0.01;
    pub const FLEE_SPEED_MULTIPLIER: f32 = 2.5;
    pub const MAX_FLEE_TIME: f32 = 4.0;
    /// Animals further than this from the player vertically leave the simulated region
    pub const REGION_HALF_HEIGHT: f32 = 900.0;
    /// How far ahead of the player (vertically) new animals are placed
    pub const SPAWN_AHEAD_DISTANCE: f32 = 500.0;
    /// Altitude lost per layer descended (altitude is 0-100)
    pub const ALTITUDE_PER_LAYER: f32 = 12.5;

    /// Photography
    pub const PHOTO_RANGE: f32 = 320.0;
    pub const PHOTO_CENTER_TOLERANCE: f32 = 48.0;
    pub const PHOTO_CENTER_BONUS: f32 = 50.0;
    pub const PHOTO_ALTITUDE_BASELINE: f32 = 50.0;
    pub const PHOTO_ALTITUDE_BONUS_PER_POINT: f32 = 2.0;
    pub const PHOTO_MOVEMENT_BONUS: f32 = 25.0;
    pub const PHOTO_REPEAT_PENALTY: f32 = 0.25;
    /// Seconds of stamina a photograph costs
    pub const PHOTO_STAMINA_COST: f32 = 2.0;
}
