//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (registration order for types, spawn order for animals)
//! - No rendering or platform dependencies

pub mod animal;
pub mod collision;
pub mod fauna;
pub mod photo;
pub mod player;
pub mod registry;
pub mod spawner;
pub mod stamina;
pub mod state;
pub mod tick;
pub mod wrap;

pub use animal::{AnimalContext, AnimalInstance, AnimalState, advance};
pub use collision::{Aabb, CollisionResult, overlaps, resolve};
pub use photo::{PhotoResult, score};
pub use player::{MotionMode, Player, Upgrades, step_ascending, step_descending};
pub use registry::{
    AnimalDraw, AnimalTypeDescriptor, AnimalTypeRegistry, AnimalUpdate, DrawSurface, SpawnRule,
    register_into,
};
pub use spawner::{ProbabilitySource, ScriptedRolls, select_type, try_spawn};
pub use stamina::StaminaGauge;
pub use state::{Biome, GameState, Layer, MountainLayout, Obstacle, ObstacleKind};
pub use tick::{TickInput, tick};
pub use wrap::{cyclic_distance, wrap, wrap_f64, wrapped_delta};
