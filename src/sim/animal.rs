//! Live animal instances and their behavior state machine
//!
//! ```text
//! Sitting ──(idle timer / wander roll / startled)──▶ Moving
//! Moving  ──(player inside detection radius)───────▶ Fleeing
//! Fleeing ──(left region / flee time used up)──────▶ Despawned
//! ```
//!
//! A fleeing animal never calms down within an encounter.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::registry::AnimalTypeDescriptor;
use super::spawner::ProbabilitySource;
use super::wrap::{wrap, wrapped_delta};
use crate::consts::{
    FLEE_SPEED_MULTIPLIER, IDLE_TIME, MAX_FLEE_TIME, REGION_HALF_HEIGHT, WANDER_CHANCE,
};
use crate::tuning::{TweakConfig, keys};

/// Behavioral state of an animal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimalState {
    /// Idle, waiting for the idle timer
    #[default]
    Sitting,
    /// Patrolling at the type's speed
    Moving,
    /// Running from the player at elevated speed
    Fleeing,
    /// Finished; removed from the active set at the end of the tick
    Despawned,
}

impl AnimalState {
    /// Whether the state machine allows going from `self` to `next` in one step
    pub fn can_transition_to(self, next: AnimalState) -> bool {
        use AnimalState::*;
        matches!(
            (self, next),
            (Sitting, Sitting)
                | (Sitting, Moving)
                | (Moving, Moving)
                | (Moving, Fleeing)
                | (Fleeing, Fleeing)
                | (Fleeing, Despawned)
                | (Despawned, Despawned)
        )
    }

    pub fn is_in_motion(self) -> bool {
        matches!(self, AnimalState::Moving | AnimalState::Fleeing)
    }
}

/// A live animal in the active set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalInstance {
    pub id: u32,
    /// Registry identifier of the animal's type
    pub type_id: String,
    /// `x` is cyclic within the current layer, `y` is absolute depth
    pub pos: Vec2,
    pub state: AnimalState,
    /// 0-100, drives the UI color indicator
    pub altitude: f32,
    pub photographed: bool,
    /// Per-instance speed (type speed with variance applied)
    pub speed: f32,
    /// -1.0 or 1.0
    pub direction: f32,
    /// Seconds left before a sitting animal gets up
    pub idle_timer: f32,
    /// Seconds spent fleeing
    pub flee_timer: f32,
}

impl AnimalInstance {
    pub fn new(id: u32, type_id: impl Into<String>, pos: Vec2, altitude: f32, speed: f32) -> Self {
        Self {
            id,
            type_id: type_id.into(),
            pos,
            state: AnimalState::Sitting,
            altitude: altitude.clamp(0.0, 100.0),
            photographed: false,
            speed,
            direction: 1.0,
            idle_timer: IDLE_TIME,
            flee_timer: 0.0,
        }
    }

    /// Altitude as a ratio in [0, 1] for color interpolation
    pub fn altitude_ratio(&self) -> f32 {
        (self.altitude / 100.0).clamp(0.0, 1.0)
    }

    pub fn is_despawned(&self) -> bool {
        self.state == AnimalState::Despawned
    }
}

/// What an animal can see of the world during its update
#[derive(Debug, Clone, Copy)]
pub struct AnimalContext<'a> {
    /// Player position after this tick's motion and collision
    pub player_pos: Vec2,
    pub layer_width: f32,
    pub dt: f32,
    pub tweaks: &'a TweakConfig,
}

impl AnimalContext<'_> {
    /// Distance to the player, taking the short way around the layer
    pub fn distance_to_player(&self, pos: Vec2) -> f32 {
        let dx = wrapped_delta(pos.x, self.player_pos.x, self.layer_width);
        Vec2::new(dx, self.player_pos.y - pos.y).length()
    }

    /// Direction (-1/1) that moves `pos` away from the player
    pub fn away_from_player(&self, pos: Vec2) -> f32 {
        if wrapped_delta(self.player_pos.x, pos.x, self.layer_width) < 0.0 {
            -1.0
        } else {
            1.0
        }
    }
}

/// Advance one animal by one tick; returns its new state.
pub fn advance(
    animal: &mut AnimalInstance,
    descriptor: &AnimalTypeDescriptor,
    ctx: &AnimalContext<'_>,
    rolls: &mut dyn ProbabilitySource,
) -> AnimalState {
    let before = animal.state;
    let tweaks = ctx.tweaks;
    let radius = descriptor.detection_radius(tweaks);

    match animal.state {
        AnimalState::Sitting => {
            animal.idle_timer -= ctx.dt;
            let startled = ctx.distance_to_player(animal.pos) < radius;
            let wander = tweaks.get(keys::WANDER_CHANCE, WANDER_CHANCE);

            if startled || animal.idle_timer <= 0.0 || rolls.next_unit() < wander {
                animal.state = AnimalState::Moving;
                animal.direction = if startled {
                    ctx.away_from_player(animal.pos)
                } else if rolls.next_unit() < 0.5 {
                    -1.0
                } else {
                    1.0
                };
            }
        }
        AnimalState::Moving => {
            animal.pos.x = wrap(animal.pos.x + animal.direction * animal.speed * ctx.dt, ctx.layer_width);

            if ctx.distance_to_player(animal.pos) < radius {
                animal.state = AnimalState::Fleeing;
                animal.direction = ctx.away_from_player(animal.pos);
                animal.flee_timer = 0.0;
            }
        }
        AnimalState::Fleeing => {
            let multiplier = tweaks.get(keys::FLEE_SPEED_MULTIPLIER, FLEE_SPEED_MULTIPLIER);
            animal.pos.x = wrap(
                animal.pos.x + animal.direction * animal.speed * multiplier * ctx.dt,
                ctx.layer_width,
            );
            animal.flee_timer += ctx.dt;

            let max_flee = tweaks.get(keys::MAX_FLEE_TIME, MAX_FLEE_TIME);
            let half_height = tweaks.get(keys::REGION_HALF_HEIGHT, REGION_HALF_HEIGHT);
            let left_region = (animal.pos.y - ctx.player_pos.y).abs() > half_height;

            if left_region || animal.flee_timer >= max_flee {
                animal.state = AnimalState::Despawned;
            }
        }
        AnimalState::Despawned => {}
    }

    if let Some(hook) = &descriptor.update_hook {
        let settled = animal.state;
        hook.update(animal, ctx);
        if !settled.can_transition_to(animal.state) {
            log::warn!(
                "{} #{}: update hook attempted {:?} -> {:?}, reverting",
                animal.type_id,
                animal.id,
                settled,
                animal.state
            );
            animal.state = settled;
        }
        animal.pos.x = wrap(animal.pos.x, ctx.layer_width);
    }

    if animal.state != before {
        log::debug!("{} #{}: {:?} -> {:?}", animal.type_id, animal.id, before, animal.state);
    }

    animal.state
}
