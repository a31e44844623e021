//! Photography scoring
//!
//! The camera frame is centered on the player. Bonuses stack additively on the
//! type's base reward; a repeat shot of the same animal is scaled down, never
//! zeroed.

use serde::{Deserialize, Serialize};

use super::animal::AnimalInstance;
use super::player::Player;
use super::registry::AnimalTypeDescriptor;
use super::wrap::wrapped_delta;
use crate::consts::{
    PHOTO_ALTITUDE_BASELINE, PHOTO_ALTITUDE_BONUS_PER_POINT, PHOTO_CENTER_BONUS,
    PHOTO_CENTER_TOLERANCE, PHOTO_MOVEMENT_BONUS, PHOTO_REPEAT_PENALTY,
};

/// Breakdown of one photograph, handed to the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoResult {
    pub animal_id: u32,
    pub type_id: String,
    pub base: f32,
    pub center_bonus: f32,
    pub altitude_bonus: f32,
    pub movement_bonus: f32,
    /// True when the animal had already been photographed
    pub repeat: bool,
    pub total: f32,
}

/// Score a photograph of `animal` and mark it as photographed.
///
/// `camera_accuracy_bonus` widens the center-of-frame window (0 = stock camera).
pub fn score(
    animal: &mut AnimalInstance,
    descriptor: &AnimalTypeDescriptor,
    player: &Player,
    layer_width: f32,
    camera_accuracy_bonus: f32,
) -> PhotoResult {
    let base = descriptor.photo_bonus;

    let dx = wrapped_delta(player.x, animal.pos.x, layer_width);
    let offset = glam::Vec2::new(dx, animal.pos.y - player.abs_y).length();
    let tolerance = PHOTO_CENTER_TOLERANCE * (1.0 + camera_accuracy_bonus.max(0.0));
    let center_bonus = if offset <= tolerance { PHOTO_CENTER_BONUS } else { 0.0 };

    let altitude_bonus =
        (animal.altitude - PHOTO_ALTITUDE_BASELINE).max(0.0) * PHOTO_ALTITUDE_BONUS_PER_POINT;

    let movement_bonus = if animal.state.is_in_motion() { PHOTO_MOVEMENT_BONUS } else { 0.0 };

    let repeat = animal.photographed;
    let mut total = base + center_bonus + altitude_bonus + movement_bonus;
    if repeat {
        total *= PHOTO_REPEAT_PENALTY;
    }

    animal.photographed = true;

    PhotoResult {
        animal_id: animal.id,
        type_id: animal.type_id.clone(),
        base,
        center_bonus,
        altitude_bonus,
        movement_bonus,
        repeat,
        total,
    }
}

/// Index of the closest live animal within `range` of the player
pub fn find_subject(
    animals: &[AnimalInstance],
    player: &Player,
    layer_width: f32,
    range: f32,
) -> Option<usize> {
    animals
        .iter()
        .enumerate()
        .filter(|(_, a)| !a.is_despawned())
        .map(|(i, a)| {
            let dx = wrapped_delta(player.x, a.pos.x, layer_width);
            (i, glam::Vec2::new(dx, a.pos.y - player.abs_y).length())
        })
        .filter(|&(_, dist)| dist <= range)
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
}
