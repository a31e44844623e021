//! Wildlife spawn selection
//!
//! Each candidate type for the layer gets its own Bernoulli trial, in
//! registration order. The first type whose trial passes is spawned; later
//! candidates are not rolled.

use std::sync::Arc;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::animal::AnimalInstance;
use super::registry::{AnimalTypeDescriptor, AnimalTypeRegistry};
use super::state::Layer;
use super::wrap::wrap;
use crate::consts::{ALTITUDE_PER_LAYER, IDLE_TIME};
use crate::tuning::{TweakConfig, keys};

/// Uniform `[0, 1)` source, replaceable for deterministic tests
pub trait ProbabilitySource {
    fn next_unit(&mut self) -> f32;
}

impl ProbabilitySource for Pcg32 {
    fn next_unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Replays a fixed list of rolls, cycling when it runs out
#[derive(Debug, Clone)]
pub struct ScriptedRolls {
    rolls: Vec<f32>,
    cursor: usize,
}

impl ScriptedRolls {
    pub fn new(rolls: Vec<f32>) -> Self {
        Self { rolls, cursor: 0 }
    }

    /// Number of rolls handed out so far
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl ProbabilitySource for ScriptedRolls {
    fn next_unit(&mut self) -> f32 {
        if self.rolls.is_empty() {
            return 0.0;
        }
        let roll = self.rolls[self.cursor % self.rolls.len()];
        self.cursor += 1;
        roll.clamp(0.0, 1.0 - f32::EPSILON)
    }
}

/// Starting altitude for animals on a layer (top layer is highest)
pub fn altitude_for_layer(layer_index: u32) -> f32 {
    (100.0 - layer_index as f32 * ALTITUDE_PER_LAYER).clamp(0.0, 100.0)
}

/// Pick at most one type to spawn on `layer`
pub fn select_type(
    registry: &AnimalTypeRegistry,
    layer: &Layer,
    tweaks: &TweakConfig,
    rolls: &mut dyn ProbabilitySource,
) -> Option<Arc<AnimalTypeDescriptor>> {
    registry
        .iter()
        .filter(|desc| desc.matches_layer(layer))
        .find(|desc| rolls.next_unit() < desc.spawn_probability(tweaks))
        .cloned()
}

/// Roll for a spawn on `layer` and build the instance at `pos`.
///
/// Returns `None` when no candidate passes its trial.
pub fn try_spawn(
    registry: &AnimalTypeRegistry,
    layer: &Layer,
    pos: Vec2,
    id: u32,
    tweaks: &TweakConfig,
    rolls: &mut dyn ProbabilitySource,
) -> Option<AnimalInstance> {
    let desc = select_type(registry, layer, tweaks, rolls)?;

    let variance = tweaks.get(keys::SPEED_VARIANCE, 0.0).clamp(0.0, 1.0);
    let speed_scale = if variance > 0.0 {
        1.0 + (rolls.next_unit() * 2.0 - 1.0) * variance
    } else {
        1.0
    };

    let mut pos = pos;
    pos.x = wrap(pos.x, layer.width);

    let mut animal = AnimalInstance::new(
        id,
        desc.id.clone(),
        pos,
        altitude_for_layer(layer.index),
        desc.speed(tweaks) * speed_scale,
    );
    animal.idle_timer = tweaks.get(keys::IDLE_TIME, IDLE_TIME);
    log::debug!("Spawned {} #{} on layer {} at {:?}", desc.id, id, layer.index, pos);
    Some(animal)
}
