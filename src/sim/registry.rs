//! Animal type registry
//!
//! Descriptors are immutable once registered and shared by `Arc`. The registry
//! keeps registration order, which the spawner relies on for its tie-break.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use glam::Vec2;

use super::animal::{AnimalContext, AnimalInstance};
use super::state::{Biome, Layer};
use crate::consts::{DEFAULT_ANIMAL_SPEED, DEFAULT_DETECTION_RADIUS, DEFAULT_SPAWN_PROBABILITY};
use crate::error::{SimError, SimResult};
use crate::tuning::{TweakConfig, keys};

/// Optional per-type behavior run after the built-in state machine step
pub trait AnimalUpdate: Send + Sync {
    fn update(&self, animal: &mut AnimalInstance, ctx: &AnimalContext<'_>);
}

/// Host-provided drawing target. The core only forwards it to draw strategies.
pub trait DrawSurface {
    fn fill_rect(&mut self, top_left: Vec2, size: Vec2, color: [f32; 4]);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]);
}

/// Optional per-type renderer
pub trait AnimalDraw: Send + Sync {
    fn draw(&self, animal: &AnimalInstance, surface: &mut dyn DrawSurface, screen_pos: Vec2);
}

/// Where a type may spawn: a biome, optionally pinned to one layer index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnRule {
    pub biome: Biome,
    pub layer: Option<u32>,
}

impl SpawnRule {
    pub fn matches(&self, layer: &Layer) -> bool {
        self.biome == layer.biome && self.layer.is_none_or(|index| index == layer.index)
    }
}

/// Immutable description of one kind of animal
pub struct AnimalTypeDescriptor {
    pub id: String,
    /// Chance per spawn attempt, `[0, 1]` (falls back to tuning when `None`)
    pub spawn_probability: Option<f32>,
    /// Bounding box size
    pub size: Vec2,
    /// Distance at which the animal notices the player
    pub detection_radius: Option<f32>,
    /// Base movement speed (pixels/s)
    pub speed: Option<f32>,
    /// Base photograph reward
    pub photo_bonus: f32,
    pub biomes: Vec<Biome>,
    pub spawn_rules: Vec<SpawnRule>,
    pub update_hook: Option<Arc<dyn AnimalUpdate>>,
    pub draw_hook: Option<Arc<dyn AnimalDraw>>,
}

impl fmt::Debug for AnimalTypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimalTypeDescriptor")
            .field("id", &self.id)
            .field("spawn_probability", &self.spawn_probability)
            .field("size", &self.size)
            .field("detection_radius", &self.detection_radius)
            .field("speed", &self.speed)
            .field("photo_bonus", &self.photo_bonus)
            .field("biomes", &self.biomes)
            .field("spawn_rules", &self.spawn_rules)
            .field("update_hook", &self.update_hook.is_some())
            .field("draw_hook", &self.draw_hook.is_some())
            .finish()
    }
}

impl AnimalTypeDescriptor {
    pub fn new(id: impl Into<String>, size: Vec2, photo_bonus: f32) -> Self {
        Self {
            id: id.into(),
            spawn_probability: None,
            size,
            detection_radius: None,
            speed: None,
            photo_bonus,
            biomes: Vec::new(),
            spawn_rules: Vec::new(),
            update_hook: None,
            draw_hook: None,
        }
    }

    pub fn with_spawn_probability(mut self, probability: f32) -> Self {
        self.spawn_probability = Some(probability.clamp(0.0, 1.0));
        self
    }

    pub fn with_detection_radius(mut self, radius: f32) -> Self {
        self.detection_radius = Some(radius);
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn in_biome(mut self, biome: Biome) -> Self {
        if !self.biomes.contains(&biome) {
            self.biomes.push(biome);
        }
        self
    }

    /// Add a spawn rule (also marks the biome as habitable)
    pub fn spawn_rule(mut self, biome: Biome, layer: Option<u32>) -> Self {
        self.spawn_rules.push(SpawnRule { biome, layer });
        self.in_biome(biome)
    }

    pub fn with_update(mut self, hook: Arc<dyn AnimalUpdate>) -> Self {
        self.update_hook = Some(hook);
        self
    }

    pub fn with_draw(mut self, hook: Arc<dyn AnimalDraw>) -> Self {
        self.draw_hook = Some(hook);
        self
    }

    /// Spawn rules decide when present; otherwise any listed biome matches
    pub fn matches_layer(&self, layer: &Layer) -> bool {
        if self.spawn_rules.is_empty() {
            self.biomes.contains(&layer.biome)
        } else {
            self.spawn_rules.iter().any(|rule| rule.matches(layer))
        }
    }

    pub fn spawn_probability(&self, tweaks: &TweakConfig) -> f32 {
        tweaks
            .resolve(self.spawn_probability, keys::SPAWN_PROBABILITY, DEFAULT_SPAWN_PROBABILITY)
            .clamp(0.0, 1.0)
    }

    pub fn detection_radius(&self, tweaks: &TweakConfig) -> f32 {
        tweaks.resolve(self.detection_radius, keys::DETECTION_RADIUS, DEFAULT_DETECTION_RADIUS)
    }

    pub fn speed(&self, tweaks: &TweakConfig) -> f32 {
        tweaks.resolve(self.speed, keys::ANIMAL_SPEED, DEFAULT_ANIMAL_SPEED)
    }
}

/// Mapping from type identifier to descriptor, in registration order
#[derive(Debug, Clone, Default)]
pub struct AnimalTypeRegistry {
    entries: Vec<Arc<AnimalTypeDescriptor>>,
    index: HashMap<String, usize>,
}

impl AnimalTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `descriptor` unless its id is taken; returns the stored descriptor.
    ///
    /// The first registration of an id wins.
    pub fn register(&mut self, descriptor: AnimalTypeDescriptor) -> Arc<AnimalTypeDescriptor> {
        if let Some(&i) = self.index.get(&descriptor.id) {
            log::debug!("Animal type '{}' already registered, keeping original", descriptor.id);
            return Arc::clone(&self.entries[i]);
        }

        let descriptor = Arc::new(descriptor);
        self.index.insert(descriptor.id.clone(), self.entries.len());
        self.entries.push(Arc::clone(&descriptor));
        descriptor
    }

    pub fn lookup(&self, id: &str) -> SimResult<&Arc<AnimalTypeDescriptor>> {
        self.index
            .get(id)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| SimError::UnknownAnimalType(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Descriptors in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<AnimalTypeDescriptor>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Register into a registry that may not exist yet.
///
/// A missing registry drops the descriptor with a warning so that one
/// definition cannot abort the load sequence. The caller may retry later.
pub fn register_into(
    registry: Option<&mut AnimalTypeRegistry>,
    descriptor: AnimalTypeDescriptor,
) -> Option<Arc<AnimalTypeDescriptor>> {
    match registry {
        Some(registry) => Some(registry.register(descriptor)),
        None => {
            log::warn!("{}; descriptor dropped", SimError::RegistryUnavailable(descriptor.id));
            None
        }
    }
}
