//! Game state and core simulation types
//!
//! The state owns everything the tick mutates: the player, the active animal
//! set, the obstacles, the stamina gauge and the seeded RNG. Nothing here is
//! global; a host creates one `GameState` per run.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::animal::AnimalInstance;
use super::collision::Aabb;
use super::fauna;
use super::photo::{self, PhotoResult};
use super::player::{MotionMode, Player};
use super::registry::{AnimalTypeRegistry, DrawSurface};
use super::spawner::{self, ProbabilitySource};
use super::stamina::StaminaGauge;
use super::wrap::wrap;
use crate::consts::*;
use crate::tuning::{TweakConfig, keys};

/// Terrain theme of a layer, used to filter which animals spawn there
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    Summit,
    Snowfield,
    Glacier,
    Alpine,
    Forest,
}

/// A horizontal band of the mountain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub index: u32,
    pub biome: Biome,
    /// Wrap modulus for horizontal positions on this layer
    pub width: f32,
}

impl Layer {
    pub fn new(index: u32, biome: Biome, width: f32) -> Self {
        Self { index, biome, width }
    }
}

/// Ordered layers from the summit down
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "LayoutData")]
pub struct MountainLayout {
    layers: Vec<Layer>,
    layer_height: f32,
}

/// Wire form of a layout; always normalized through `MountainLayout::new`
#[derive(Deserialize)]
struct LayoutData {
    layers: Vec<Layer>,
    layer_height: f32,
}

impl From<LayoutData> for MountainLayout {
    fn from(data: LayoutData) -> Self {
        Self::new(data.layers, data.layer_height)
    }
}

impl Default for MountainLayout {
    fn default() -> Self {
        let biomes = [
            (Biome::Summit, 600.0),
            (Biome::Snowfield, 800.0),
            (Biome::Glacier, 900.0),
            (Biome::Alpine, 1000.0),
            (Biome::Alpine, 1100.0),
            (Biome::Forest, 1200.0),
            (Biome::Forest, 1400.0),
        ];
        let layers = biomes
            .iter()
            .enumerate()
            .map(|(i, &(biome, width))| Layer::new(i as u32, biome, width))
            .collect();
        Self::new(layers, LAYER_HEIGHT)
    }
}

impl MountainLayout {
    /// Layers are re-indexed in order. An empty list gets one default layer.
    pub fn new(mut layers: Vec<Layer>, layer_height: f32) -> Self {
        if layers.is_empty() {
            log::warn!("Empty mountain layout, using a single default layer");
            layers.push(Layer::new(0, Biome::Alpine, DEFAULT_LAYER_WIDTH));
        }
        for (i, layer) in layers.iter_mut().enumerate() {
            layer.index = i as u32;
        }
        Self {
            layers,
            layer_height: layer_height.max(1.0),
        }
    }

    pub fn layer(&self, index: u32) -> &Layer {
        let last = self.layers.len().saturating_sub(1);
        &self.layers[(index as usize).min(last)]
    }

    /// Layer index for an absolute depth (clamped to the mountain)
    pub fn layer_for_depth(&self, abs_y: f32) -> u32 {
        let raw = (abs_y / self.layer_height).floor().max(0.0) as u32;
        raw.min((self.layers.len() as u32).saturating_sub(1))
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Rock,
    Tree,
    /// Slides sideways across the layer
    Boulder,
}

/// Terrain the player collides with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub layer: u32,
    pub bounds: Aabb,
    /// Horizontal velocity (zero for static obstacles)
    pub vel_x: f32,
}

impl Obstacle {
    pub fn is_dynamic(&self) -> bool {
        self.vel_x != 0.0
    }

    /// Slide dynamic obstacles and keep them on the layer
    pub fn update(&mut self, dt: f32, layer_width: f32) {
        if self.is_dynamic() {
            self.bounds.center.x = wrap(self.bounds.center.x + self.vel_x * dt, layer_width);
        }
    }
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub mode: MotionMode,
    pub layout: MountainLayout,
    pub player: Player,
    pub registry: AnimalTypeRegistry,
    /// Active animals, in spawn order
    pub animals: Vec<AnimalInstance>,
    pub obstacles: Vec<Obstacle>,
    pub stamina: StaminaGauge,
    pub tweaks: TweakConfig,
    /// Accumulated photograph rewards
    pub photo_score: f32,
    pub last_photo: Option<PhotoResult>,
    pub(crate) spawn_timer: f32,
    next_id: u32,
}

impl GameState {
    pub fn new(seed: u64, layout: MountainLayout, registry: AnimalTypeRegistry, tweaks: TweakConfig) -> Self {
        let first_width = layout.layer(0).width;
        let stamina = StaminaGauge::new(tweaks.get(keys::STAMINA_DRAIN_RATE, STAMINA_DRAIN_RATE));

        log::info!(
            "New run: seed={}, layers={}, animal types={}",
            seed,
            layout.len(),
            registry.len()
        );

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            mode: MotionMode::default(),
            layout,
            player: Player::new(first_width / 2.0, 0.0),
            registry,
            animals: Vec::new(),
            obstacles: Vec::new(),
            stamina,
            tweaks,
            photo_score: 0.0,
            last_photo: None,
            spawn_timer: 0.0,
            next_id: 1,
        }
    }

    /// Default mountain with the built-in fauna
    pub fn with_defaults(seed: u64) -> Self {
        Self::new(
            seed,
            MountainLayout::default(),
            fauna::default_registry(),
            TweakConfig::default(),
        )
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn current_layer(&self) -> &Layer {
        self.layout.layer(self.player.layer_index)
    }

    /// Read-only stamina for the UI
    pub fn stamina(&self) -> f32 {
        self.stamina.value()
    }

    /// Start a fresh run on the same mountain
    pub fn new_run(&mut self) {
        self.despawn_all();
        self.stamina.reset();
        let width = self.layout.layer(0).width;
        let upgrades = self.player.upgrades;
        self.player = Player::new(width / 2.0, 0.0);
        self.player.upgrades = upgrades;
        self.photo_score = 0.0;
        self.last_photo = None;
        self.spawn_timer = 0.0;
    }

    /// Remove every active animal; returns how many were removed.
    ///
    /// Safe to call on an empty set.
    pub fn despawn_all(&mut self) -> usize {
        let removed = self.animals.len();
        self.animals.clear();
        if removed > 0 {
            log::info!("Despawned {} animals", removed);
        }
        removed
    }

    /// Tear down regions the player has left behind.
    ///
    /// Animals further than two region half-heights from the player go with
    /// their region, whatever their state. This is a teardown, like
    /// `despawn_all`, not a state-machine transition. Returns how many were
    /// removed.
    pub fn teardown_distant_regions(&mut self) -> usize {
        let half_height = self.tweaks.get(keys::REGION_HALF_HEIGHT, REGION_HALF_HEIGHT);
        let reach = half_height * 2.0;
        let player_y = self.player.abs_y;

        let before = self.animals.len();
        self.animals.retain(|a| (a.pos.y - player_y).abs() <= reach);
        let removed = before - self.animals.len();
        if removed > 0 {
            log::debug!("Region teardown removed {} animals", removed);
        }
        removed
    }

    pub fn add_obstacle(&mut self, kind: ObstacleKind, layer: u32, bounds: Aabb, vel_x: f32) -> u32 {
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle {
            id,
            kind,
            layer,
            bounds,
            vel_x,
        });
        id
    }

    /// Roll for one spawn near the player; returns the new animal's id
    pub fn try_spawn_animal(&mut self) -> Option<u32> {
        let layer = self.current_layer().clone();
        let ahead = self.tweaks.get(keys::SPAWN_AHEAD_DISTANCE, SPAWN_AHEAD_DISTANCE);
        let ahead = match self.mode {
            MotionMode::Descending => ahead,
            MotionMode::Ascending => -ahead,
        };
        let offset = (self.rng.next_unit() * 2.0 - 1.0) * layer.width / 2.0;
        let pos = Vec2::new(self.player.x + offset, self.player.abs_y + ahead);

        let id = self.next_id;
        let animal = spawner::try_spawn(&self.registry, &layer, pos, id, &self.tweaks, &mut self.rng)?;
        self.next_id += 1;
        self.animals.push(animal);
        Some(id)
    }

    /// Photograph the nearest animal in range
    pub fn take_photo(&mut self) -> Option<PhotoResult> {
        let cost = self.tweaks.get(keys::PHOTO_STAMINA_COST, PHOTO_STAMINA_COST);
        self.stamina.update(cost);

        let width = self.current_layer().width;
        let range = self.tweaks.get(keys::PHOTO_RANGE, PHOTO_RANGE);
        let Some(index) = photo::find_subject(&self.animals, &self.player, width, range) else {
            log::debug!("Photo taken with no animal in range");
            return None;
        };

        let animal = &mut self.animals[index];
        let descriptor = match self.registry.lookup(&animal.type_id) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                log::warn!("Cannot score photo: {e}");
                return None;
            }
        };

        let bonus = self.player.upgrades.camera_accuracy_bonus();
        let result = photo::score(animal, descriptor, &self.player, width, bonus);
        self.photo_score += result.total;
        self.last_photo = Some(result.clone());
        Some(result)
    }

    /// Run each animal's draw strategy, if it has one.
    ///
    /// `project` maps world positions to screen positions.
    pub fn draw_animals(&self, surface: &mut dyn DrawSurface, project: impl Fn(Vec2) -> Vec2) {
        for animal in &self.animals {
            let Ok(descriptor) = self.registry.lookup(&animal.type_id) else {
                continue;
            };
            if let Some(draw) = &descriptor.draw_hook {
                draw.draw(animal, surface, project(animal.pos));
            }
        }
    }
}
