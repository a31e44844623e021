//! Per-frame simulation tick
//!
//! Order within one tick:
//! 1. player motion (per mode)
//! 2. dynamic obstacles slide, then the player is pushed out of overlaps
//! 3. horizontal wrap, then layer change check
//! 4. animal state machines (they see the settled player position)
//! 5. spawning
//! 6. photograph action
//! 7. stamina drain

use glam::Vec2;

use super::animal::{self, AnimalContext, AnimalState};
use super::collision::resolve;
use super::player::{MotionMode, step_ascending, step_descending};
use super::state::GameState;
use super::wrap::{wrap, wrapped_delta};
use crate::consts::*;
use crate::tuning::keys;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Take a photograph this tick
    pub photograph: bool,
}

impl TickInput {
    /// -1 left, 1 right, 0 for none or both
    pub fn horizontal(&self) -> f32 {
        (self.right as i8 - self.left as i8) as f32
    }

    /// -1 up (toward the summit), 1 down
    pub fn vertical(&self) -> f32 {
        (self.down as i8 - self.up as i8) as f32
    }
}

/// Advance the game state by one tick of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time_ticks += 1;

    match state.mode {
        MotionMode::Ascending => {
            step_ascending(&mut state.player, input.horizontal(), input.vertical(), &state.tweaks)
        }
        MotionMode::Descending => {
            step_descending(&mut state.player, input.horizontal(), dt, &state.tweaks)
        }
    }

    resolve_obstacles(state, dt);

    let width = state.current_layer().width;
    state.player.x = wrap(state.player.x, width);

    check_layer_change(state);

    update_animals(state, dt);
    update_spawns(state, dt);

    if input.photograph {
        state.take_photo();
    }

    if state.mode == MotionMode::Ascending {
        state.stamina.update(dt);
    }
}

/// Slide dynamic obstacles on the current layer and push the player out
fn resolve_obstacles(state: &mut GameState, dt: f32) {
    let layer = state.player.layer_index;
    let width = state.current_layer().width;

    for obstacle in state.obstacles.iter_mut().filter(|o| o.layer == layer) {
        obstacle.update(dt, width);

        // Use the copy of the obstacle nearest the player on the cyclic axis
        let dx = wrapped_delta(state.player.x, obstacle.bounds.center.x, width);
        let image = obstacle
            .bounds
            .at(Vec2::new(state.player.x + dx, obstacle.bounds.center.y));

        let mut bounds = state.player.bounds();
        let hit = resolve(&mut bounds, &image);
        if hit.hit {
            state.player.apply_bounds(&bounds);
            if state.mode == MotionMode::Descending {
                state.player.absorb_hit(&hit);
            }
        }
    }
}

/// Tear down the layer's animals when the player crosses into another layer
fn check_layer_change(state: &mut GameState) {
    let next = state.layout.layer_for_depth(state.player.abs_y);
    if next == state.player.layer_index {
        return;
    }

    log::info!("Layer {} -> {}", state.player.layer_index, next);
    state.despawn_all();
    state.player.layer_index = next;
    state.player.x = wrap(state.player.x, state.current_layer().width);
    state.spawn_timer = 0.0;
}

fn update_animals(state: &mut GameState, dt: f32) {
    let width = state.current_layer().width;
    let ctx = AnimalContext {
        player_pos: state.player.position(),
        layer_width: width,
        dt,
        tweaks: &state.tweaks,
    };

    for animal in state.animals.iter_mut() {
        match state.registry.lookup(&animal.type_id) {
            Ok(descriptor) => {
                animal::advance(animal, descriptor, &ctx, &mut state.rng);
            }
            Err(e) => {
                log::warn!("{e}; removing #{}", animal.id);
                animal.state = AnimalState::Despawned;
            }
        }
    }

    let before = state.animals.len();
    state.animals.retain(|a| !a.is_despawned());
    let removed = before - state.animals.len();
    if removed > 0 {
        log::debug!("Removed {} despawned animals", removed);
    }

    state.teardown_distant_regions();
}

fn update_spawns(state: &mut GameState, dt: f32) {
    let interval = state.tweaks.get(keys::SPAWN_INTERVAL, SPAWN_INTERVAL);
    if interval <= 0.0 {
        return;
    }

    state.spawn_timer += dt;
    if state.spawn_timer < interval {
        return;
    }
    state.spawn_timer -= interval;

    let max_animals = state.tweaks.get(keys::MAX_ANIMALS, MAX_ANIMALS as f32).max(0.0) as usize;
    if state.animals.len() < max_animals {
        state.try_spawn_animal();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::animal::AnimalInstance;
    use crate::sim::collision::Aabb;
    use crate::sim::registry::{AnimalTypeDescriptor, AnimalTypeRegistry};
    use crate::sim::state::{Biome, Layer, MountainLayout, ObstacleKind};
    use crate::tuning::TweakConfig;

    fn flat_state(mode: MotionMode) -> GameState {
        let layout = MountainLayout::new(vec![Layer::new(0, Biome::Alpine, 1000.0)], 1.0e6);
        let tweaks = TweakConfig::new().with(keys::SPAWN_INTERVAL, 0.0);
        let mut state = GameState::new(7, layout, AnimalTypeRegistry::new(), tweaks);
        state.mode = mode;
        state
    }

    #[test]
    fn test_tick_wraps_player() {
        let mut state = flat_state(MotionMode::Ascending);
        state.player.x = 998.0;
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert!((state.player.x - (998.0 + ASCEND_STEP - 1000.0)).abs() < 1e-3);
    }

    #[test]
    fn test_ascending_drains_stamina_descending_does_not() {
        let mut climbing = flat_state(MotionMode::Ascending);
        tick(&mut climbing, &TickInput::default(), 1.0);
        assert!(climbing.stamina() < STAMINA_MAX);

        let mut sliding = flat_state(MotionMode::Descending);
        tick(&mut sliding, &TickInput::default(), 1.0);
        assert_eq!(sliding.stamina(), STAMINA_MAX);
    }

    #[test]
    fn test_obstacle_pushes_player_across_seam() {
        let mut state = flat_state(MotionMode::Ascending);
        state.player.x = 995.0;
        state.player.abs_y = 100.0;
        // Rock straddling the seam on the far side
        state.add_obstacle(
            ObstacleKind::Rock,
            0,
            Aabb::new(Vec2::new(15.0, 100.0), Vec2::new(40.0, 200.0)),
            0.0,
        );

        tick(&mut state, &TickInput::default(), SIM_DT);
        // Pushed left, away from the rock's nearest image at x=1015
        assert!(state.player.x < 995.0);
        assert_eq!(state.player.abs_y, 100.0);
    }

    #[test]
    fn test_descending_landing_cancels_fall() {
        let mut state = flat_state(MotionMode::Descending);
        state.player.x = 500.0;
        state.player.abs_y = 100.0;
        state.player.vel = Vec2::new(0.0, 300.0);
        // Wide ledge just under the player's feet
        state.add_obstacle(
            ObstacleKind::Rock,
            0,
            Aabb::new(Vec2::new(500.0, 140.0), Vec2::new(400.0, 60.0)),
            0.0,
        );

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.player.vel.y <= 0.0);
    }

    #[test]
    fn test_obstacles_on_other_layers_ignored() {
        let mut state = flat_state(MotionMode::Ascending);
        state.player.x = 500.0;
        state.player.abs_y = 100.0;
        state.add_obstacle(
            ObstacleKind::Tree,
            3,
            Aabb::new(Vec2::new(500.0, 100.0), Vec2::splat(50.0)),
            0.0,
        );
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.player.x, 500.0);
    }

    #[test]
    fn test_layer_change_despawns_animals() {
        let layout = MountainLayout::new(
            vec![
                Layer::new(0, Biome::Alpine, 1000.0),
                Layer::new(1, Biome::Forest, 600.0),
            ],
            100.0,
        );
        let mut state = GameState::new(1, layout, AnimalTypeRegistry::new(), TweakConfig::new());
        state.mode = MotionMode::Ascending;
        state.player.x = 900.0;
        state.player.abs_y = 99.0;
        state.animals.push(AnimalInstance::new(40, "ghost", Vec2::new(10.0, 99.0), 0.0, 0.0));

        let input = TickInput {
            down: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);

        assert_eq!(state.player.layer_index, 1);
        assert_eq!(state.player.x, 300.0);
        assert!(state.animals.is_empty());
    }

    #[test]
    fn test_unknown_type_is_removed() {
        let mut state = flat_state(MotionMode::Ascending);
        state.animals.push(AnimalInstance::new(40, "yeti", Vec2::new(10.0, 0.0), 0.0, 0.0));
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.animals.is_empty());
    }

    #[test]
    fn test_sitting_animal_survives_until_region_teardown() {
        let mut registry = AnimalTypeRegistry::new();
        registry.register(
            AnimalTypeDescriptor::new("marmot", Vec2::splat(10.0), 10.0)
                .in_biome(Biome::Alpine)
                .with_detection_radius(0.0),
        );
        let layout = MountainLayout::new(vec![Layer::new(0, Biome::Alpine, 1000.0)], 1.0e6);
        let tweaks = TweakConfig::new()
            .with(keys::SPAWN_INTERVAL, 0.0)
            .with(keys::WANDER_CHANCE, 0.0)
            .with(keys::REGION_HALF_HEIGHT, 100.0);
        let mut state = GameState::new(4, layout, registry, tweaks);
        state.mode = MotionMode::Ascending;
        state.animals.push(AnimalInstance::new(1, "marmot", Vec2::new(500.0, 150.0), 50.0, 0.0));

        // Outside the flee region but inside the teardown reach: still sitting
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.animals.len(), 1);
        assert_eq!(state.animals[0].state, AnimalState::Sitting);

        // Climbing away leaves its region behind
        state.player.abs_y = -100.0;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.animals.is_empty());
    }

    #[test]
    fn test_spawning_respects_cap() {
        let mut registry = AnimalTypeRegistry::new();
        registry.register(
            AnimalTypeDescriptor::new("marmot", Vec2::splat(10.0), 10.0)
                .in_biome(Biome::Alpine)
                .with_spawn_probability(1.0)
                .with_detection_radius(0.0),
        );
        let layout = MountainLayout::new(vec![Layer::new(0, Biome::Alpine, 1000.0)], 1.0e6);
        let tweaks = TweakConfig::new()
            .with(keys::SPAWN_INTERVAL, SIM_DT)
            .with(keys::MAX_ANIMALS, 3.0)
            .with(keys::SPAWN_AHEAD_DISTANCE, 0.0);
        let mut state = GameState::new(2, layout, registry, tweaks);
        state.mode = MotionMode::Ascending;

        for _ in 0..20 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.animals.len(), 3);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::with_defaults(99999);
        let mut state2 = GameState::with_defaults(99999);

        let inputs = [
            TickInput {
                left: true,
                ..Default::default()
            },
            TickInput {
                right: true,
                photograph: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for i in 0..600 {
            let input = &inputs[i % inputs.len()];
            tick(&mut state1, input, SIM_DT);
            tick(&mut state2, input, SIM_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.player, state2.player);
        assert_eq!(state1.animals, state2.animals);
        assert_eq!(state1.photo_score, state2.photo_score);
    }
}
