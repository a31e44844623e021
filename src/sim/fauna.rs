//! Built-in mountain wildlife
//!
//! Each species registers itself through `register_into`, so a definition
//! loaded before the registry exists only logs a warning.

use std::sync::Arc;

use glam::Vec2;

use super::animal::{AnimalContext, AnimalInstance};
use super::registry::{
    AnimalDraw, AnimalTypeDescriptor, AnimalTypeRegistry, AnimalUpdate, DrawSurface, register_into,
};
use super::state::Biome;

/// Draws the animal as a filled box of its size
#[derive(Debug, Clone, Copy)]
pub struct BoxSprite {
    pub size: Vec2,
    pub color: [f32; 4],
}

impl AnimalDraw for BoxSprite {
    fn draw(&self, _animal: &AnimalInstance, surface: &mut dyn DrawSurface, screen_pos: Vec2) {
        surface.fill_rect(screen_pos - self.size * 0.5, self.size, self.color);
    }
}

/// Draws the animal as a dot, dimmed once photographed
#[derive(Debug, Clone, Copy)]
pub struct DotSprite {
    pub radius: f32,
    pub color: [f32; 4],
}

impl AnimalDraw for DotSprite {
    fn draw(&self, animal: &AnimalInstance, surface: &mut dyn DrawSurface, screen_pos: Vec2) {
        let mut color = self.color;
        if animal.photographed {
            color[3] *= 0.5;
        }
        surface.fill_circle(screen_pos, self.radius, color);
    }
}

/// Eagles bob vertically while airborne
#[derive(Debug, Clone, Copy)]
pub struct Soaring {
    pub amplitude: f32,
    pub wavelength: f32,
}

impl AnimalUpdate for Soaring {
    fn update(&self, animal: &mut AnimalInstance, ctx: &AnimalContext<'_>) {
        if animal.state.is_in_motion() {
            let phase = animal.pos.x / self.wavelength * std::f32::consts::TAU;
            animal.pos.y += phase.cos() * self.amplitude * ctx.dt;
        }
    }
}

pub const MARMOT: &str = "marmot";
pub const MOUNTAIN_GOAT: &str = "mountain_goat";
pub const SNOW_HARE: &str = "snow_hare";
pub const GOLDEN_EAGLE: &str = "golden_eagle";
pub const IBEX: &str = "ibex";

pub fn register_marmot(registry: Option<&mut AnimalTypeRegistry>) -> bool {
    let desc = AnimalTypeDescriptor::new(MARMOT, Vec2::new(16.0, 12.0), 20.0)
        .spawn_rule(Biome::Alpine, None)
        .spawn_rule(Biome::Forest, None)
        .with_spawn_probability(0.25)
        .with_detection_radius(120.0)
        .with_speed(45.0);
    register_into(registry, desc).is_some()
}

pub fn register_mountain_goat(registry: Option<&mut AnimalTypeRegistry>) -> bool {
    let size = Vec2::new(30.0, 24.0);
    let desc = AnimalTypeDescriptor::new(MOUNTAIN_GOAT, size, 45.0)
        .in_biome(Biome::Alpine)
        .in_biome(Biome::Snowfield)
        .with_spawn_probability(0.15)
        .with_detection_radius(160.0)
        .with_speed(70.0)
        .with_draw(Arc::new(BoxSprite {
            size,
            color: [0.92, 0.9, 0.85, 1.0],
        }));
    register_into(registry, desc).is_some()
}

pub fn register_snow_hare(registry: Option<&mut AnimalTypeRegistry>) -> bool {
    let desc = AnimalTypeDescriptor::new(SNOW_HARE, Vec2::new(14.0, 14.0), 30.0)
        .in_biome(Biome::Snowfield)
        .in_biome(Biome::Glacier)
        .with_spawn_probability(0.2)
        .with_detection_radius(110.0)
        .with_speed(90.0)
        .with_draw(Arc::new(DotSprite {
            radius: 7.0,
            color: [1.0, 1.0, 1.0, 1.0],
        }));
    register_into(registry, desc).is_some()
}

pub fn register_golden_eagle(registry: Option<&mut AnimalTypeRegistry>) -> bool {
    let desc = AnimalTypeDescriptor::new(GOLDEN_EAGLE, Vec2::new(40.0, 18.0), 80.0)
        .spawn_rule(Biome::Summit, None)
        .spawn_rule(Biome::Snowfield, Some(1))
        .with_spawn_probability(0.05)
        .with_detection_radius(220.0)
        .with_speed(120.0)
        .with_update(Arc::new(Soaring {
            amplitude: 40.0,
            wavelength: 300.0,
        }));
    register_into(registry, desc).is_some()
}

pub fn register_ibex(registry: Option<&mut AnimalTypeRegistry>) -> bool {
    let desc = AnimalTypeDescriptor::new(IBEX, Vec2::new(32.0, 26.0), 60.0)
        .in_biome(Biome::Summit)
        .in_biome(Biome::Glacier)
        .with_spawn_probability(0.08)
        .with_detection_radius(180.0)
        .with_speed(60.0);
    register_into(registry, desc).is_some()
}

/// Register every built-in species; returns how many were accepted
pub fn register_defaults(mut registry: Option<&mut AnimalTypeRegistry>) -> usize {
    let definitions: [fn(Option<&mut AnimalTypeRegistry>) -> bool; 5] = [
        register_marmot,
        register_mountain_goat,
        register_snow_hare,
        register_golden_eagle,
        register_ibex,
    ];
    definitions
        .iter()
        .filter(|register| register(registry.as_deref_mut()))
        .count()
}

/// Registry pre-filled with the built-in species
pub fn default_registry() -> AnimalTypeRegistry {
    let mut registry = AnimalTypeRegistry::new();
    let count = register_defaults(Some(&mut registry));
    log::debug!("Registered {} built-in animal types", count);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::MountainLayout;
    use crate::tuning::TweakConfig;

    #[derive(Default)]
    struct Recorder {
        rects: usize,
        circles: Vec<[f32; 4]>,
    }

    impl DrawSurface for Recorder {
        fn fill_rect(&mut self, _top_left: Vec2, _size: Vec2, _color: [f32; 4]) {
            self.rects += 1;
        }

        fn fill_circle(&mut self, _center: Vec2, _radius: f32, color: [f32; 4]) {
            self.circles.push(color);
        }
    }

    #[test]
    fn test_default_registry_has_all_species() {
        let registry = default_registry();
        assert_eq!(registry.len(), 5);
        for id in [MARMOT, MOUNTAIN_GOAT, SNOW_HARE, GOLDEN_EAGLE, IBEX] {
            assert!(registry.contains(id));
        }
    }

    #[test]
    fn test_register_defaults_twice_dedups() {
        let mut registry = default_registry();
        register_defaults(Some(&mut registry));
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn test_missing_registry_does_not_abort_loading() {
        assert_eq!(register_defaults(None), 0);
    }

    #[test]
    fn test_every_layer_has_wildlife() {
        let registry = default_registry();
        let layout = MountainLayout::default();
        for layer in layout.iter() {
            assert!(
                registry.iter().any(|d| d.matches_layer(layer)),
                "no species for layer {}",
                layer.index
            );
        }
    }

    #[test]
    fn test_dot_sprite_dims_after_photo() {
        let sprite = DotSprite {
            radius: 5.0,
            color: [1.0, 1.0, 1.0, 1.0],
        };
        let mut surface = Recorder::default();
        let mut animal = AnimalInstance::new(1, SNOW_HARE, Vec2::ZERO, 50.0, 0.0);

        sprite.draw(&animal, &mut surface, Vec2::ZERO);
        animal.photographed = true;
        sprite.draw(&animal, &mut surface, Vec2::ZERO);

        assert_eq!(surface.circles[0][3], 1.0);
        assert_eq!(surface.circles[1][3], 0.5);
        assert_eq!(surface.rects, 0);
    }

    #[test]
    fn test_soaring_only_when_airborne() {
        let hook = Soaring {
            amplitude: 40.0,
            wavelength: 300.0,
        };
        let tweaks = TweakConfig::new();
        let ctx = AnimalContext {
            player_pos: Vec2::ZERO,
            layer_width: 1000.0,
            dt: 0.1,
            tweaks: &tweaks,
        };

        let mut perched = AnimalInstance::new(1, GOLDEN_EAGLE, Vec2::new(0.0, 100.0), 90.0, 0.0);
        hook.update(&mut perched, &ctx);
        assert_eq!(perched.pos.y, 100.0);

        let mut flying = perched.clone();
        flying.state = crate::sim::animal::AnimalState::Moving;
        hook.update(&mut flying, &ctx);
        assert!((flying.pos.y - 104.0).abs() < 1e-4);
    }
}
