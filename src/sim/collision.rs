//! Collision detection and response for axis-aligned boxes
//!
//! Boxes are stored as center + full size. Touching edges do not count as
//! overlap. Resolution is soft: only a fraction of the smaller-axis
//! penetration is removed per call, so a body sinking into a rock is eased
//! out over a few ticks instead of snapping.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::PUSH_OUT_FRACTION;

/// Axis-aligned bounding box (center/size representation)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    #[inline]
    pub fn half(&self) -> Vec2 {
        self.size * 0.5
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half()
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half()
    }

    /// Same box moved to a new center
    pub fn at(&self, center: Vec2) -> Self {
        Self { center, size: self.size }
    }
}

/// Result of a resolve call
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the boxes overlapped
    pub hit: bool,
    /// Unit axis the player was pushed along (pointing away from the obstacle)
    pub normal: Vec2,
    /// Overlap depth on the resolving axis before correction
    pub penetration: f32,
    /// Offset applied to the player's center
    pub correction: Vec2,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
            correction: Vec2::ZERO,
        }
    }
}

/// True iff the boxes intersect on both axes (strictly)
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    let (a_min, a_max) = (a.min(), a.max());
    let (b_min, b_max) = (b.min(), b.max());

    let disjoint = a_max.x <= b_min.x || a_min.x >= b_max.x || a_max.y <= b_min.y || a_min.y >= b_max.y;
    !disjoint
}

/// Overlap depth on each axis, or `None` when the boxes are apart
pub fn penetration(a: &Aabb, b: &Aabb) -> Option<Vec2> {
    if !overlaps(a, b) {
        return None;
    }
    let delta = (a.center - b.center).abs();
    Some(a.half() + b.half() - delta)
}

/// Push `player` out of `obstacle` along the axis of least penetration.
///
/// Moves the player by `PUSH_OUT_FRACTION` of that axis' overlap, in the
/// direction of the obstacle-to-player center delta. The obstacle is never
/// moved. No-op when the boxes do not overlap.
pub fn resolve(player: &mut Aabb, obstacle: &Aabb) -> CollisionResult {
    resolve_with_fraction(player, obstacle, PUSH_OUT_FRACTION)
}

/// `resolve` with an explicit correction fraction
pub fn resolve_with_fraction(player: &mut Aabb, obstacle: &Aabb, fraction: f32) -> CollisionResult {
    let Some(depth) = penetration(player, obstacle) else {
        return CollisionResult::miss();
    };

    let delta = player.center - obstacle.center;
    // Centers that coincide push toward +axis
    let sign = |d: f32| if d < 0.0 { -1.0 } else { 1.0 };

    let (normal, pen) = if depth.x < depth.y {
        (Vec2::new(sign(delta.x), 0.0), depth.x)
    } else {
        (Vec2::new(0.0, sign(delta.y)), depth.y)
    };

    let correction = normal * pen * fraction;
    player.center += correction;

    CollisionResult {
        hit: true,
        normal,
        penetration: pen,
        correction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn boxed(x: f32, y: f32, w: f32, h: f32) -> Aabb {
        Aabb::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_overlap_basic() {
        assert!(overlaps(&boxed(0.0, 0.0, 10.0, 10.0), &boxed(5.0, 5.0, 10.0, 10.0)));
        assert!(!overlaps(&boxed(0.0, 0.0, 10.0, 10.0), &boxed(20.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        // Right edge of a at x=5, left edge of b at x=5
        assert!(!overlaps(&boxed(0.0, 0.0, 10.0, 10.0), &boxed(10.0, 0.0, 10.0, 10.0)));
        assert!(!overlaps(&boxed(0.0, 0.0, 10.0, 10.0), &boxed(0.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_resolve_pushes_along_smaller_axis() {
        // Player sits slightly right of the obstacle: x overlap 2, y overlap 10
        let mut player = boxed(8.0, 0.0, 10.0, 10.0);
        let obstacle = boxed(0.0, 0.0, 10.0, 10.0);

        let result = resolve(&mut player, &obstacle);
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::X);
        assert!((result.penetration - 2.0).abs() < 1e-5);
        assert!((player.center.x - (8.0 + 2.0 * PUSH_OUT_FRACTION)).abs() < 1e-5);
        assert_eq!(player.center.y, 0.0);
    }

    #[test]
    fn test_resolve_pushes_up_when_above() {
        let mut player = boxed(0.0, -9.0, 10.0, 10.0);
        let obstacle = boxed(0.0, 0.0, 10.0, 10.0);

        let result = resolve(&mut player, &obstacle);
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::NEG_Y);
        assert!(player.center.y < -9.0);
    }

    #[test]
    fn test_resolve_is_soft() {
        let mut player = boxed(6.0, 0.0, 10.0, 10.0);
        let obstacle = boxed(0.0, 0.0, 10.0, 10.0);

        resolve(&mut player, &obstacle);
        // One call does not fully separate
        assert!(overlaps(&player, &obstacle));

        for _ in 0..60 {
            resolve(&mut player, &obstacle);
        }
        assert!(player.center.x > 6.0);
        assert!(player.center.x <= 10.0 + 1e-3);
    }

    #[test]
    fn test_resolve_no_overlap_is_noop() {
        let mut player = boxed(30.0, 30.0, 10.0, 10.0);
        let obstacle = boxed(0.0, 0.0, 10.0, 10.0);
        let before = (player, obstacle);

        let result = resolve(&mut player, &obstacle);
        assert!(!result.hit);
        assert_eq!((player, obstacle), before);
    }

    proptest! {
        #[test]
        fn prop_disjoint_boxes_unchanged(
            x in -500.0f32..500.0,
            y in -500.0f32..500.0,
            w in 1.0f32..50.0,
            h in 1.0f32..50.0,
        ) {
            // Obstacle placed strictly to the right of the player
            let mut player = boxed(x, y, w, h);
            let obstacle = boxed(x + w + 1.0, y, w, h);
            let before = player;

            let result = resolve(&mut player, &obstacle);
            prop_assert!(!result.hit);
            prop_assert_eq!(player, before);
        }
    }
}
