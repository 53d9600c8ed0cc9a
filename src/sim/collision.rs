//! Collision detection and response
//!
//! Two deliberate simplifications are part of the behavior here:
//! body-body overlap uses Manhattan distance (a diamond, not a circle),
//! and a boundary check corrects at most one wall per call.

use serde::{Deserialize, Serialize};

use super::body::Body;
use super::vector::VectorExt;

/// Surface edge hit by a boundary check, in check order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Left,
    Top,
    Right,
    Bottom,
}

impl Body {
    /// Keep the body inside a `width` x `height` surface.
    ///
    /// Walls are tested left, top, right, bottom and only the first one
    /// violated is handled: the coordinate is clamped to the edge and the
    /// matching velocity component reflected. A corner overlap therefore
    /// takes two calls to fully correct.
    pub fn collides_with_boundary(&mut self, width: f64, height: f64) -> Option<Wall> {
        let r = self.radius;
        if self.pos.x - r < 0.0 {
            self.pos.x = r;
            self.vel = self.vel.inverted_x();
            Some(Wall::Left)
        } else if self.pos.y - r < 0.0 {
            self.pos.y = r;
            self.vel = self.vel.inverted_y();
            Some(Wall::Top)
        } else if self.pos.x + r > width {
            self.pos.x = width - r;
            self.vel = self.vel.inverted_x();
            Some(Wall::Right)
        } else if self.pos.y + r > height {
            self.pos.y = height - r;
            self.vel = self.vel.inverted_y();
            Some(Wall::Bottom)
        } else {
            None
        }
    }

    /// Overlap test: distinct ids and Manhattan distance below the radius sum
    #[inline]
    pub fn collides_with(&self, other: &Body) -> bool {
        other.id != self.id
            && self.pos.manhattan_distance(other.pos) < self.radius + other.radius
    }

    /// Push `other` out to touching distance and swap velocities.
    ///
    /// Only `other` moves. It is placed at exactly `radius + other.radius`
    /// from this body along the line between centers (along +x if the
    /// centers coincide). Velocities are exchanged as for equal masses.
    pub fn resolve_collision(&mut self, other: &mut Body) {
        let reach = self.radius + other.radius;
        let dir = (other.pos - self.pos).normalized_or_x();
        other.pos = self.pos + dir * reach;
        std::mem::swap(&mut self.vel, &mut other.vel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::{BodyId, Color};
    use crate::sim::vector::Vector2;
    use proptest::prelude::*;

    fn ball(id: u32, x: f64, y: f64, radius: f64) -> Body {
        Body::new(
            BodyId(id),
            Vector2::new(x, y),
            radius,
            Color::parse("#FFFFFF").unwrap(),
            format!("ball{id}"),
        )
    }

    #[test]
    fn test_boundary_left_wall() {
        let mut b = ball(1, 5.0, 100.0, 20.0);
        b.vel = Vector2::new(-3.0, 1.0);
        assert_eq!(b.collides_with_boundary(800.0, 600.0), Some(Wall::Left));
        assert_eq!(b.pos.x, 20.0);
        assert_eq!(b.vel, Vector2::new(3.0, 1.0));
    }

    #[test]
    fn test_boundary_bottom_wall() {
        let mut b = ball(1, 400.0, 590.0, 20.0);
        b.vel = Vector2::new(2.0, 4.0);
        assert_eq!(b.collides_with_boundary(800.0, 600.0), Some(Wall::Bottom));
        assert_eq!(b.pos.y, 580.0);
        assert_eq!(b.vel, Vector2::new(2.0, -4.0));
    }

    #[test]
    fn test_boundary_inside_is_untouched() {
        let mut b = ball(1, 400.0, 300.0, 20.0);
        b.vel = Vector2::new(2.0, 4.0);
        assert_eq!(b.collides_with_boundary(800.0, 600.0), None);
        assert_eq!(b.pos, Vector2::new(400.0, 300.0));
        assert_eq!(b.vel, Vector2::new(2.0, 4.0));
    }

    #[test]
    fn test_boundary_corner_corrects_one_axis_per_call() {
        // Past both the left and top walls
        let mut b = ball(1, 5.0, 5.0, 20.0);
        b.vel = Vector2::new(-1.0, -1.0);

        assert_eq!(b.collides_with_boundary(800.0, 600.0), Some(Wall::Left));
        assert_eq!(b.pos, Vector2::new(20.0, 5.0));
        assert_eq!(b.vel, Vector2::new(1.0, -1.0));

        assert_eq!(b.collides_with_boundary(800.0, 600.0), Some(Wall::Top));
        assert_eq!(b.pos, Vector2::new(20.0, 20.0));
        assert_eq!(b.vel, Vector2::new(1.0, 1.0));
    }

    #[test]
    fn test_collides_with_uses_manhattan_distance() {
        let a = ball(1, 0.0, 0.0, 10.0);
        // Euclidean distance ~19.8 < 20, Manhattan 28 >= 20
        let b = ball(2, 14.0, 14.0, 10.0);
        assert!(!a.collides_with(&b));

        let c = ball(3, 19.0, 0.0, 10.0);
        assert!(a.collides_with(&c));
    }

    #[test]
    fn test_collides_with_is_strict() {
        let a = ball(1, 0.0, 0.0, 10.0);
        let b = ball(2, 20.0, 0.0, 10.0);
        assert!(!a.collides_with(&b));
    }

    #[test]
    fn test_never_collides_with_self() {
        let a = ball(1, 0.0, 0.0, 10.0);
        let copy = a.clone();
        assert!(!a.collides_with(&copy));
    }

    #[test]
    fn test_resolve_moves_only_other() {
        let mut a = ball(1, 100.0, 100.0, 20.0);
        let mut b = ball(2, 106.0, 108.0, 20.0);
        a.vel = Vector2::new(1.0, 0.0);
        b.vel = Vector2::new(0.0, -2.0);

        a.resolve_collision(&mut b);

        assert_eq!(a.pos, Vector2::new(100.0, 100.0));
        // Direction (0.6, 0.8) scaled by 40
        assert!((b.pos - Vector2::new(124.0, 132.0)).length() < 1e-9);
        assert_eq!(a.vel, Vector2::new(0.0, -2.0));
        assert_eq!(b.vel, Vector2::new(1.0, 0.0));
    }

    #[test]
    fn test_resolve_coincident_centers_separates_along_x() {
        let mut a = ball(1, 50.0, 50.0, 10.0);
        let mut b = ball(2, 50.0, 50.0, 5.0);
        a.resolve_collision(&mut b);
        assert_eq!(b.pos, Vector2::new(65.0, 50.0));
    }

    proptest! {
        #[test]
        fn prop_collision_is_symmetric(
            ax in -500.0f64..500.0, ay in -500.0f64..500.0, ar in 1.0f64..100.0,
            bx in -500.0f64..500.0, by in -500.0f64..500.0, br in 1.0f64..100.0,
        ) {
            let a = ball(1, ax, ay, ar);
            let b = ball(2, bx, by, br);
            prop_assert_eq!(a.collides_with(&b), b.collides_with(&a));
        }

        #[test]
        fn prop_double_resolve_restores_velocities(
            avx in -10.0f64..10.0, avy in -10.0f64..10.0,
            bvx in -10.0f64..10.0, bvy in -10.0f64..10.0,
            dx in -15.0f64..15.0, dy in -15.0f64..15.0,
        ) {
            let mut a = ball(1, 200.0, 200.0, 20.0);
            let mut b = ball(2, 200.0 + dx, 200.0 + dy, 20.0);
            let (va, vb) = (Vector2::new(avx, avy), Vector2::new(bvx, bvy));
            a.vel = va;
            b.vel = vb;

            a.resolve_collision(&mut b);
            a.resolve_collision(&mut b);

            prop_assert_eq!(a.vel, va);
            prop_assert_eq!(b.vel, vb);
        }

        #[test]
        fn prop_two_body_separation_is_order_stable(
            dx in -15.0f64..15.0, dy in -15.0f64..15.0,
            ar in 5.0f64..40.0, br in 5.0f64..40.0,
        ) {
            let a0 = ball(1, 300.0, 300.0, ar);
            let b0 = ball(2, 300.0 + dx, 300.0 + dy, br);

            let (mut a, mut b) = (a0.clone(), b0.clone());
            a.resolve_collision(&mut b);
            let forward = a.pos.distance(b.pos);

            let (mut a, mut b) = (a0, b0);
            b.resolve_collision(&mut a);
            let backward = a.pos.distance(b.pos);

            prop_assert!((forward - (ar + br)).abs() < 1e-9);
            prop_assert!((forward - backward).abs() < 1e-9);
        }

        #[test]
        fn prop_boundary_contains_corrected_axis(
            x in -200.0f64..1000.0, y in -200.0f64..800.0, r in 1.0f64..100.0,
        ) {
            let (w, h) = (800.0, 600.0);
            let mut b = ball(1, x, y, r);
            match b.collides_with_boundary(w, h) {
                Some(Wall::Left) | Some(Wall::Right) => {
                    prop_assert!(b.pos.x >= r && b.pos.x <= w - r);
                }
                Some(Wall::Top) | Some(Wall::Bottom) => {
                    prop_assert!(b.pos.y >= r && b.pos.y <= h - r);
                }
                None => {
                    prop_assert!(b.pos.x >= r && b.pos.x <= w - r);
                    prop_assert!(b.pos.y >= r && b.pos.y <= h - r);
                }
            }
        }
    }
}
