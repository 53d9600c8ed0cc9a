//! 2D vector helpers
//!
//! `glam::DVec2` already covers add/subtract/scale; this adds the few
//! operations the collision code needs that glam does not name.

pub use glam::DVec2 as Vector2;

/// Extra vector operations used by bodies and collisions
pub trait VectorExt: Copy {
    /// Copy with the x component negated
    fn inverted_x(self) -> Self;
    /// Copy with the y component negated
    fn inverted_y(self) -> Self;
    /// Sum of absolute coordinate differences
    fn manhattan_distance(self, other: Self) -> f64;
    /// Unit vector, or `(1, 0)` for the zero vector
    fn normalized_or_x(self) -> Self;
}

impl VectorExt for Vector2 {
    #[inline]
    fn inverted_x(self) -> Self {
        Vector2::new(-self.x, self.y)
    }

    #[inline]
    fn inverted_y(self) -> Self {
        Vector2::new(self.x, -self.y)
    }

    #[inline]
    fn manhattan_distance(self, other: Self) -> f64 {
        (self - other).abs().element_sum()
    }

    #[inline]
    fn normalized_or_x(self) -> Self {
        self.try_normalize().unwrap_or(Vector2::X)
    }
}
