//! Bodies and the forces applied to them
//!
//! A body's acceleration is never accumulated across ticks: every `step`
//! rebuilds it from the forces that are still active.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::vector::Vector2;
use crate::error::{Error, Result};

/// Stable body identity, allocated by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyId(pub u32);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of one applied force, unique within its body
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForceId(pub u32);

/// Display color as a `#RRGGBB` hex string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    /// Parse a `#RRGGBB` string. Hex digits may be either case.
    pub fn parse(s: &str) -> Result<Self> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| Error::InvalidParam(format!("color {s:?} must start with '#'")))?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidParam(format!(
                "color {s:?} must be '#' followed by 6 hex digits"
            )));
        }
        Ok(Self(s.to_string()))
    }

    /// Uppercase `#RRGGBB` from channel values
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(format!("#{r:02X}{g:02X}{b:02X}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A force currently acting on a body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedForce {
    pub id: ForceId,
    pub force: Vector2,
    /// Requested duration (0 = permanent)
    pub duration_ms: u64,
    /// Absolute expiry time, `None` for permanent forces
    pub expires_at: Option<u64>,
}

impl AppliedForce {
    /// Impulse removed from acceleration when this force lapses
    #[inline]
    pub fn decay_impulse(&self) -> Vector2 {
        let scale = self.duration_ms as f64 / 1000.0;
        self.force * Vector2::new(scale, scale)
    }
}

/// A simulated disc
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    pub pos: Vector2,
    pub vel: Vector2,
    pub accel: Vector2,
    pub radius: f64,
    pub color: Color,
    /// Display name, also the correlation key for growth events
    pub label: String,
    pub applied_forces: Vec<AppliedForce>,
    next_force_id: u32,
}

impl Body {
    pub fn new(
        id: BodyId,
        pos: Vector2,
        radius: f64,
        color: Color,
        label: impl Into<String>,
    ) -> Self {
        debug_assert!(radius > 0.0, "body radius must be positive");
        Self {
            id,
            pos,
            vel: Vector2::ZERO,
            accel: Vector2::ZERO,
            radius,
            color,
            label: label.into(),
            applied_forces: Vec::new(),
            next_force_id: 1,
        }
    }

    /// Apply a force. A zero duration makes it permanent.
    ///
    /// The body only records the expiry time; the owning simulation is
    /// responsible for calling [`Body::expire_force`] when it lapses.
    pub(crate) fn add_force(
        &mut self,
        force: Vector2,
        duration_ms: u64,
        now_ms: u64,
    ) -> ForceId {
        let id = ForceId(self.next_force_id);
        self.next_force_id += 1;
        let expires_at = (duration_ms > 0).then(|| now_ms.saturating_add(duration_ms));
        self.applied_forces.push(AppliedForce {
            id,
            force,
            duration_ms,
            expires_at,
        });
        id
    }

    /// Remove a lapsed force and subtract its decay impulse from acceleration.
    ///
    /// Returns `false` if the force is not active.
    pub fn expire_force(&mut self, id: ForceId) -> bool {
        let Some(index) = self.applied_forces.iter().position(|f| f.id == id) else {
            return false;
        };
        let lapsed = self.applied_forces.remove(index);
        self.accel -= lapsed.decay_impulse();
        true
    }

    /// Make a force permanent (its expiry was cancelled)
    pub fn clear_expiry(&mut self, id: ForceId) {
        if let Some(f) = self.applied_forces.iter_mut().find(|f| f.id == id) {
            f.expires_at = None;
        }
    }

    pub fn has_force(&self, id: ForceId) -> bool {
        self.applied_forces.iter().any(|f| f.id == id)
    }

    /// Integrate one tick: a = Σforces, v += a, p += v
    pub fn step(&mut self) {
        self.accel = self
            .applied_forces
            .iter()
            .fold(Vector2::ZERO, |sum, f| sum + f.force);
        self.vel += self.accel;
        self.pos += self.vel;
    }

    /// Grow the radius by `increment`, capped at `max_radius`.
    ///
    /// Returns `false` (and does nothing) once the cap is reached.
    pub fn grow(&mut self, increment: f64, max_radius: f64) -> bool {
        if self.radius >= max_radius {
            return false;
        }
        self.radius = (self.radius + increment).min(max_radius);
        true
    }
}
