//! Simulation settings
//!
//! Loaded from a JSON file; any field left out takes its default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};
use crate::sim::Vector2;

/// Tunable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Surface ===
    pub width: f64,
    pub height: f64,

    // === Spawning ===
    /// Where new bodies appear
    pub spawn_point: Vector2,
    pub spawn_radius: f64,
    /// Radius added per growth event
    pub growth_increment: f64,
    pub max_radius: f64,
    /// Short-lived push given to every new body
    pub easing_force: Vector2,
    pub easing_duration_ms: u64,
    /// Permanent downward drift given to every new body
    pub drift_force: Vector2,

    // === Scheduling ===
    pub tick_interval_ms: u64,
    /// Maximum ticks per driver advance before backlog is dropped
    pub max_substeps: u32,

    // === Capacity ===
    /// Oldest bodies are evicted beyond this count. `None` keeps every body.
    pub max_bodies: Option<usize>,

    // === Feed ===
    /// Seed for label color generation
    pub seed: u64,
    /// Simulated time between replayed feed events
    pub replay_interval_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: SURFACE_WIDTH,
            height: SURFACE_HEIGHT,

            spawn_point: Vector2::new(SPAWN_X, SPAWN_Y),
            spawn_radius: SPAWN_RADIUS,
            growth_increment: GROWTH_INCREMENT,
            max_radius: MAX_RADIUS,
            easing_force: Vector2::new(EASING_FORCE.0, EASING_FORCE.1),
            easing_duration_ms: EASING_DURATION_MS,
            drift_force: Vector2::new(DRIFT_FORCE.0, DRIFT_FORCE.1),

            tick_interval_ms: TICK_INTERVAL_MS,
            max_substeps: MAX_SUBSTEPS,

            max_bodies: None,

            seed: 0,
            replay_interval_ms: REPLAY_INTERVAL_MS,
        }
    }
}

impl Settings {
    /// Check ranges and finiteness of every numeric field
    pub fn validate(&self) -> Result<()> {
        let scalars = [
            ("width", self.width),
            ("height", self.height),
            ("spawn_radius", self.spawn_radius),
            ("growth_increment", self.growth_increment),
            ("max_radius", self.max_radius),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(Error::NonFinite(name));
            }
        }
        let vectors = [
            ("spawn_point", self.spawn_point),
            ("easing_force", self.easing_force),
            ("drift_force", self.drift_force),
        ];
        for (name, value) in vectors {
            if !value.is_finite() {
                return Err(Error::NonFinite(name));
            }
        }

        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(Error::InvalidParam(format!(
                "surface must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.spawn_radius <= 0.0 {
            return Err(Error::InvalidParam("spawn_radius must be > 0".into()));
        }
        if self.growth_increment < 0.0 {
            return Err(Error::InvalidParam("growth_increment must be >= 0".into()));
        }
        if self.max_radius < self.spawn_radius {
            return Err(Error::InvalidParam(
                "max_radius must be >= spawn_radius".into(),
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(Error::InvalidParam("tick_interval_ms must be > 0".into()));
        }
        if self.max_substeps == 0 {
            return Err(Error::InvalidParam("max_substeps must be > 0".into()));
        }
        if self.max_bodies == Some(0) {
            return Err(Error::InvalidParam("max_bodies must be > 0 when set".into()));
        }
        Ok(())
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}
