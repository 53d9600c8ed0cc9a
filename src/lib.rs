//! Bouncing Balls - feed-driven disc simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, forces, collisions, ticks)
//! - `driver`: Fixed-step tick scheduling
//! - `feed`: Spawn/growth events and label tracking
//! - `renderer`: Frame interface and a headless JSON renderer
//! - `settings`: Data-driven configuration

pub mod driver;
pub mod error;
pub mod feed;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use driver::Driver;
pub use error::{Error, Result};
pub use feed::{FeedEvent, LabelTracker};
pub use renderer::{Frame, Renderer, SnapshotRenderer};
pub use settings::Settings;
pub use sim::{Body, BodyId, Color, Simulation, Vector2};

/// Default configuration constants
pub mod consts {
    /// Surface dimensions
    pub const SURFACE_WIDTH: f64 = 1280.0;
    pub const SURFACE_HEIGHT: f64 = 720.0;

    /// Spawn point for new bodies
    pub const SPAWN_X: f64 = 300.0;
    pub const SPAWN_Y: f64 = 200.0;
    pub const SPAWN_RADIUS: f64 = 20.0;

    /// Radius added per growth event, and the cap
    pub const GROWTH_INCREMENT: f64 = 2.0;
    pub const MAX_RADIUS: f64 = 100.0;

    /// Short push every new body gets (per-tick acceleration)
    pub const EASING_FORCE: (f64, f64) = (0.05, 0.03);
    pub const EASING_DURATION_MS: u64 = 1000;
    /// Permanent downward drift
    pub const DRIFT_FORCE: (f64, f64) = (0.0, 0.18);

    /// Tick cadence (the browser's minimum timer interval)
    pub const TICK_INTERVAL_MS: u64 = 4;
    /// Maximum ticks per driver advance
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Simulated gap between replayed feed events
    pub const REPLAY_INTERVAL_MS: u64 = 250;
}
