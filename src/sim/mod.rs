//! Deterministic simulation module
//!
//! All physics lives here:
//! - Stable iteration order (collection order = insertion order)
//! - Time only through an injected [`Clock`]
//! - No rendering or feed I/O

pub mod body;
pub mod clock;
pub mod collision;
pub mod state;
pub mod tick;
pub mod timer;
pub mod vector;

pub use body::{AppliedForce, Body, BodyId, Color, ForceId};
pub use clock::{Clock, ManualClock, SystemClock};
pub use collision::Wall;
pub use state::{LogEntry, Sidecar, Simulation};
pub use tick::TickSummary;
pub use timer::{Expiry, ExpiryHandle, Timers};
pub use vector::{Vector2, VectorExt};
