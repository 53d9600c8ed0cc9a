//! Rendering interface
//!
//! The simulation hands a [`Frame`] to a [`Renderer`] once per driver
//! advance and does not care how it gets drawn.

pub mod snapshot;

pub use snapshot::{BodyView, Snapshot, SnapshotRenderer};

use crate::error::Result;
use crate::sim::{Body, Sidecar};

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Ticks run so far
    pub tick: u64,
    pub width: f64,
    pub height: f64,
    /// Bodies in drawing order
    pub bodies: &'a [Body],
    pub sidecar: &'a Sidecar,
}

/// Draws frames
pub trait Renderer {
    fn render(&mut self, frame: &Frame<'_>) -> Result<()>;
}
