//! Headless renderer writing one JSON line per frame

use std::io::Write;

use serde::Serialize;

use super::{Frame, Renderer};
use crate::error::Result;
use crate::sim::LogEntry;

/// Drawable view of one body
#[derive(Debug, Clone, Serialize)]
pub struct BodyView<'a> {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: &'a str,
    pub label: &'a str,
}

/// Serializable copy of a frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub tick: u64,
    pub width: f64,
    pub height: f64,
    pub counter: u64,
    pub bodies: Vec<BodyView<'a>>,
    pub log: &'a [LogEntry],
}

impl<'a> Snapshot<'a> {
    pub fn from_frame(frame: &Frame<'a>) -> Self {
        let bodies = frame
            .bodies
            .iter()
            .map(|b| BodyView {
                id: b.id.0,
                x: b.pos.x,
                y: b.pos.y,
                radius: b.radius,
                color: b.color.as_str(),
                label: &b.label,
            })
            .collect();
        Self {
            tick: frame.tick,
            width: frame.width,
            height: frame.height,
            counter: frame.sidecar.counter,
            bodies,
            log: &frame.sidecar.log,
        }
    }
}

/// Writes each frame as a JSON line
#[derive(Debug)]
pub struct SnapshotRenderer<W: Write> {
    out: W,
    frames: u64,
}

impl<W: Write> SnapshotRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, frames: 0 }
    }

    /// Frames written so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for SnapshotRenderer<W> {
    fn render(&mut self, frame: &Frame<'_>) -> Result<()> {
        serde_json::to_writer(&mut self.out, &Snapshot::from_frame(frame))?;
        writeln!(self.out)?;
        self.frames += 1;
        Ok(())
    }
}
