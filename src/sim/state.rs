//! Simulation state: the body collection and everything it owns
//!
//! Bodies are kept in insertion order. That order is the rendering order
//! and also fixes which body of a colliding pair gets moved.

use serde::{Deserialize, Serialize};

use super::body::{Body, BodyId, Color, ForceId};
use super::clock::{Clock, SystemClock};
use super::timer::{ExpiryHandle, Timers};
use super::vector::Vector2;
use crate::error::{Error, Result};
use crate::feed::FeedEvent;
use crate::renderer::{Frame, Renderer};
use crate::settings::Settings;

/// One spawned label in the activity log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub label: String,
    pub color: Color,
}

/// Display-only counters carried alongside the physics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sidecar {
    /// Feed events seen (spawns and growths)
    pub counter: u64,
    /// Spawned labels, oldest first
    pub log: Vec<LogEntry>,
}

/// The simulated surface and its bodies
#[derive(Debug)]
pub struct Simulation<C: Clock = SystemClock> {
    pub(super) settings: Settings,
    pub(super) clock: C,
    pub(super) width: f64,
    pub(super) height: f64,
    pub(super) bodies: Vec<Body>,
    pub(super) timers: Timers,
    pub(super) sidecar: Sidecar,
    pub(super) time_ticks: u64,
    /// Wider than `BodyId` so the allocator can run off the end without wrapping
    next_id: u64,
}

impl<C: Clock> Simulation<C> {
    pub fn new(settings: Settings, clock: C) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            width: settings.width,
            height: settings.height,
            settings,
            clock,
            bodies: Vec::new(),
            timers: Timers::new(),
            sidecar: Sidecar::default(),
            time_ticks: 0,
            next_id: 1,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn sidecar(&self) -> &Sidecar {
        &self.sidecar
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    /// Ticks run so far
    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Allocate a new body ID
    pub fn next_body_id(&mut self) -> Result<BodyId> {
        let id = u32::try_from(self.next_id).map_err(|_| Error::IdsExhausted)?;
        self.next_id += 1;
        Ok(BodyId(id))
    }

    /// Change the surface size (e.g. after a window resize)
    pub fn resize(&mut self, width: f64, height: f64) -> Result<()> {
        if !width.is_finite() || !height.is_finite() {
            return Err(Error::NonFinite("surface size"));
        }
        if width <= 0.0 || height <= 0.0 {
            return Err(Error::InvalidParam(format!(
                "surface must be positive, got {width}x{height}"
            )));
        }
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Append a body to the end of the collection.
    ///
    /// The radius must lie in `(0, max_radius]` and the motion state must
    /// be finite. If a capacity is configured, the oldest bodies are
    /// evicted to make room.
    pub fn add_body(&mut self, body: Body) -> Result<()> {
        if !body.pos.is_finite() || !body.vel.is_finite() || !body.accel.is_finite() {
            return Err(Error::NonFinite("body motion"));
        }
        if !(body.radius > 0.0 && body.radius <= self.settings.max_radius) {
            return Err(Error::InvalidParam(format!(
                "body radius {} outside (0, {}]",
                body.radius, self.settings.max_radius
            )));
        }
        if self.body(body.id).is_some() {
            return Err(Error::DuplicateBody(body.id));
        }
        // Keep externally built ids from colliding with future allocations
        self.next_id = self.next_id.max(u64::from(body.id.0) + 1);
        self.bodies.push(body);

        if let Some(cap) = self.settings.max_bodies {
            while self.bodies.len() > cap {
                let oldest = self.bodies[0].id;
                self.remove_body(oldest);
                log::info!("Evicted body {} (capacity {})", oldest, cap);
            }
        }
        Ok(())
    }

    /// Remove a body and cancel its pending force expiries
    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        let index = self.bodies.iter().position(|b| b.id == id)?;
        let cancelled = self.timers.cancel_body(id);
        if cancelled > 0 {
            log::debug!("Cancelled {} pending expiries for body {}", cancelled, id);
        }
        Some(self.bodies.remove(index))
    }

    /// Apply a force to a body. A zero duration makes it permanent.
    ///
    /// Returns the expiry handle for timed forces.
    pub fn add_force(
        &mut self,
        id: BodyId,
        force: Vector2,
        duration_ms: u64,
    ) -> Result<Option<ExpiryHandle>> {
        if !force.is_finite() {
            return Err(Error::NonFinite("force"));
        }
        let now = self.clock.now_ms();
        let body = self.body_mut(id).ok_or(Error::UnknownBody(id))?;
        let force_id = body.add_force(force, duration_ms, now);
        if duration_ms == 0 {
            return Ok(None);
        }
        let due = now.saturating_add(duration_ms);
        Ok(Some(self.timers.schedule(due, id, force_id)))
    }

    /// Cancel a pending expiry. The force stays applied, permanently.
    pub fn cancel_force(&mut self, handle: ExpiryHandle) -> bool {
        let Some((body, force)) = self.timers.cancel(handle) else {
            return false;
        };
        if let Some(b) = self.body_mut(body) {
            b.clear_expiry(force);
        }
        true
    }

    /// Fire every expiry due at the current clock time, in due order.
    ///
    /// Returns the number of forces that lapsed.
    pub fn run_due_timers(&mut self) -> usize {
        let now = self.clock.now_ms();
        let mut fired = 0;
        while let Some(expiry) = self.timers.pop_due(now) {
            if self.expire(expiry.body, expiry.force) {
                fired += 1;
            }
        }
        fired
    }

    fn expire(&mut self, body: BodyId, force: ForceId) -> bool {
        match self.body_mut(body) {
            Some(b) => {
                let lapsed = b.expire_force(force);
                log::debug!("Force {:?} on body {} expired", force, body);
                lapsed
            }
            None => false,
        }
    }

    /// Create a body for a new label at the spawn point and give it the
    /// easing and drift forces
    pub fn spawn(&mut self, label: impl Into<String>, color: Color) -> Result<BodyId> {
        let label = label.into();
        let id = self.next_body_id()?;
        let body = Body::new(
            id,
            self.settings.spawn_point,
            self.settings.spawn_radius,
            color.clone(),
            label.clone(),
        );
        self.add_body(body)?;

        let (easing, easing_ms, drift) = (
            self.settings.easing_force,
            self.settings.easing_duration_ms,
            self.settings.drift_force,
        );
        self.add_force(id, easing, easing_ms)?;
        self.add_force(id, drift, 0)?;

        log::info!("Spawned body {} for {:?} ({})", id, label, color);
        self.sidecar.log.push(LogEntry { label, color });
        Ok(id)
    }

    /// Grow the most recently added body carrying `label`.
    ///
    /// Unknown labels and bodies already at the maximum radius are left
    /// alone; returns whether a radius changed.
    pub fn grow(&mut self, label: &str) -> bool {
        let (inc, max) = (self.settings.growth_increment, self.settings.max_radius);
        match self.bodies.iter_mut().rev().find(|b| b.label == label) {
            Some(body) => body.grow(inc, max),
            None => {
                log::debug!("Growth for unknown label {:?} ignored", label);
                false
            }
        }
    }

    /// Apply one feed event. Every event counts towards the sidecar counter.
    pub fn apply(&mut self, event: FeedEvent) -> Result<()> {
        self.sidecar.counter += 1;
        match event {
            FeedEvent::Spawn { label, color } => {
                self.spawn(label, color)?;
            }
            FeedEvent::Growth { label } => {
                self.grow(&label);
            }
        }
        Ok(())
    }

    /// Current state for drawing
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            tick: self.time_ticks,
            width: self.width,
            height: self.height,
            bodies: &self.bodies,
            sidecar: &self.sidecar,
        }
    }

    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) -> Result<()> {
        renderer.render(&self.frame())
    }
}
