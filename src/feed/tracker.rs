//! Label tracking for raw activity streams
//!
//! Turns a stream of labels into feed events: the first sighting of a label
//! gets a fresh random color and spawns, later sightings grow. Colors come
//! from a seeded PCG so a replay of the same stream is identical.

use std::collections::{HashMap, HashSet};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Deserialize;

use super::FeedEvent;
use crate::error::{Error, Result};
use crate::sim::Color;

/// Raw record from a page-creation stream; only the wiki name is used
#[derive(Debug, Deserialize)]
struct RawRecord {
    database: String,
}

/// Per-label activity counts and color assignment
#[derive(Debug, Clone)]
pub struct LabelTracker {
    counts: HashMap<String, u64>,
    issued: HashSet<Color>,
    rng: Pcg32,
}

impl LabelTracker {
    pub fn new(seed: u64) -> Self {
        Self {
            counts: HashMap::new(),
            issued: HashSet::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Record one sighting of `label`
    pub fn observe(&mut self, label: &str) -> FeedEvent {
        if let Some(count) = self.counts.get_mut(label) {
            *count += 1;
            return FeedEvent::Growth {
                label: label.to_string(),
            };
        }
        self.counts.insert(label.to_string(), 1);
        FeedEvent::Spawn {
            label: label.to_string(),
            color: self.fresh_color(),
        }
    }

    /// Parse a raw `{"database": ...}` record and observe its label
    pub fn observe_raw(&mut self, json: &str) -> Result<FeedEvent> {
        let record: RawRecord =
            serde_json::from_str(json).map_err(|e| Error::Feed(e.to_string()))?;
        if record.database.trim().is_empty() {
            return Err(Error::Feed("empty database name".into()));
        }
        Ok(self.observe(&record.database))
    }

    /// Sightings of `label` so far
    pub fn count(&self, label: &str) -> u64 {
        self.counts.get(label).copied().unwrap_or(0)
    }

    pub fn label_count(&self) -> usize {
        self.counts.len()
    }

    /// A color never issued before by this tracker
    fn fresh_color(&mut self) -> Color {
        loop {
            let color = Color::from_rgb(self.rng.random(), self.rng.random(), self.rng.random());
            if self.issued.insert(color.clone()) {
                return color;
            }
        }
    }
}
