//! Bouncing Balls replay runner
//!
//! Reads feed lines from stdin, plays them into the simulation on a
//! simulated clock and writes one JSON snapshot per frame to stdout.
//!
//! Usage: `bouncing-balls [settings.json] < feed.jsonl`
//!
//! Each line is either a feed event (`{"label": ..., "color": ...}`) or a
//! raw stream record (`{"database": ...}`) that gets a color assigned.

use std::io::{self, BufRead, BufWriter, Write};

use anyhow::{Context, Result};
use log::{debug, info, warn};

use bouncing_balls::sim::ManualClock;
use bouncing_balls::{Driver, FeedEvent, LabelTracker, Settings, Simulation, SnapshotRenderer};

fn main() -> Result<()> {
    env_logger::init();
    info!("Bouncing Balls replay starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(&path).with_context(|| format!("loading {path}"))?,
        None => {
            info!("Using default settings");
            Settings::default()
        }
    };

    let clock = ManualClock::new();
    let mut sim = Simulation::new(settings.clone(), clock.clone())?;
    let mut driver = Driver::new(&settings);
    let mut tracker = LabelTracker::new(settings.seed);
    let mut renderer = SnapshotRenderer::new(BufWriter::new(io::stdout().lock()));

    driver.advance(&mut sim, &mut renderer)?;

    let mut skipped = 0u64;
    for (n, line) in io::stdin().lock().lines().enumerate() {
        let line = line.context("reading feed")?;
        if line.trim().is_empty() {
            continue;
        }
        let event = FeedEvent::decode_line(&line, &mut tracker);
        match event {
            Ok(event) => {
                debug!("Line {}: {:?}", n + 1, event);
                sim.apply(event)?;
            }
            Err(e) if e.is_non_fatal() => {
                warn!("Skipping feed line {}: {}", n + 1, e);
                skipped += 1;
                continue;
            }
            Err(e) => return Err(e.into()),
        }

        // Spend the gap between events in driver-sized slices
        let mut remaining = settings.replay_interval_ms;
        while remaining > 0 {
            let slice = remaining.min(settings.tick_interval_ms);
            clock.advance(slice);
            remaining -= slice;
            driver.advance(&mut sim, &mut renderer)?;
        }
    }

    info!(
        "Replay finished: {} events, {} skipped, {} bodies, {} ticks, {} frames",
        sim.sidecar().counter,
        skipped,
        sim.bodies().len(),
        driver.total_ticks(),
        renderer.frames()
    );
    renderer.into_inner().flush().context("flushing snapshots")?;
    Ok(())
}
