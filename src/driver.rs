//! Fixed-step driver loop
//!
//! Decouples the tick cadence from however often the host calls
//! [`Driver::advance`]: elapsed clock time is accumulated and spent in
//! whole tick intervals, then one frame is rendered.

use crate::error::Result;
use crate::renderer::Renderer;
use crate::settings::Settings;
use crate::sim::{Clock, Simulation};

/// Fixed-interval tick scheduler
#[derive(Debug, Clone)]
pub struct Driver {
    tick_interval_ms: u64,
    /// Maximum ticks per advance to prevent spiral of death
    max_substeps: u32,
    accumulator_ms: u64,
    last_ms: Option<u64>,
    total_ticks: u64,
}

impl Driver {
    pub fn new(settings: &Settings) -> Self {
        Self {
            tick_interval_ms: settings.tick_interval_ms.max(1),
            max_substeps: settings.max_substeps.max(1),
            accumulator_ms: 0,
            last_ms: None,
            total_ticks: 0,
        }
    }

    /// Ticks run by this driver so far
    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    /// Run the ticks owed since the last call, then render once.
    ///
    /// The first call only records the starting time. Backlog beyond
    /// `max_substeps` ticks is dropped. Returns the number of ticks run.
    pub fn advance<C, R>(&mut self, sim: &mut Simulation<C>, renderer: &mut R) -> Result<u32>
    where
        C: Clock,
        R: Renderer + ?Sized,
    {
        let now = sim.now_ms();
        let elapsed = self.last_ms.map_or(0, |last| now.saturating_sub(last));
        self.last_ms = Some(now);
        self.accumulator_ms = self.accumulator_ms.saturating_add(elapsed);

        let mut substeps = 0;
        while self.accumulator_ms >= self.tick_interval_ms && substeps < self.max_substeps {
            sim.tick();
            self.accumulator_ms -= self.tick_interval_ms;
            substeps += 1;
        }
        if self.accumulator_ms >= self.tick_interval_ms {
            log::debug!(
                "Dropping {} ms of tick backlog",
                self.accumulator_ms - self.accumulator_ms % self.tick_interval_ms
            );
            self.accumulator_ms %= self.tick_interval_ms;
        }
        self.total_ticks += u64::from(substeps);

        sim.render(renderer)?;
        Ok(substeps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Frame;
    use crate::sim::ManualClock;

    #[derive(Default)]
    struct CountingRenderer {
        frames: Vec<u64>,
    }

    impl Renderer for CountingRenderer {
        fn render(&mut self, frame: &Frame<'_>) -> Result<()> {
            self.frames.push(frame.tick);
            Ok(())
        }
    }

    fn setup() -> (Driver, Simulation<ManualClock>, ManualClock) {
        let settings = Settings {
            tick_interval_ms: 4,
            max_substeps: 8,
            ..Default::default()
        };
        let clock = ManualClock::new();
        let driver = Driver::new(&settings);
        let sim = Simulation::new(settings, clock.clone()).unwrap();
        (driver, sim, clock)
    }

    #[test]
    fn test_first_advance_only_renders() {
        let (mut driver, mut sim, _) = setup();
        let mut r = CountingRenderer::default();
        assert_eq!(driver.advance(&mut sim, &mut r).unwrap(), 0);
        assert_eq!(r.frames, vec![0]);
    }

    #[test]
    fn test_accumulates_partial_intervals() {
        let (mut driver, mut sim, clock) = setup();
        let mut r = CountingRenderer::default();
        driver.advance(&mut sim, &mut r).unwrap();

        clock.advance(10);
        assert_eq!(driver.advance(&mut sim, &mut r).unwrap(), 2);
        clock.advance(2);
        assert_eq!(driver.advance(&mut sim, &mut r).unwrap(), 1);
        clock.advance(1);
        assert_eq!(driver.advance(&mut sim, &mut r).unwrap(), 0);

        assert_eq!(sim.time_ticks(), 3);
        assert_eq!(driver.total_ticks(), 3);
        // One render per advance regardless of ticks
        assert_eq!(r.frames, vec![0, 2, 3, 3]);
    }

    #[test]
    fn test_backlog_beyond_substep_cap_is_dropped() {
        let (mut driver, mut sim, clock) = setup();
        let mut r = CountingRenderer::default();
        driver.advance(&mut sim, &mut r).unwrap();

        clock.advance(1000);
        assert_eq!(driver.advance(&mut sim, &mut r).unwrap(), 8);
        clock.advance(3);
        assert_eq!(driver.advance(&mut sim, &mut r).unwrap(), 0);
        clock.advance(1);
        assert_eq!(driver.advance(&mut sim, &mut r).unwrap(), 1);
    }
}
