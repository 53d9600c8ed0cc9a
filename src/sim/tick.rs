//! One simulation tick
//!
//! Every body is integrated, kept in bounds and checked against every
//! other body, in collection order. This is a full O(n²) scan; resolution
//! order depends on collection order, so any spatial acceleration here
//! would change results for clusters of three or more bodies.

use super::body::Body;
use super::clock::Clock;
use super::state::Simulation;

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Forces that lapsed at the start of the tick
    pub expired: usize,
    pub wall_hits: usize,
    /// Pairs separated (a pair can be resolved once from each side)
    pub collisions: usize,
}

impl<C: Clock> Simulation<C> {
    /// Advance the simulation by one tick.
    ///
    /// Due force expiries fire first, so every body in the tick sees the
    /// same set of active forces. Then, for body `i` in order: step,
    /// boundary check, and a collision check against every other body `j`
    /// where body `i` pushes body `j` out.
    pub fn tick(&mut self) -> TickSummary {
        let mut summary = TickSummary {
            expired: self.run_due_timers(),
            ..Default::default()
        };
        self.time_ticks += 1;

        let (width, height) = (self.width, self.height);
        let n = self.bodies.len();
        for i in 0..n {
            let body = &mut self.bodies[i];
            body.step();
            if body.collides_with_boundary(width, height).is_some() {
                summary.wall_hits += 1;
            }

            for j in 0..n {
                if j == i {
                    continue;
                }
                let (this, other) = pair_mut(&mut self.bodies, i, j);
                if this.collides_with(other) {
                    log::debug!(
                        "Tick {}: body {} pushes body {}",
                        self.time_ticks,
                        this.id,
                        other.id
                    );
                    this.resolve_collision(other);
                    summary.collisions += 1;
                }
            }
        }
        summary
    }
}

/// Mutable borrows of two distinct bodies, returned as (`i`, `j`)
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert_ne!(i, j);
    if i < j {
        let (head, tail) = bodies.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = bodies.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}
