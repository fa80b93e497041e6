//! # Wall-Clock Pacing
//!
//! Throttles a run loop so emulated cycles track a target clock rate. Timing
//! accuracy lives entirely in the bus cycle count; pacing only stops a fast
//! host from racing ahead, and is off unless
//! [`crate::RunOptions::skip_timing`] is cleared.

use std::thread;
use std::time::{Duration, Instant};

/// Do not bother sleeping for less than this.
const MIN_SLEEP: Duration = Duration::from_millis(1);

/// Sleeps the caller so that elapsed host time keeps up with elapsed cycles.
#[derive(Debug)]
pub struct Pacer {
    clock_hz: u32,
    start: Instant,
    start_cycles: u64,
}

impl Pacer {
    /// Starts pacing from `cycles` at `clock_hz` (clamped to at least 1 Hz).
    pub fn new(clock_hz: u32, cycles: u64) -> Self {
        Self {
            clock_hz: clock_hz.max(1),
            start: Instant::now(),
            start_cycles: cycles,
        }
    }

    pub fn clock_hz(&self) -> u32 {
        self.clock_hz
    }

    /// Host time the hardware would have needed for `cycles` cycles.
    pub fn cycles_to_duration(&self, cycles: u64) -> Duration {
        let nanos = cycles as u128 * 1_000_000_000 / self.clock_hz as u128;
        Duration::from_nanos(nanos.min(u64::MAX as u128) as u64)
    }

    /// How far the emulation is ahead of real time at cycle count `cycles`.
    pub fn ahead_by(&self, cycles: u64) -> Duration {
        let target = self.cycles_to_duration(cycles.saturating_sub(self.start_cycles));
        target.saturating_sub(self.start.elapsed())
    }

    /// Sleeps off any lead of at least a millisecond.
    pub fn pace(&mut self, cycles: u64) {
        let lead = self.ahead_by(cycles);
        if lead >= MIN_SLEEP {
            thread::sleep(lead);
        }
    }
}
