//! Clock sources for the timers.
//!
//! Every timer samples two counters at `start` and `stop`:
//! - a monotonic wall clock (`ClockSource::wall`)
//! - a process CPU-time counter with a known tick rate
//!   (`ClockSource::cpu_ticks` / `ClockSource::ticks_per_second`)
//!
//! `SystemClock` reads the real OS counters, `ManualClock` only moves when
//! told to and is what the tests drive.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Provider of wall-clock and CPU-time samples.
pub trait ClockSource {
    /// Monotonic wall time since an arbitrary, fixed origin.
    fn wall(&self) -> Duration;

    /// Process CPU time in ticks.
    fn cpu_ticks(&self) -> u64;

    /// Number of `cpu_ticks` per second.
    fn ticks_per_second(&self) -> u64;
}

// ============================================================================
// System clock
// ============================================================================

/// Real clocks: `Instant` for wall time, process CPU time from the OS.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockSource for SystemClock {
    #[inline(always)]
    fn wall(&self) -> Duration {
        self.origin.elapsed()
    }

    #[inline(always)]
    fn cpu_ticks(&self) -> u64 {
        platform::process_cpu_nanos()
    }

    fn ticks_per_second(&self) -> u64 {
        platform::TICKS_PER_SECOND
    }
}

#[cfg(unix)]
mod platform {
    /// CLOCK_PROCESS_CPUTIME_ID reports nanoseconds.
    pub const TICKS_PER_SECOND: u64 = 1_000_000_000;

    /// Read the CPU time consumed by the whole process.
    pub fn process_cpu_nanos() -> u64 {
        unsafe {
            let mut ts: libc::timespec = std::mem::zeroed();
            if libc::clock_gettime(libc::CLOCK_PROCESS_CPUTIME_ID, &mut ts) != 0 {
                return 0;
            }
            (ts.tv_sec as u64)
                .saturating_mul(TICKS_PER_SECOND)
                .saturating_add(ts.tv_nsec as u64)
        }
    }
}

#[cfg(not(unix))]
mod platform {
    // No process CPU counter wired up here; Sys time reports as zero.
    pub const TICKS_PER_SECOND: u64 = 1_000;

    pub fn process_cpu_nanos() -> u64 {
        0
    }
}

// ============================================================================
// Manual clock
// ============================================================================

#[derive(Clone, Copy, Debug, Default)]
struct Readings {
    wall: Duration,
    cpu_ticks: u64,
}

/// Clock that only advances when told to.
///
/// Clones share the same readings, so a test can hand one clone to a timer
/// and keep another to move time forward.
#[derive(Clone, Debug)]
pub struct ManualClock {
    readings: Rc<Cell<Readings>>,
    ticks_per_second: u64,
}

impl ManualClock {
    /// Clock at zero with millisecond CPU ticks.
    pub fn new() -> Self {
        Self::with_ticks_per_second(1_000)
    }

    pub fn with_ticks_per_second(ticks_per_second: u64) -> Self {
        Self {
            readings: Rc::new(Cell::new(Readings::default())),
            ticks_per_second,
        }
    }

    /// Move wall time forward by `wall` and the CPU counter by `cpu_ticks`.
    pub fn advance(&self, wall: Duration, cpu_ticks: u64) {
        let mut r = self.readings.get();
        r.wall += wall;
        r.cpu_ticks = r.cpu_ticks.saturating_add(cpu_ticks);
        self.readings.set(r);
    }

    /// Move wall time forward by `ms` milliseconds, CPU time unchanged.
    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms), 0);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockSource for ManualClock {
    fn wall(&self) -> Duration {
        self.readings.get().wall
    }

    fn cpu_ticks(&self) -> u64 {
        self.readings.get().cpu_ticks
    }

    fn ticks_per_second(&self) -> u64 {
        self.ticks_per_second
    }
}

// ============================================================================
// Shared sampling logic
// ============================================================================

/// Clock samples taken when a timer starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Mark {
    wall: Duration,
    cpu_ticks: u64,
}

impl Mark {
    pub(crate) fn now<C: ClockSource>(clock: &C) -> Self {
        Self {
            cpu_ticks: clock.cpu_ticks(),
            wall: clock.wall(),
        }
    }

    /// Elapsed (wall ms, cpu ms) since this mark, both truncated toward zero.
    pub(crate) fn elapsed_ms<C: ClockSource>(&self, clock: &C) -> (u64, u64) {
        let cpu_now = clock.cpu_ticks();
        let wall_now = clock.wall();

        let wall_ms = wall_now.saturating_sub(self.wall).as_millis() as u64;
        let cpu_ms = ticks_to_ms(cpu_now.saturating_sub(self.cpu_ticks), clock.ticks_per_second());
        (wall_ms, cpu_ms)
    }
}

/// Convert a tick delta into whole milliseconds.
pub(crate) fn ticks_to_ms(ticks: u64, ticks_per_second: u64) -> u64 {
    if ticks_per_second == 0 {
        return 0;
    }
    (ticks as u128 * 1000 / ticks_per_second as u128) as u64
}
