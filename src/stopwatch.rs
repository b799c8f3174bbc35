//! The start/stop accumulator shared by `SingleTimer` and every slot of a
//! `SlotBank`.

use crate::clock::{ClockSource, Mark};

/// Snapshot of one stopwatch's cumulative totals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimerStats {
    /// Number of accepted `start` calls
    pub calls: u64,
    /// Cumulative wall-clock time in milliseconds
    pub user_ms: u64,
    /// Cumulative CPU time in milliseconds
    pub sys_ms: u64,
}

impl TimerStats {
    /// Per-call wall time, integer division first (7 ms / 2 calls = 3.0).
    pub fn truncated_user_per_call(&self) -> f64 {
        if self.calls == 0 {
            return 0.0;
        }
        (self.user_ms / self.calls) as f64
    }

    /// Per-call wall time as a real quotient (7 ms / 2 calls = 3.5).
    pub fn mean_user_per_call(&self) -> f64 {
        if self.calls == 0 {
            return 0.0;
        }
        self.user_ms as f64 / self.calls as f64
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Stopwatch {
    stats: TimerStats,
    // Some(..) while running
    running: Option<Mark>,
}

impl Stopwatch {
    pub(crate) fn stats(&self) -> TimerStats {
        self.stats
    }

    pub(crate) fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Idle -> Running. Returns false, changing nothing, if already running.
    #[inline(always)]
    pub(crate) fn start<C: ClockSource>(&mut self, clock: &C) -> bool {
        if self.running.is_some() {
            return false;
        }
        self.stats.calls += 1;
        self.running = Some(Mark::now(clock));
        true
    }

    /// Running -> Idle. Returns the wall ms of this cycle, or None if idle.
    #[inline(always)]
    pub(crate) fn stop<C: ClockSource>(&mut self, clock: &C) -> Option<u64> {
        let mark = self.running.take()?;
        let (wall_ms, cpu_ms) = mark.elapsed_ms(clock);
        self.stats.user_ms += wall_ms;
        self.stats.sys_ms += cpu_ms;
        Some(wall_ms)
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}
