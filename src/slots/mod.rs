//! Fixed-capacity bank of independent stopwatches ("slots").
//!
//! Each slot keeps its own call count and wall/CPU totals. The bank also
//! tracks how far measured wall times landed from caller-supplied
//! predictions (`stop_with_prediction`); those two sums are shared by all
//! slots.

#[cfg(test)]
pub mod test;

use std::fmt::{self, Write};

use crate::clock::{ClockSource, SystemClock};
use crate::config::SLOT_CAPACITY;
use crate::error::{Result, TimerError};
use crate::report::render;
use crate::stopwatch::{Stopwatch, TimerStats};

/// Fixed number of independent stopwatches plus bank-wide prediction sums.
pub struct SlotBank<C: ClockSource = SystemClock> {
    clock: C,
    slots: Box<[Stopwatch]>,
    prediction_error: i64,
    prediction_abs_error: i64,
}

impl<C: ClockSource> SlotBank<C> {
    /// Bank of `SLOT_CAPACITY` idle slots.
    pub fn new(clock: C) -> Self {
        Self::with_capacity(clock, SLOT_CAPACITY)
    }

    /// Bank of `capacity` idle slots.
    pub fn with_capacity(clock: C, capacity: usize) -> Self {
        Self {
            clock,
            slots: vec![Stopwatch::default(); capacity].into_boxed_slice(),
            prediction_error: 0,
            prediction_abs_error: 0,
        }
    }

    /// Zero every slot and return it to idle. Prediction sums are kept;
    /// see `reset_predictions`.
    pub fn init_all(&mut self) {
        self.slots.iter_mut().for_each(Stopwatch::reset);
        tracing::debug!(capacity = self.slots.len(), "slot bank reset");
    }

    /// Zero both prediction sums.
    pub fn reset_predictions(&mut self) {
        self.prediction_error = 0;
        self.prediction_abs_error = 0;
    }

    /// Start `slot`, counting one more call for it.
    pub fn start(&mut self, slot: usize) -> Result<()> {
        let clock = &self.clock;
        let watch = Self::slot_mut(&mut self.slots, slot)?;
        if watch.start(clock) {
            Ok(())
        } else {
            Err(TimerError::SlotAlreadyRunning(slot))
        }
    }

    /// Stop `slot` and return the wall time of this cycle in milliseconds.
    pub fn stop(&mut self, slot: usize) -> Result<u64> {
        let clock = &self.clock;
        let watch = Self::slot_mut(&mut self.slots, slot)?;
        let wall_ms = watch.stop(clock).ok_or(TimerError::SlotNotRunning(slot))?;
        tracing::trace!(slot, wall_ms, "slot stopped");
        Ok(wall_ms)
    }

    /// Stop `slot` like `stop`, then fold `measured - predicted_ms` into
    /// the prediction sums. The arithmetic saturates at the `i64` bounds.
    pub fn stop_with_prediction(&mut self, slot: usize, predicted_ms: i64) -> Result<u64> {
        let wall_ms = self.stop(slot)?;
        let measured = i64::try_from(wall_ms).unwrap_or(i64::MAX);
        let err = measured.saturating_sub(predicted_ms);
        self.prediction_error = self.prediction_error.saturating_add(err);
        self.prediction_abs_error = self.prediction_abs_error.saturating_add(err.saturating_abs());
        Ok(wall_ms)
    }

    fn slot_mut(slots: &mut [Stopwatch], slot: usize) -> Result<&mut Stopwatch> {
        let capacity = slots.len();
        slots
            .get_mut(slot)
            .ok_or(TimerError::SlotOutOfRange { slot, capacity })
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Totals for one slot, or None if `slot` is out of range.
    pub fn slot(&self, slot: usize) -> Option<TimerStats> {
        self.slots.get(slot).map(Stopwatch::stats)
    }

    /// True between `start(slot)` and the matching stop.
    pub fn is_running(&self, slot: usize) -> bool {
        self.slots.get(slot).is_some_and(Stopwatch::is_running)
    }

    /// Slots that have been started at least once, in index order.
    pub fn active_slots(&self) -> impl Iterator<Item = (usize, TimerStats)> + '_ {
        self.slots
            .iter()
            .map(Stopwatch::stats)
            .enumerate()
            .filter(|(_, stats)| stats.calls != 0)
    }

    /// Call count summed over every slot.
    pub fn total_calls(&self) -> u64 {
        self.slots.iter().map(|s| s.stats().calls).sum()
    }

    /// Sum of `measured - predicted` over every `stop_with_prediction`.
    pub fn prediction_error(&self) -> i64 {
        self.prediction_error
    }

    /// Sum of `|measured - predicted|` over every `stop_with_prediction`.
    pub fn prediction_abs_error(&self) -> i64 {
        self.prediction_abs_error
    }

    /// Write one row per active slot, followed by the prediction summary
    /// when the signed prediction error is nonzero. Nothing is written if
    /// no slot was ever started.
    pub fn write_report<W: Write>(&self, w: &mut W) -> fmt::Result {
        let total = self.total_calls();
        if total == 0 {
            return Ok(());
        }

        writeln!(
            w,
            "{:>5} {:>10} {:>12} {:>10} {:>10}",
            "n", "Number", "User ticks", "Avg", "Syst time"
        )?;

        for (no, stats) in self.active_slots() {
            writeln!(
                w,
                "{:>5} {:>10} {:>12}  {:>10.2} {:>10}",
                no,
                stats.calls,
                stats.user_ms,
                stats.mean_user_per_call(),
                stats.sys_ms
            )?;
        }
        writeln!(w)?;

        if self.prediction_error != 0 {
            writeln!(w, "Total number {:>10}", total)?;
            writeln!(
                w,
                "Prediction mean {:>10.0}",
                self.prediction_error as f64 / total as f64
            )?;
            writeln!(
                w,
                "Prediction abs mean {:>10.0}",
                self.prediction_abs_error as f64 / total as f64
            )?;
            writeln!(w)?;
        }

        Ok(())
    }

    /// Report rendered into a `String`.
    pub fn report(&self) -> String {
        render(|w| self.write_report(w))
    }

    /// Print the report to stdout.
    pub fn print_report(&self) {
        print!("{}", self.report());
    }
}
