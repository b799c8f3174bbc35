//! A measurement session: one `SingleTimer` and one `SlotBank` sharing a
//! clock.

use std::fmt::{self, Write};

use crate::clock::{ClockSource, SystemClock};
use crate::config::TimerConfig;
use crate::report::render;
use crate::single::SingleTimer;
use crate::slots::SlotBank;

/// Owned measurement state: one named timer and one slot bank.
pub struct TimerSession<C: ClockSource + Clone = SystemClock> {
    /// Overall stopwatch
    pub timer: SingleTimer<C>,
    /// Per-operation slots
    pub slots: SlotBank<C>,
}

impl TimerSession<SystemClock> {
    /// Session backed by the real OS clocks and the default config.
    pub fn system() -> Self {
        Self::new(SystemClock::new())
    }
}

impl<C: ClockSource + Clone> TimerSession<C> {
    /// Session with the default `TimerConfig`.
    pub fn new(clock: C) -> Self {
        Self::with_config(clock, &TimerConfig::default())
    }

    /// Session sized by `config`; both halves read the same clock.
    pub fn with_config(clock: C, config: &TimerConfig) -> Self {
        Self {
            timer: SingleTimer::with_max_name_len(clock.clone(), config.max_name_len),
            slots: SlotBank::with_capacity(clock, config.slot_capacity),
        }
    }

    /// Start a fresh measurement pass for the single timer: zero it and the
    /// prediction sums. Slot totals are reset separately by `init_all`.
    pub fn init(&mut self) {
        self.timer.init();
        self.slots.reset_predictions();
        tracing::debug!("timer session reset");
    }

    /// Reset the single timer, the prediction sums, and every slot.
    pub fn init_all(&mut self) {
        self.init();
        self.slots.init_all();
    }

    /// Single-timer report followed by the slot report.
    pub fn write_report<W: Write>(&self, w: &mut W) -> fmt::Result {
        self.timer.write_report(w)?;
        self.slots.write_report(w)
    }

    /// Combined report rendered into a `String`.
    pub fn report(&self) -> String {
        render(|w| self.write_report(w))
    }
}
