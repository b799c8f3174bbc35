//! One named stopwatch with cumulative wall and CPU totals.
//!
//! ```
//! use solver_timers::{ManualClock, SingleTimer};
//!
//! let clock = ManualClock::new();
//! let mut timer = SingleTimer::new(clock.clone());
//! timer.set_name("solve").unwrap();
//!
//! for ms in [10, 20, 30] {
//!     timer.start().unwrap();
//!     clock.advance_ms(ms);
//!     timer.stop().unwrap();
//! }
//!
//! assert_eq!(timer.calls(), 3);
//! assert_eq!(timer.user_ms(), 60);
//! assert!(timer.report().contains("User time/ticks    :         60"));
//! ```


use std::fmt::{self, Write};

use crate::clock::{ClockSource, SystemClock};
use crate::config::MAX_NAME_LEN;
use crate::error::{Result, TimerError};
use crate::report::{field, real_field, render, text_field};
use crate::stopwatch::Stopwatch;

/// Repeatable named stopwatch accumulating wall and CPU time.
pub struct SingleTimer<C: ClockSource = SystemClock> {
    clock: C,
    watch: Stopwatch,
    name: Option<String>,
    max_name_len: usize,
}

impl<C: ClockSource> SingleTimer<C> {
    /// Idle timer accepting names up to `MAX_NAME_LEN` bytes.
    pub fn new(clock: C) -> Self {
        Self::with_max_name_len(clock, MAX_NAME_LEN)
    }

    /// Idle timer accepting names up to `max_name_len` bytes.
    pub fn with_max_name_len(clock: C, max_name_len: usize) -> Self {
        Self {
            clock,
            watch: Stopwatch::default(),
            name: None,
            max_name_len,
        }
    }

    /// Zero the call count and totals, drop the name, and return to idle.
    pub fn init(&mut self) {
        self.watch.reset();
        self.name = None;
    }

    /// Label printed at the top of the report.
    pub fn set_name(&mut self, name: &str) -> Result<()> {
        if name.len() > self.max_name_len {
            return Err(TimerError::NameTooLong {
                len: name.len(),
                max: self.max_name_len,
            });
        }
        self.name = Some(name.to_string());
        Ok(())
    }

    /// Start a cycle, counting one more call.
    pub fn start(&mut self) -> Result<()> {
        if self.watch.start(&self.clock) {
            Ok(())
        } else {
            Err(TimerError::AlreadyRunning)
        }
    }

    /// Stop the running cycle and return its wall time in milliseconds.
    pub fn stop(&mut self) -> Result<u64> {
        let wall_ms = self.watch.stop(&self.clock).ok_or(TimerError::NotRunning)?;
        tracing::trace!(wall_ms, "timer stopped");
        Ok(wall_ms)
    }

    /// Number of accepted `start` calls.
    pub fn calls(&self) -> u64 {
        self.watch.stats().calls
    }

    /// Cumulative wall-clock milliseconds.
    pub fn user_ms(&self) -> u64 {
        self.watch.stats().user_ms
    }

    /// Cumulative CPU milliseconds.
    pub fn sys_ms(&self) -> u64 {
        self.watch.stats().sys_ms
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// True between `start` and the matching `stop`.
    pub fn is_running(&self) -> bool {
        self.watch.is_running()
    }

    /// Write the report; nothing is written if the timer was never started.
    ///
    /// Per-call and ratio values use integer division before the conversion
    /// to a real number, so 7 ms over 2 calls prints as `3.00`.
    pub fn write_report<W: Write>(&self, w: &mut W) -> fmt::Result {
        let stats = self.watch.stats();
        if stats.calls == 0 {
            return Ok(());
        }

        if let Some(name) = &self.name {
            text_field(w, "Timer name", name)?;
        }

        field(w, "Number of calls", stats.calls)?;

        if stats.user_ms == 0 {
            text_field(w, "User time", "zero")?;
        } else {
            field(w, "User time/ticks", stats.user_ms)?;
            real_field(w, "User per call", stats.truncated_user_per_call())?;
        }

        if stats.sys_ms == 0 {
            text_field(w, "Sys time", "zero")?;
        } else {
            field(w, "Sys time/ticks", stats.sys_ms)?;
            real_field(w, "Sys per call", (stats.sys_ms / stats.calls) as f64)?;
            if stats.user_ms != 0 {
                real_field(w, "Ratio", (stats.sys_ms / stats.user_ms) as f64)?;
            }
        }

        writeln!(w)
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
