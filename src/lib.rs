//! # Solver-Timers
//!
//! Cumulative wall-clock and CPU-time stopwatches for benchmarking a solver:
//! a single named timer, and a fixed-capacity bank of numbered slots with
//! optional prediction-error tracking.

pub mod clock;
pub mod config;
pub mod error;
pub mod report;
pub mod session;
pub mod single;
pub mod slots;
pub mod stopwatch;
pub mod tui;

pub use clock::{ClockSource, ManualClock, SystemClock};
pub use config::{TimerConfig, MAX_NAME_LEN, SLOT_CAPACITY};
pub use error::{Result, TimerError};
pub use session::TimerSession;
pub use single::SingleTimer;
pub use slots::SlotBank;
pub use stopwatch::TimerStats;

/// Re-export commonly used items
pub mod prelude {
    pub use crate::clock::{ClockSource, ManualClock, SystemClock};
    pub use crate::session::TimerSession;
    pub use crate::{SingleTimer, SlotBank, TimerError};
}
