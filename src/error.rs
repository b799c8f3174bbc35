//! Errors returned when a timer is driven out of order.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    #[error("timer started while already running")]
    AlreadyRunning,

    #[error("timer stopped without a matching start")]
    NotRunning,

    #[error("slot {0} started while already running")]
    SlotAlreadyRunning(usize),

    #[error("slot {0} stopped without a matching start")]
    SlotNotRunning(usize),

    #[error("slot {slot} is out of range (capacity {capacity})")]
    SlotOutOfRange { slot: usize, capacity: usize },

    #[error("timer name is {len} bytes, at most {max} allowed")]
    NameTooLong { len: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, TimerError>;
