//! Sizing knobs for a timer session.

/// Default number of slots in a `SlotBank`.
pub const SLOT_CAPACITY: usize = 2000;

/// Default maximum timer name length, in bytes.
pub const MAX_NAME_LEN: usize = 79;

/// Configuration for a `TimerSession`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimerConfig {
    /// Number of independently addressable slots (default: 2000)
    pub slot_capacity: usize,
    /// Longest accepted timer name in bytes (default: 79)
    pub max_name_len: usize,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            slot_capacity: SLOT_CAPACITY,
            max_name_len: MAX_NAME_LEN,
        }
    }
}
