//! Remaining-attempts counter for the pickup wait

use std::fmt;

/// Countdown of remaining probe attempts
///
/// Only ever decreases and saturates at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    initial: u32,
    remaining: u32,
}

impl Countdown {
    /// Create a countdown starting at `attempts`
    pub fn new(attempts: u32) -> Self {
        Self {
            initial: attempts,
            remaining: attempts,
        }
    }

    /// Remaining attempts
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Attempts consumed so far
    pub fn consumed(&self) -> u32 {
        self.initial - self.remaining
    }

    /// Check if no attempts are left
    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Consume one attempt
    ///
    /// Returns the remaining count after the decrement.
    pub fn tick(&mut self) -> u32 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.remaining, self.initial)
    }
}
