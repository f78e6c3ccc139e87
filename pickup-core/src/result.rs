//! Pickup wait results

use std::fmt;

/// How a pickup wait ended
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PickupResult {
    /// The status probe reported a pickup before the budget ran out
    PickedUp,

    /// Every attempt was consumed without a pickup
    TimedOut,

    /// Cancellation was observed while waiting between probes
    CancelledByUser,
}

impl PickupResult {
    /// Check if the robot was picked up
    pub fn is_picked_up(self) -> bool {
        matches!(self, Self::PickedUp)
    }

    /// Get result name
    pub fn name(self) -> &'static str {
        match self {
            Self::PickedUp => "picked-up",
            Self::TimedOut => "timed-out",
            Self::CancelledByUser => "cancelled",
        }
    }
}

impl fmt::Display for PickupResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
