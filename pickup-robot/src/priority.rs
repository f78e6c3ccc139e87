//! Behavior control priority levels

use std::fmt;

/// Priority at which behavior control is requested
///
/// Lower levels preempt more of the robot's own behaviors.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ControlPriority {
    /// Runs above system behaviors (cliff, picked up, low battery, ...)
    OverrideBehaviors = 10,

    /// Normal SDK priority
    #[default]
    Default = 20,

    /// Holds control while idle without driving the robot
    ReserveControl = 30,
}

impl ControlPriority {
    /// Get priority name
    pub fn name(self) -> &'static str {
        match self {
            Self::OverrideBehaviors => "OVERRIDE_BEHAVIORS_PRIORITY",
            Self::Default => "DEFAULT_PRIORITY",
            Self::ReserveControl => "RESERVE_CONTROL",
        }
    }
}

impl From<ControlPriority> for u8 {
    fn from(priority: ControlPriority) -> u8 {
        priority as u8
    }
}

impl fmt::Display for ControlPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), *self as u8)
    }
}
