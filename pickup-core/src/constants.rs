//! Wait and pulse constants

use std::time::Duration;

/// Default delay between two pickup status probes
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Default number of probes before giving up
pub const DEFAULT_MAX_ATTEMPTS: u32 = 20;

/// Pulse sequence parameters
pub mod pulse {
    use std::time::Duration;

    /// Wheel power used for both pulse directions
    pub const WHEEL_POWER: f32 = 75.0;

    /// Pacing delay after each non-final motor command
    pub const STEP_DURATION: Duration = Duration::from_millis(500);

    /// Spoken before the first motor command
    pub const WARNING_TEXT: &str = "Hold on tight";
}

/// Spoken once control has been acquired
pub const GREETING_TEXT: &str = "Pick me up!";
