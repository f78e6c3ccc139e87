//! Program configuration

use std::time::Duration;

use pickup_core::{constants::GREETING_TEXT, WaitConfig};
use pickup_robot::ControlPriority;

use crate::error::{Error, Result};

/// Environment variable holding the robot serial
pub const ENV_SERIAL: &str = "ANKI_ROBOT_SERIAL";

/// Environment variable overriding the poll interval (milliseconds)
pub const ENV_POLL_INTERVAL_MS: &str = "PICKUP_POLL_INTERVAL_MS";

/// Environment variable overriding the attempt budget
pub const ENV_MAX_ATTEMPTS: &str = "PICKUP_MAX_ATTEMPTS";

/// Pickup program configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramConfig {
    /// Robot serial (`None` lets the SDK choose)
    pub serial: Option<String>,

    /// Behavior control level requested for the whole run
    pub priority: ControlPriority,

    /// Poll interval and attempt budget
    pub wait: WaitConfig,

    /// Spoken once control is granted
    pub greeting: String,
}

impl ProgramConfig {
    /// Defaults: highest control level, 20 probes every 500ms
    pub fn new() -> Self {
        Self {
            serial: None,
            priority: ControlPriority::OverrideBehaviors,
            wait: WaitConfig::default(),
            greeting: GREETING_TEXT.to_string(),
        }
    }

    /// Build from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    ///
    /// Unset keys keep their defaults; set but unparsable keys are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(serial) = lookup(ENV_SERIAL).filter(|s| !s.is_empty()) {
            config.serial = Some(serial);
        }

        if let Some(raw) = lookup(ENV_POLL_INTERVAL_MS) {
            let millis: u64 = parse_var(ENV_POLL_INTERVAL_MS, &raw)?;
            config.wait = config.wait.with_poll_interval(Duration::from_millis(millis))?;
        }

        if let Some(raw) = lookup(ENV_MAX_ATTEMPTS) {
            let attempts: u32 = parse_var(ENV_MAX_ATTEMPTS, &raw)?;
            config.wait = config.wait.with_max_attempts(attempts)?;
        }

        Ok(config)
    }

    /// Set robot serial
    pub fn with_serial(mut self, serial: impl Into<String>) -> Self {
        self.serial = Some(serial.into());
        self
    }

    /// Set requested control priority
    pub fn with_priority(mut self, priority: ControlPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Set wait parameters
    pub fn with_wait(mut self, wait: WaitConfig) -> Self {
        self.wait = wait;
        self
    }
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| Error::Config(format!("{}={:?} is not a valid number", key, raw)))
}
