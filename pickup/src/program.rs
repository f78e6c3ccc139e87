//! Top-level pickup program
//!
//! ```text
//! Idle ──(acquire control, greet)──► Polling
//! Polling ──PickedUp──► Pulsing ──► Done
//! Polling ──TimedOut──────────────► Done
//! Polling ──CancelledByUser───────► Done
//! ```
//!
//! Behavior control is held by a [`Robot`] for the whole run and released
//! when it goes out of scope, on every branch above and on errors.

use std::fmt;
use std::process::ExitCode;

use tracing::{debug, info, warn};

use pickup_core::{wait_for_pickup, CancelToken, PickupResult};
use pickup_robot::{Connector, StatusProbe};

use crate::{
    config::ProgramConfig,
    error::{Error, Result},
    pulse::run_pickup_pulse_sequence,
    robot::Robot,
};

/// Program state
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProgramState {
    Idle,
    Polling,
    Pulsing,
    Done,
}

/// How a run ended
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Picked up and the pulse sequence completed
    Completed,

    /// Attempt budget exhausted
    NotPickedUp,

    /// Interrupted while waiting
    Cancelled,
}

impl Outcome {
    /// Process exit status for this outcome
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Completed | Self::Cancelled => 0,
            Self::NotPickedUp => 2,
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> ExitCode {
        ExitCode::from(outcome.exit_code())
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => f.write_str("completed"),
            Self::NotPickedUp => f.write_str("Did not get picked up"),
            Self::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// Exit status for a failed run
pub const ERROR_EXIT_CODE: u8 = 1;

/// Pickup program
#[derive(Debug, Clone)]
pub struct PickupProgram {
    config: ProgramConfig,
    state: ProgramState,
}

impl PickupProgram {
    /// Create a program in the idle state
    pub fn new(config: ProgramConfig) -> Self {
        Self {
            config,
            state: ProgramState::Idle,
        }
    }

    /// Current state
    pub fn state(&self) -> ProgramState {
        self.state
    }

    /// Configuration in use
    pub fn config(&self) -> &ProgramConfig {
        &self.config
    }

    /// Run once against `connector`
    ///
    /// # Errors
    ///
    /// - [`Error::ControlAcquisition`] when control is refused; nothing
    ///   is polled
    /// - [`Error::ExternalCall`] when speech or a motor command fails
    pub async fn run(&mut self, connector: &dyn Connector, cancel: &CancelToken) -> Result<Outcome> {
        let result = self.run_inner(connector, cancel).await;
        self.transition(ProgramState::Done);
        result
    }

    async fn run_inner(&mut self, connector: &dyn Connector, cancel: &CancelToken) -> Result<Outcome> {
        let mut robot = Robot::connect(
            connector,
            self.config.serial.as_deref(),
            self.config.priority,
        )
        .await?;

        robot.say_text(&self.config.greeting).await?;

        self.transition(ProgramState::Polling);
        info!(
            attempts = self.config.wait.max_attempts(),
            interval = ?self.config.wait.poll_interval(),
            "Waiting for the robot to be picked up, press ctrl+c to exit early"
        );

        let result = wait_for_pickup(&self.config.wait, cancel, || robot.is_picked_up()).await;

        match result {
            PickupResult::PickedUp => {
                info!("Robot is picked up...");
                self.transition(ProgramState::Pulsing);
                run_pickup_pulse_sequence(robot.connection_mut()).await?;
                Ok(Outcome::Completed)
            }
            PickupResult::TimedOut => {
                warn!("Did not get picked up");
                Ok(Outcome::NotPickedUp)
            }
            PickupResult::CancelledByUser => {
                debug!("Wait cancelled by user");
                Ok(Outcome::Cancelled)
            }
        }
    }

    fn transition(&mut self, next: ProgramState) {
        debug!("State {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

/// Map a finished run to a process exit status
pub fn exit_code(result: &Result<Outcome>) -> u8 {
    match result {
        Ok(outcome) => outcome.exit_code(),
        Err(_) => ERROR_EXIT_CODE,
    }
}
