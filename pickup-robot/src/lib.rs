//! Robot collaborator interfaces
//!
//! Defines what the pickup program needs from a robot SDK: elevated
//! behavior control, speech, pickup status and wheel motors. Ships an
//! in-memory simulated robot.

pub mod error;
pub mod priority;
pub mod sim;

pub use error::{Error, Result};
pub use priority::ControlPriority;
pub use sim::{SimCall, SimJournal, SimulatedConnector, SimulatedRobot};

use async_trait::async_trait;

/// Opens behavior-control sessions on a robot
#[async_trait]
pub trait Connector: Send + Sync {
    /// Connect to the robot and acquire behavior control at `priority`
    ///
    /// `serial` selects a robot; `None` lets the SDK pick its default.
    async fn acquire_control(
        &self,
        serial: Option<&str>,
        priority: ControlPriority,
    ) -> Result<Box<dyn Connection>>;
}

/// Text-to-speech
#[async_trait]
pub trait Speech: Send {
    /// Speak `text`, resolving once the robot accepted it
    async fn say_text(&mut self, text: &str) -> Result<()>;
}

/// Wheel motor control
#[async_trait]
pub trait Motors: Send {
    /// Set wheel speeds (fire-and-forget)
    async fn set_wheel_motors(&mut self, left: f32, right: f32) -> Result<()>;
}

/// Point-in-time robot status
pub trait StatusProbe {
    /// Check if the robot currently reports being picked up
    fn is_picked_up(&self) -> bool;
}

/// Behavior-control session on a robot
pub trait Connection: Speech + Motors + StatusProbe + Send + Sync {
    /// Priority the session was granted
    fn priority(&self) -> ControlPriority;

    /// Give behavior control back to the robot
    fn release(&mut self);

    /// Robot identifier for logs
    fn remote_name(&self) -> String;
}
