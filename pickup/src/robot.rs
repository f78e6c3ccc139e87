//! Scoped behavior-control session

use tracing::{debug, info};

use pickup_robot::{Connection, Connector, ControlPriority, StatusProbe};

use crate::error::{Error, Result};

/// Robot under elevated behavior control
///
/// Control is acquired by [`Robot::connect`] and given back exactly once
/// when the value is dropped, whichever way the caller leaves its scope.
///
/// # Examples
///
/// ```no_run
/// use pickup::Robot;
/// use pickup_robot::{ControlPriority, SimulatedConnector};
///
/// #[tokio::main]
/// async fn main() -> pickup::Result<()> {
///     let connector = SimulatedConnector::new();
///     let mut robot = Robot::connect(&connector, None, ControlPriority::OverrideBehaviors).await?;
///
///     robot.say_text("Pick me up!").await?;
///     Ok(())
/// } // control released here
/// ```
pub struct Robot {
    connection: Box<dyn Connection>,
    released: bool,
}

impl Robot {
    /// Connect and acquire behavior control at `priority`
    ///
    /// # Errors
    ///
    /// Returns [`Error::ControlAcquisition`] if the robot refuses or times out.
    /// Nothing is released in that case.
    pub async fn connect(
        connector: &dyn Connector,
        serial: Option<&str>,
        priority: ControlPriority,
    ) -> Result<Self> {
        info!(
            "Requesting behavior control at {} (serial={})",
            priority,
            serial.unwrap_or("default")
        );

        let connection = connector
            .acquire_control(serial, priority)
            .await
            .map_err(Error::ControlAcquisition)?;

        info!("Behavior control granted on {}", connection.remote_name());

        Ok(Self {
            connection,
            released: false,
        })
    }

    /// Priority the session holds
    pub fn priority(&self) -> ControlPriority {
        self.connection.priority()
    }

    /// Robot identifier
    pub fn remote_name(&self) -> String {
        self.connection.remote_name()
    }

    /// Speak `text`
    pub async fn say_text(&mut self, text: &str) -> Result<()> {
        debug!("Saying {:?}", text);

        self.connection
            .say_text(text)
            .await
            .map_err(|source| Error::ExternalCall {
                step: "say_text",
                source,
            })
    }

    /// Mutable access to the underlying session
    pub fn connection_mut(&mut self) -> &mut dyn Connection {
        self.connection.as_mut()
    }

    fn release(&mut self) {
        if self.released {
            return;
        }

        info!("Releasing behavior control on {}", self.connection.remote_name());
        self.connection.release();
        self.released = true;
    }
}

impl StatusProbe for Robot {
    fn is_picked_up(&self) -> bool {
        self.connection.is_picked_up()
    }
}

impl Drop for Robot {
    fn drop(&mut self) {
        self.release();
    }
}
