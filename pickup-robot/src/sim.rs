//! In-memory simulated robot
//!
//! Stands in for a vendor SDK: every call is recorded, the pickup moment is
//! scripted by probe count, and failures can be injected per call.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, info, trace, warn};

use crate::{
    error::{Error, Result},
    Connection, Connector, ControlPriority, Motors, Speech, StatusProbe,
};

/// A call received by the simulated robot
#[derive(Debug, Clone, PartialEq)]
pub enum SimCall {
    Acquire {
        serial: Option<String>,
        priority: ControlPriority,
    },
    Say(String),
    Probe,
    Motors {
        left: f32,
        right: f32,
    },
    Release,
}

/// Shared call journal
#[derive(Debug, Clone, Default)]
pub struct SimJournal {
    calls: Arc<Mutex<Vec<SimCall>>>,
}

impl SimJournal {
    fn record(&self, call: SimCall) {
        trace!("Simulated robot received {:?}", call);
        self.calls.lock().push(call);
    }

    /// Every call in the order received
    pub fn calls(&self) -> Vec<SimCall> {
        self.calls.lock().clone()
    }

    /// Number of status probes
    pub fn probe_count(&self) -> usize {
        self.count(|call| matches!(call, SimCall::Probe))
    }

    /// Number of control releases
    pub fn release_count(&self) -> usize {
        self.count(|call| matches!(call, SimCall::Release))
    }

    /// Wheel commands in the order issued
    pub fn motor_commands(&self) -> Vec<(f32, f32)> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                SimCall::Motors { left, right } => Some((*left, *right)),
                _ => None,
            })
            .collect()
    }

    /// Spoken texts in the order issued
    pub fn spoken(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                SimCall::Say(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    fn count(&self, pred: impl Fn(&SimCall) -> bool) -> usize {
        self.calls.lock().iter().filter(|call| pred(call)).count()
    }
}

/// Connector for the simulated robot
///
/// # Examples
///
/// ```
/// use pickup_robot::{Connection, Connector, ControlPriority, SimulatedConnector, StatusProbe};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> pickup_robot::Result<()> {
///     let connector = SimulatedConnector::new().with_pickup_after(1);
///     let mut robot = connector
///         .acquire_control(None, ControlPriority::OverrideBehaviors)
///         .await?;
///
///     assert!(robot.is_picked_up());
///     robot.release();
///     assert_eq!(connector.journal().release_count(), 1);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimulatedConnector {
    journal: SimJournal,
    pickup_after: Option<u32>,
    deny_control: Option<String>,
    control_timeout: bool,
    fail_speech_at: Option<usize>,
    fail_motors_at: Option<usize>,
}

impl SimulatedConnector {
    /// Create a robot that is never picked up
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a pickup from the `probe`-th status probe on (1-based)
    pub fn with_pickup_after(mut self, probe: u32) -> Self {
        self.pickup_after = Some(probe);
        self
    }

    /// Refuse behavior control with `reason`
    pub fn with_denied_control(mut self, reason: impl Into<String>) -> Self {
        self.deny_control = Some(reason.into());
        self
    }

    /// Never grant control, as if the request timed out
    pub fn with_control_timeout(mut self) -> Self {
        self.control_timeout = true;
        self
    }

    /// Fail the `index`-th speech request (0-based)
    pub fn with_speech_failure_at(mut self, index: usize) -> Self {
        self.fail_speech_at = Some(index);
        self
    }

    /// Fail the `index`-th wheel command (0-based)
    pub fn with_motor_failure_at(mut self, index: usize) -> Self {
        self.fail_motors_at = Some(index);
        self
    }

    /// Journal shared with every session opened by this connector
    pub fn journal(&self) -> &SimJournal {
        &self.journal
    }
}

#[async_trait]
impl Connector for SimulatedConnector {
    async fn acquire_control(
        &self,
        serial: Option<&str>,
        priority: ControlPriority,
    ) -> Result<Box<dyn Connection>> {
        if let Some(reason) = &self.deny_control {
            warn!("Simulated robot denied control at {}", priority);
            return Err(Error::ControlDenied {
                priority,
                reason: reason.clone(),
            });
        }

        if self.control_timeout {
            warn!("Simulated robot never answered the control request");
            return Err(Error::ControlTimeout);
        }

        self.journal.record(SimCall::Acquire {
            serial: serial.map(str::to_owned),
            priority,
        });

        let robot = SimulatedRobot {
            serial: serial.unwrap_or("sim-0000").to_owned(),
            priority,
            journal: self.journal.clone(),
            pickup_after: self.pickup_after,
            fail_speech_at: self.fail_speech_at,
            fail_motors_at: self.fail_motors_at,
            probes: AtomicU32::new(0),
            speech_requests: 0,
            motor_requests: 0,
        };

        info!("Simulated robot {} under control at {}", robot.serial, priority);

        Ok(Box::new(robot))
    }
}

/// Behavior-control session on the simulated robot
#[derive(Debug)]
pub struct SimulatedRobot {
    serial: String,
    priority: ControlPriority,
    journal: SimJournal,
    pickup_after: Option<u32>,
    fail_speech_at: Option<usize>,
    fail_motors_at: Option<usize>,
    probes: AtomicU32,
    speech_requests: usize,
    motor_requests: usize,
}

#[async_trait]
impl Speech for SimulatedRobot {
    async fn say_text(&mut self, text: &str) -> Result<()> {
        let index = self.speech_requests;
        self.speech_requests += 1;

        if self.fail_speech_at == Some(index) {
            return Err(Error::CommandFailed(format!("say_text({:?})", text)));
        }

        self.journal.record(SimCall::Say(text.to_owned()));
        Ok(())
    }
}

#[async_trait]
impl Motors for SimulatedRobot {
    async fn set_wheel_motors(&mut self, left: f32, right: f32) -> Result<()> {
        let index = self.motor_requests;
        self.motor_requests += 1;

        if self.fail_motors_at == Some(index) {
            return Err(Error::CommandFailed(format!(
                "set_wheel_motors({}, {})",
                left, right
            )));
        }

        self.journal.record(SimCall::Motors { left, right });
        Ok(())
    }
}

impl StatusProbe for SimulatedRobot {
    fn is_picked_up(&self) -> bool {
        let probe = self.probes.fetch_add(1, Ordering::AcqRel) + 1;
        self.journal.record(SimCall::Probe);

        self.pickup_after.is_some_and(|after| probe >= after)
    }
}

impl Connection for SimulatedRobot {
    fn priority(&self) -> ControlPriority {
        self.priority
    }

    fn release(&mut self) {
        debug!("Simulated robot {} released control", self.serial);
        self.journal.record(SimCall::Release);
    }

    fn remote_name(&self) -> String {
        format!("sim:{}", self.serial)
    }
}
