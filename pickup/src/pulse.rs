//! Wheel pulse sequence run after a pickup

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info};

use pickup_core::constants::pulse::{STEP_DURATION, WARNING_TEXT, WHEEL_POWER};
use pickup_robot::{Motors, Speech};

use crate::error::{Error, Result};

/// One wheel command and the pause that follows it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelStep {
    pub left: f32,
    pub right: f32,
    pub hold: Duration,
}

/// Spin one way, spin back, stop
pub const PULSE_STEPS: [WheelStep; 3] = [
    WheelStep {
        left: WHEEL_POWER,
        right: -WHEEL_POWER,
        hold: STEP_DURATION,
    },
    WheelStep {
        left: -WHEEL_POWER,
        right: WHEEL_POWER,
        hold: STEP_DURATION,
    },
    WheelStep {
        left: 0.0,
        right: 0.0,
        hold: Duration::ZERO,
    },
];

/// Announce and run the pulse sequence
///
/// Steps run strictly in order. The first failing call aborts the sequence
/// and no later command is sent. Holds only pace the commands; they do not
/// confirm that the wheels moved.
pub async fn run_pickup_pulse_sequence<C>(robot: &mut C) -> Result<()>
where
    C: Speech + Motors + ?Sized,
{
    robot
        .say_text(WARNING_TEXT)
        .await
        .map_err(|source| Error::ExternalCall {
            step: "say_text",
            source,
        })?;

    info!("Setting wheel motors...");

    for (index, step) in PULSE_STEPS.iter().enumerate() {
        debug!(step = index, left = step.left, right = step.right, "Wheel command");

        robot
            .set_wheel_motors(step.left, step.right)
            .await
            .map_err(|source| Error::ExternalCall {
                step: "set_wheel_motors",
                source,
            })?;

        if !step.hold.is_zero() {
            sleep(step.hold).await;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::{mock, Sequence};
    use pretty_assertions::assert_eq;
    use tokio::time::Instant;

    mock! {
        pub Wheels {}

        #[async_trait]
        impl Speech for Wheels {
            async fn say_text(&mut self, text: &str) -> pickup_robot::Result<()>;
        }

        #[async_trait]
        impl Motors for Wheels {
            async fn set_wheel_motors(&mut self, left: f32, right: f32) -> pickup_robot::Result<()>;
        }
    }

    fn expect_wheels(mock: &mut MockWheels, seq: &mut Sequence, left: f32, right: f32) {
        mock.expect_set_wheel_motors()
            .withf(move |l, r| *l == left && *r == right)
            .times(1)
            .in_sequence(seq)
            .returning(|_, _| Ok(()));
    }

    #[test]
    fn test_pulse_steps() {
        let commands: Vec<_> = PULSE_STEPS.iter().map(|s| (s.left, s.right)).collect();
        assert_eq!(commands, vec![(75.0, -75.0), (-75.0, 75.0), (0.0, 0.0)]);
        assert_eq!(PULSE_STEPS[2].hold, Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sequence_order() {
        let mut mock = MockWheels::new();
        let mut seq = Sequence::new();

        mock.expect_say_text()
            .withf(|text| text.to_string() == "Hold on tight")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        expect_wheels(&mut mock, &mut seq, 75.0, -75.0);
        expect_wheels(&mut mock, &mut seq, -75.0, 75.0);
        expect_wheels(&mut mock, &mut seq, 0.0, 0.0);

        let start = Instant::now();
        run_pickup_pulse_sequence(&mut mock).await.unwrap();

        // Two half-second holds, none after the stop
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(1));
        assert!(elapsed < Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_speech_failure_sends_no_motor_command() {
        let mut mock = MockWheels::new();

        mock.expect_say_text()
            .times(1)
            .returning(|_| Err(pickup_robot::Error::NotConnected));
        mock.expect_set_wheel_motors().never();

        let err = run_pickup_pulse_sequence(&mut mock).await.unwrap_err();
        assert!(matches!(err, Error::ExternalCall { step: "say_text", .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_motor_failure_aborts_remaining_steps() {
        let mut mock = MockWheels::new();
        let mut seq = Sequence::new();

        mock.expect_say_text()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        expect_wheels(&mut mock, &mut seq, 75.0, -75.0);
        mock.expect_set_wheel_motors()
            .withf(|l, r| *l == -75.0 && *r == 75.0)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(pickup_robot::Error::CommandFailed("stalled".into())));

        let err = run_pickup_pulse_sequence(&mut mock).await.unwrap_err();

        assert!(matches!(
            err,
            Error::ExternalCall {
                step: "set_wheel_motors",
                ..
            }
        ));
        assert!(err.is_fatal_to_motion());
        // An unexpected stop command would have panicked the mock
    }
}
