//! Bounded polling wait for a pickup event
//!
//! ```text
//! ┌──────────┐ true  ┌──────────┐
//! │  probe   ├──────►│ PickedUp │
//! └────┬─────┘       └──────────┘
//!      │ false
//!      ▼
//! ┌──────────┐ cancel ┌─────────────────┐
//! │  sleep   ├───────►│ CancelledByUser │
//! └────┬─────┘        └─────────────────┘
//!      │ countdown -= 1
//!      ▼
//!  remaining == 0 ? ──► TimedOut
//!      │ no
//!      └──► probe
//! ```

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, trace};

use crate::{
    cancel::CancelToken,
    constants::{DEFAULT_MAX_ATTEMPTS, DEFAULT_POLL_INTERVAL},
    countdown::Countdown,
    error::{Error, Result},
    result::PickupResult,
};

/// Pickup wait parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitConfig {
    poll_interval: Duration,
    max_attempts: u32,
}

impl WaitConfig {
    /// Create a validated wait configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the interval is zero or no attempts are allowed.
    pub fn new(poll_interval: Duration, max_attempts: u32) -> Result<Self> {
        if poll_interval.is_zero() {
            return Err(Error::InvalidPollInterval {
                millis: poll_interval.as_millis(),
            });
        }

        if max_attempts == 0 {
            return Err(Error::InvalidMaxAttempts {
                attempts: max_attempts,
            });
        }

        Ok(Self {
            poll_interval,
            max_attempts,
        })
    }

    /// Set poll interval
    pub fn with_poll_interval(self, poll_interval: Duration) -> Result<Self> {
        Self::new(poll_interval, self.max_attempts)
    }

    /// Set attempt budget
    pub fn with_max_attempts(self, max_attempts: u32) -> Result<Self> {
        Self::new(self.poll_interval, max_attempts)
    }

    /// Delay between two probes
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Number of probes before giving up
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Upper bound on the time spent waiting
    pub fn budget(&self) -> Duration {
        self.poll_interval * self.max_attempts
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Wait until `probe` reports a pickup, the budget runs out, or `cancel` fires
///
/// The probe is evaluated at most `max_attempts` times and never again
/// once a result is decided. Cancellation is only observed while
/// suspended between probes.
///
/// # Examples
///
/// ```
/// use pickup_core::{wait_for_pickup, CancelToken, PickupResult, WaitConfig};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let config = WaitConfig::default();
///     let result = wait_for_pickup(&config, &CancelToken::new(), || true).await;
///     assert_eq!(result, PickupResult::PickedUp);
/// }
/// ```
pub async fn wait_for_pickup<P>(
    config: &WaitConfig,
    cancel: &CancelToken,
    mut probe: P,
) -> PickupResult
where
    P: FnMut() -> bool,
{
    if cancel.is_cancelled() {
        debug!("Cancelled before first probe");
        return PickupResult::CancelledByUser;
    }

    let mut countdown = Countdown::new(config.max_attempts);

    loop {
        if probe() {
            debug!(attempt = countdown.consumed() + 1, "Pickup detected");
            return PickupResult::PickedUp;
        }

        trace!(remaining = countdown.remaining(), "Not picked up yet");

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(attempts = countdown.consumed() + 1, "Wait cancelled");
                return PickupResult::CancelledByUser;
            }
            _ = sleep(config.poll_interval) => {}
        }

        if countdown.tick() == 0 {
            debug!(attempts = config.max_attempts, "Pickup wait timed out");
            return PickupResult::TimedOut;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use tokio::time::Instant;

    fn fast_config(max_attempts: u32) -> WaitConfig {
        WaitConfig::new(Duration::from_millis(10), max_attempts).unwrap()
    }

    fn paused_runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = WaitConfig::default();
        assert_eq!(config.poll_interval(), Duration::from_millis(500));
        assert_eq!(config.max_attempts(), 20);
        assert_eq!(config.budget(), Duration::from_secs(10));
    }

    #[test]
    fn test_config_rejects_zero_interval() {
        let result = WaitConfig::new(Duration::ZERO, 20);
        assert!(matches!(result, Err(Error::InvalidPollInterval { .. })));
    }

    #[test]
    fn test_config_rejects_zero_attempts() {
        let result = WaitConfig::default().with_max_attempts(0);
        assert!(matches!(result, Err(Error::InvalidMaxAttempts { attempts: 0 })));
    }

    #[test]
    fn test_config_builders() {
        let config = WaitConfig::default()
            .with_poll_interval(Duration::from_millis(100))
            .unwrap()
            .with_max_attempts(5)
            .unwrap();

        assert_eq!(config.poll_interval(), Duration::from_millis(100));
        assert_eq!(config.max_attempts(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_picked_up_immediately() {
        let start = Instant::now();
        let mut calls = 0;

        let result = wait_for_pickup(&WaitConfig::default(), &CancelToken::new(), || {
            calls += 1;
            true
        })
        .await;

        assert_eq!(result, PickupResult::PickedUp);
        assert_eq!(calls, 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_picked_up_on_sixth_check() {
        let start = Instant::now();
        let mut calls = 0;

        let result = wait_for_pickup(&WaitConfig::default(), &CancelToken::new(), || {
            calls += 1;
            calls == 6
        })
        .await;

        assert_eq!(result, PickupResult::PickedUp);
        assert_eq!(calls, 6);
        // Five half-second sleeps before the sixth check
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(2500));
        assert!(elapsed < Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_after_budget() {
        let start = Instant::now();
        let mut calls = 0;

        let result = wait_for_pickup(&WaitConfig::default(), &CancelToken::new(), || {
            calls += 1;
            false
        })
        .await;

        assert_eq!(result, PickupResult::TimedOut);
        assert_eq!(calls, 20);
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(10));
        assert!(elapsed < Duration::from_millis(10_500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_attempt_timeout() {
        let mut calls = 0;

        let result = wait_for_pickup(&fast_config(1), &CancelToken::new(), || {
            calls += 1;
            false
        })
        .await;

        assert_eq!(result, PickupResult::TimedOut);
        assert_eq!(calls, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_before_start() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let mut calls = 0;

        let result = wait_for_pickup(&WaitConfig::default(), &cancel, || {
            calls += 1;
            true
        })
        .await;

        assert_eq!(result, PickupResult::CancelledByUser);
        assert_eq!(calls, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_during_fourth_sleep() {
        let cancel = CancelToken::new();
        let remote = cancel.clone();

        // Probes run at 0ms, 500ms, 1000ms, 1500ms; the fourth sleep ends at 2000ms
        tokio::spawn(async move {
            sleep(Duration::from_millis(1750)).await;
            remote.cancel();
        });

        let mut calls = 0;
        let result = wait_for_pickup(&WaitConfig::default(), &cancel, || {
            calls += 1;
            false
        })
        .await;

        assert_eq!(result, PickupResult::CancelledByUser);
        assert_eq!(calls, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_from_probe_stops_probing() {
        let cancel = CancelToken::new();
        let mut calls = 0;

        let result = wait_for_pickup(&WaitConfig::default(), &cancel, || {
            calls += 1;
            if calls == 3 {
                cancel.cancel();
            }
            false
        })
        .await;

        assert_eq!(result, PickupResult::CancelledByUser);
        assert_eq!(calls, 3);
    }

    proptest! {
        #[test]
        fn prop_never_true_probes_exactly_n_times(n in 1u32..64) {
            let rt = paused_runtime();
            let mut calls = 0u32;

            let result = rt.block_on(wait_for_pickup(&fast_config(n), &CancelToken::new(), || {
                calls += 1;
                false
            }));

            prop_assert_eq!(result, PickupResult::TimedOut);
            prop_assert_eq!(calls, n);
        }

        #[test]
        fn prop_true_on_kth_probes_exactly_k_times((n, k) in (1u32..64).prop_flat_map(|n| (Just(n), 1..=n))) {
            let rt = paused_runtime();
            let mut calls = 0u32;

            let result = rt.block_on(wait_for_pickup(&fast_config(n), &CancelToken::new(), || {
                calls += 1;
                calls == k
            }));

            prop_assert_eq!(result, PickupResult::PickedUp);
            prop_assert_eq!(calls, k);
        }

        #[test]
        fn prop_cancel_after_ith_probe((n, i) in (2u32..64).prop_flat_map(|n| (Just(n), 1..n))) {
            let rt = paused_runtime();
            let cancel = CancelToken::new();
            let mut calls = 0u32;

            let result = rt.block_on(wait_for_pickup(&fast_config(n), &cancel, || {
                calls += 1;
                if calls == i {
                    cancel.cancel();
                }
                false
            }));

            prop_assert_eq!(result, PickupResult::CancelledByUser);
            prop_assert_eq!(calls, i);
        }
    }
}
