//! Error types for pickup-core

/// Result type alias for pickup-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Poll interval must be strictly positive
    #[error("Invalid poll interval: {millis}ms (must be greater than zero)")]
    InvalidPollInterval {
        millis: u128,
    },

    /// Attempt budget must allow at least one probe
    #[error("Invalid attempt budget: {attempts} (must be at least 1)")]
    InvalidMaxAttempts {
        attempts: u32,
    },
}
