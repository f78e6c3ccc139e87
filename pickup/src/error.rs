//! High-level error types

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] pickup_core::Error),
    
    #[error("Could not acquire behavior control")]
    ControlAcquisition(#[source] pickup_robot::Error),
    
    #[error("{step} failed")]
    ExternalCall {
        step: &'static str,
        #[source]
        source: pickup_robot::Error,
    },
    
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Check if the error interrupted a motor sequence
    pub fn is_fatal_to_motion(&self) -> bool {
        matches!(self, Self::ExternalCall { .. })
    }
}
