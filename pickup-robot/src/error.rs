//! Robot collaborator errors

use crate::priority::ControlPriority;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Behavior control denied at {priority}: {reason}")]
    ControlDenied {
        priority: ControlPriority,
        reason: String,
    },
    
    #[error("Timed out waiting for behavior control")]
    ControlTimeout,
    
    #[error("Not connected")]
    NotConnected,
    
    #[error("Robot rejected command: {0}")]
    CommandFailed(String),
}
