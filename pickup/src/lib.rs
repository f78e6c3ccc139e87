//! # pickup
//!
//! Wait for a robot to be picked up under elevated behavior control, then
//! pulse its wheels.
//!
//! ## Features
//!
//! - Bounded polling wait with cooperative Ctrl+C cancellation
//! - Behavior control released exactly once, on every exit path
//! - Robot SDK behind traits, with a simulated robot included
//!
//! ## Quick Start
//!
//! ```no_run
//! use pickup::{PickupProgram, ProgramConfig};
//! use pickup_core::CancelToken;
//! use pickup_robot::SimulatedConnector;
//!
//! #[tokio::main]
//! async fn main() -> pickup::Result<()> {
//!     let connector = SimulatedConnector::new().with_pickup_after(6);
//!     let mut program = PickupProgram::new(ProgramConfig::from_env()?);
//!
//!     let outcome = program.run(&connector, &CancelToken::new()).await?;
//!     println!("{}", outcome);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod program;
pub mod pulse;
pub mod robot;

// Re-exports
pub use config::ProgramConfig;
pub use error::{Error, Result};
pub use program::{Outcome, PickupProgram, ProgramState};
pub use pulse::run_pickup_pulse_sequence;
pub use robot::Robot;

// Re-export core types
pub use pickup_core::{CancelToken, PickupResult, WaitConfig};
pub use pickup_robot::ControlPriority;
