//! # pickup-core
//!
//! Core wait logic for the pickup program.
//!
//! This crate provides the robot-independent primitives:
//! - Bounded polling wait with a countdown
//! - Cooperative cancellation token
//! - Wait configuration and results
//! - Wait and pulse constants

pub mod cancel;
pub mod constants;
pub mod countdown;
pub mod error;
pub mod result;
pub mod waiter;

pub use cancel::CancelToken;
pub use countdown::Countdown;
pub use error::{Error, Result};
pub use result::PickupResult;
pub use waiter::{wait_for_pickup, WaitConfig};
