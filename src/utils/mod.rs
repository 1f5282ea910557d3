//! Utility modules
//!
//! This module contains common utilities used throughout the client,
//! including error handling, logging setup, time and date helpers.

pub mod clock;
pub mod errors;
pub mod logging;
pub mod helpers;

pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::{GeoHodError, DomainConflict, Result};
