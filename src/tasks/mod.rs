//! Background tasks module
//!
//! This module contains the recurring callback that drives the countdown.

pub mod ticker;

// Re-export main functions
pub(crate) use ticker::ticker_task;
pub use ticker::TICK_PERIOD;
