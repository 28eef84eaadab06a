//! Round Timer - interval timer for combat-sports training
//!
//! This library provides the round state machine (ready, active, rest,
//! finished), the engine that drives it from a one-second ticker, and the
//! thin console consumers built on top of it.

pub mod commands;
pub mod config;
pub mod display;
pub mod presets;
pub mod session;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use commands::Command;
pub use config::Config;
pub use state::{Phase, TimerEngine, TimerState};
pub use utils::signals::shutdown_signal;
