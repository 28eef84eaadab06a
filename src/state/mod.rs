//! State management module
//!
//! This module contains the round state machine and the engine that owns it.

pub mod engine;
pub mod timer_state;

// Re-export main types
pub use engine::TimerEngine;
pub use timer_state::{Phase, TimerState, Transition};
