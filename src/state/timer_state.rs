//! Timer state structure and the round state machine
//!
//! ```text
//! Ready -> Active -> Rest -> Finished
//! ```
//!
//! `TimerState` is pure data plus transitions. It has no clock of its own:
//! the owner calls [`TimerState::tick`] once per elapsed second while the
//! countdown is running.

use serde::{Deserialize, Serialize};

/// Stage of a training round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Ready,
    Active,
    Rest,
    Finished,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Ready => "ready",
            Phase::Active => "active",
            Phase::Rest => "rest",
            Phase::Finished => "finished",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Phase change produced by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Phase,
    pub to: Phase,
}

/// Snapshot of a round countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Seconds left in the current segment
    pub remaining: u64,
    /// Whether ticks currently decrement `remaining`
    pub running: bool,
    pub phase: Phase,
    /// Length of the work segment in seconds
    pub work_duration: u64,
    /// Length of the rest segment in seconds, 0 disables rest
    pub rest_duration: u64,
}

impl TimerState {
    /// Create a ready timer for the given work and rest durations
    pub fn new(work_duration: u64, rest_duration: u64) -> Self {
        Self {
            remaining: work_duration,
            running: false,
            phase: Phase::Ready,
            work_duration,
            rest_duration,
        }
    }

    /// Check if the countdown is decrementing
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Begin the round from `Ready`, or resume a paused segment.
    ///
    /// Does nothing once the round has finished. Returns whether the
    /// countdown is running afterwards.
    pub fn start(&mut self) -> bool {
        match self.phase {
            Phase::Ready => {
                self.phase = Phase::Active;
                self.running = true;
            }
            Phase::Active | Phase::Rest => self.running = true,
            Phase::Finished => {}
        }
        self.running
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Return to the initial ready state for the configured durations
    pub fn reset(&mut self) {
        self.phase = Phase::Ready;
        self.remaining = self.work_duration;
        self.running = false;
    }

    /// Abort the round. Ends in the same state as [`TimerState::reset`].
    pub fn stop(&mut self) {
        self.reset();
    }

    /// Add `delta` seconds to the current segment, clamped at zero
    pub fn adjust_time(&mut self, delta: i64) {
        self.remaining = if delta.is_negative() {
            self.remaining.saturating_sub(delta.unsigned_abs())
        } else {
            self.remaining.saturating_add(delta as u64)
        };
    }

    /// Replace both durations and go back to `Ready`
    pub fn reconfigure(&mut self, work_duration: u64, rest_duration: u64) {
        *self = Self::new(work_duration, rest_duration);
    }

    /// Apply one elapsed second.
    ///
    /// A zero-length rest segment is entered with the countdown stopped;
    /// the next `start` plus tick finishes the round.
    pub fn tick(&mut self) -> Option<Transition> {
        if !self.running {
            return None;
        }
        if self.phase == Phase::Finished {
            self.remaining = 0;
            self.running = false;
            return None;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            return None;
        }

        let from = self.phase;
        match self.phase {
            Phase::Active => {
                self.phase = Phase::Rest;
                self.remaining = self.rest_duration;
                self.running = self.rest_duration > 0;
            }
            Phase::Rest | Phase::Ready | Phase::Finished => {
                self.phase = Phase::Finished;
                self.remaining = 0;
                self.running = false;
            }
        }

        (from != self.phase).then_some(Transition {
            from,
            to: self.phase,
        })
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
