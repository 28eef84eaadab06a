//! Rendering helpers for timer snapshots

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::{Phase, TimerState};

/// Format seconds as `m:ss`
pub fn format_time(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Human label for a phase
pub fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Ready => "READY",
        Phase::Active => "WORK",
        Phase::Rest => "REST",
        Phase::Finished => "DONE",
    }
}

/// One status line, e.g. `[round 2/5] WORK  2:59 (running)`.
///
/// Only a countdown phase carries a running/paused marker.
pub fn status_line(state: &TimerState, round: u32, rounds: u32) -> String {
    let marker = match (state.phase, state.running) {
        (_, true) => " (running)",
        (Phase::Active | Phase::Rest, false) => " (paused)",
        (Phase::Ready | Phase::Finished, false) => "",
    };
    format!(
        "[round {}/{}] {:<5} {}{}",
        round,
        rounds,
        phase_label(state.phase),
        format_time(state.remaining),
        marker,
    )
}

/// Snapshot as emitted in JSON output mode
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotLine {
    pub timestamp: DateTime<Utc>,
    pub round: u32,
    pub rounds: u32,
    #[serde(flatten)]
    pub state: TimerState,
}

impl SnapshotLine {
    pub fn new(state: TimerState, round: u32, rounds: u32) -> Self {
        Self {
            timestamp: Utc::now(),
            round,
            rounds,
            state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_time(0), "0:00");
        assert_eq!(format_time(59), "0:59");
        assert_eq!(format_time(180), "3:00");
        assert_eq!(format_time(605), "10:05");
    }

    #[test]
    fn status_line_reflects_state() {
        let mut state = TimerState::new(180, 60);
        assert_eq!(status_line(&state, 1, 12), "[round 1/12] READY 3:00");
        state.start();
        assert_eq!(status_line(&state, 1, 12), "[round 1/12] WORK  3:00 (running)");
        state.pause();
        assert_eq!(status_line(&state, 1, 12), "[round 1/12] WORK  3:00 (paused)");
    }

    #[test]
    fn finished_round_has_no_marker() {
        let mut state = TimerState::new(1, 1);
        state.start();
        state.tick();
        state.tick();
        assert!(state.is_finished());
        assert_eq!(status_line(&state, 3, 3), "[round 3/3] DONE  0:00");
    }

    #[test]
    fn json_line_flattens_state() {
        let line = SnapshotLine::new(TimerState::new(20, 10), 3, 8);
        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(value["phase"], "ready");
        assert_eq!(value["remaining"], 20);
        assert_eq!(value["round"], 3);
        assert!(value.get("timestamp").is_some());
    }
}
