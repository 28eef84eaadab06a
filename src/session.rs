//! Multi-round session driving a single engine from console lines

use std::{future::Future, io::Write};

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::{
    commands::{Command, CommandError, HELP},
    config::RoundPlan,
    display::{status_line, SnapshotLine},
    state::{Phase, TimerEngine, TimerState},
};

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Every planned round reached its end
    Completed,
    /// The user typed `quit`
    Quit,
    /// The shutdown future resolved
    Interrupted,
}

/// Output and start behaviour for a session
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    pub autostart: bool,
    pub json: bool,
}

/// Whether a snapshot ends the current round.
///
/// A zero-length rest is entered with the countdown stopped, so with rest
/// disabled the round is over as soon as work runs out.
pub fn round_complete(snapshot: &TimerState) -> bool {
    snapshot.is_finished()
        || (snapshot.phase == Phase::Rest && snapshot.rest_duration == 0 && !snapshot.running)
}

/// Run `plan.rounds` rounds, rendering every snapshot to `out`.
///
/// `lines` carries console input; when it closes the session keeps running
/// without commands. After each round with more remaining, the engine is
/// reset and started again.
pub async fn run_session<W, F>(
    plan: &RoundPlan,
    options: SessionOptions,
    mut lines: mpsc::Receiver<String>,
    out: &mut W,
    shutdown: F,
) -> Result<SessionOutcome>
where
    W: Write,
    F: Future<Output = Result<()>>,
{
    let mut engine = TimerEngine::new(plan.work_seconds, plan.rest_seconds);
    let mut snapshots = engine.subscribe();
    let mut round = 1;
    let mut lines_open = true;

    render(out, &snapshots.borrow_and_update(), round, plan.rounds, options.json)?;

    if options.autostart {
        engine.start();
    }

    tokio::pin!(shutdown);

    let outcome = loop {
        tokio::select! {
            // Render a change before taking further input
            biased;

            changed = snapshots.changed() => {
                if changed.is_err() {
                    break SessionOutcome::Interrupted;
                }
                let snapshot = *snapshots.borrow_and_update();
                render(out, &snapshot, round, plan.rounds, options.json)?;

                if round_complete(&snapshot) {
                    if round >= plan.rounds {
                        info!("All {} rounds complete", plan.rounds);
                        break SessionOutcome::Completed;
                    }
                    round += 1;
                    info!("Starting round {}/{}", round, plan.rounds);
                    engine.reset();
                    engine.start();
                }
            }

            line = lines.recv(), if lines_open => {
                let Some(line) = line else {
                    info!("Console input closed, commands disabled");
                    lines_open = false;
                    continue;
                };
                match line.parse::<Command>() {
                    Ok(Command::Quit) => break SessionOutcome::Quit,
                    Ok(command) => {
                        command.apply(&mut engine);
                    }
                    Err(CommandError::Empty) => {}
                    Err(e) => {
                        warn!("{}", e);
                        eprintln!("{}", HELP);
                    }
                }
            }

            result = &mut shutdown => {
                result?;
                info!("Shutdown signal received");
                break SessionOutcome::Interrupted;
            }
        }
    };

    engine.stop();
    Ok(outcome)
}

fn render<W: Write>(
    out: &mut W,
    snapshot: &TimerState,
    round: u32,
    rounds: u32,
    json: bool,
) -> Result<()> {
    if json {
        let line = serde_json::to_string(&SnapshotLine::new(*snapshot, round, rounds))?;
        writeln!(out, "{}", line)?;
    } else {
        writeln!(out, "{}", status_line(snapshot, round, rounds))?;
    }
    out.flush()?;
    Ok(())
}
