//! Round Timer - console front end for the round timer engine
//!
//! Reads one command per line from stdin and prints every snapshot the
//! engine publishes. Round sequencing lives in `round_timer::session`.

use std::io::{self, Write};

use tracing::info;

use round_timer::{
    commands::HELP,
    config::Config,
    display::format_time,
    presets::PRESETS,
    session::{run_session, SessionOptions},
    shutdown_signal,
    utils::spawn_stdin_reader,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so stdout carries only snapshots
    tracing_subscriber::fmt()
        .with_env_filter(format!("round_timer={}", config.log_level()))
        .with_writer(io::stderr)
        .init();

    if config.list_presets {
        return list_presets();
    }

    let plan = config.round_plan()?;
    info!(
        "Round plan: {} ({} work, {} rest, {} rounds)",
        plan.name,
        format_time(plan.work_seconds),
        format_time(plan.rest_seconds),
        plan.rounds
    );

    eprintln!("{}", HELP);
    let options = SessionOptions {
        autostart: config.autostart,
        json: config.json,
    };
    let outcome = run_session(
        &plan,
        options,
        spawn_stdin_reader(),
        &mut io::stdout(),
        shutdown_signal(),
    )
    .await?;
    info!("Session ended: {:?}", outcome);

    info!("Round timer shutdown complete");
    Ok(())
}

fn list_presets() -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    for preset in PRESETS {
        writeln!(
            stdout,
            "{:<15} {:<13} work {:>5}  rest {:>5}  x{:<3} {}",
            preset.id,
            preset.name,
            format_time(preset.work_seconds),
            format_time(preset.rest_seconds),
            preset.rounds,
            preset.description
        )?;
    }
    Ok(())
}
