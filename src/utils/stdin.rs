//! Console input forwarded from a dedicated thread

use std::io::{self, BufRead};
use std::thread;

use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Read stdin lines on a plain OS thread and forward them over a channel.
///
/// Blocking reads stay off the tokio runtime, so shutdown never waits on
/// the terminal. The thread is detached and ends when stdin closes or the
/// receiver is dropped; the channel closes with it.
pub fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(16);

    let spawned = thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        warn!("Failed to read console input: {}", e);
                        break;
                    }
                };
                if tx.blocking_send(line).is_err() {
                    break;
                }
            }
            debug!("Console reader exiting");
        });

    if let Err(e) = spawned {
        warn!("Failed to spawn console reader: {}", e);
    }
    rx
}
