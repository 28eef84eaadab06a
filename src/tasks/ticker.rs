//! Countdown ticker background task

use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};
use tokio::{
    sync::watch,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::state::{engine::Countdown, TimerState};

/// Period between ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Background task that applies one tick per elapsed second.
///
/// The first tick fires one full period after the task is spawned. The task
/// ends on its own once a tick leaves the countdown stopped (round finished
/// or a zero-length rest entered); otherwise it runs until aborted. A ticker
/// whose `epoch` no longer matches the shared countdown was disarmed and
/// must not touch the state, even if the abort has not landed yet.
pub(crate) async fn ticker_task(
    countdown: Arc<Mutex<Countdown>>,
    epoch: u64,
    snapshot_tx: Arc<watch::Sender<TimerState>>,
) {
    debug!("Ticker armed (epoch {})", epoch);

    let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let (snapshot, transition) = {
            let mut countdown = countdown.lock().unwrap_or_else(PoisonError::into_inner);
            if countdown.epoch != epoch {
                debug!("Ticker epoch {} is stale, exiting", epoch);
                break;
            }
            let transition = countdown.timer.tick();
            if !countdown.timer.running {
                countdown.armed = false;
            }
            // Publish under the lock so a concurrent command cannot be overwritten
            if let Err(e) = snapshot_tx.send(countdown.timer) {
                warn!("Failed to send timer snapshot: {}", e);
            }
            (countdown.timer, transition)
        };

        match transition {
            Some(t) => info!(
                "Phase {} -> {} ({}s remaining)",
                t.from, t.to, snapshot.remaining
            ),
            None => debug!("Tick: phase={}, remaining={}s", snapshot.phase, snapshot.remaining),
        }

        if !snapshot.running {
            debug!("Countdown stopped, ticker exiting");
            break;
        }
    }
}
