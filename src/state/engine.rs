//! Round timer engine: owns the countdown and its ticker

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info, warn};

use super::TimerState;
use crate::tasks::ticker_task;

/// Countdown shared between the engine and its ticker
#[derive(Debug)]
pub(crate) struct Countdown {
    pub timer: TimerState,
    /// Bumped on every arm and disarm; a ticker only acts on its own epoch
    pub epoch: u64,
    /// Whether a ticker for the current epoch is alive
    pub armed: bool,
}

/// Timer engine owning the round state and the one-second ticker.
///
/// Commands are synchronous and must be called from within a tokio runtime,
/// since `start` spawns the ticker task. At most one ticker is alive per
/// engine: arming requires the slot to be empty, and every command that
/// stops the countdown disarms it.
#[derive(Debug)]
pub struct TimerEngine {
    countdown: Arc<Mutex<Countdown>>,
    ticker: Option<JoinHandle<()>>,
    /// Channel for snapshot updates
    snapshot_tx: Arc<watch::Sender<TimerState>>,
    /// Keep the receiver alive to prevent channel closure
    _snapshot_rx: watch::Receiver<TimerState>,
}

impl TimerEngine {
    /// Create an engine in the ready state for the given durations (seconds)
    pub fn new(work_duration: u64, rest_duration: u64) -> Self {
        let timer = TimerState::new(work_duration, rest_duration);
        let (snapshot_tx, snapshot_rx) = watch::channel(timer);

        info!(
            "Timer engine created: work={}s, rest={}s",
            work_duration, rest_duration
        );

        Self {
            countdown: Arc::new(Mutex::new(Countdown {
                timer,
                epoch: 0,
                armed: false,
            })),
            ticker: None,
            snapshot_tx: Arc::new(snapshot_tx),
            _snapshot_rx: snapshot_rx,
        }
    }

    /// Current state snapshot
    pub fn snapshot(&self) -> TimerState {
        self.lock().timer
    }

    /// Subscribe to snapshots, published after every tick and command
    pub fn subscribe(&self) -> watch::Receiver<TimerState> {
        self.snapshot_tx.subscribe()
    }

    /// Check if a ticker is currently driving the countdown
    pub fn is_armed(&self) -> bool {
        self.lock().armed
    }

    pub fn start(&mut self) -> TimerState {
        let snapshot = self.update("start", false, |timer| {
            timer.start();
        });
        if snapshot.running {
            self.arm();
        }
        snapshot
    }

    pub fn pause(&mut self) -> TimerState {
        self.update("pause", true, TimerState::pause)
    }

    pub fn reset(&mut self) -> TimerState {
        self.update("reset", true, TimerState::reset)
    }

    pub fn stop(&mut self) -> TimerState {
        self.update("stop", true, TimerState::stop)
    }

    /// Shift the current segment by `delta` seconds, clamped at zero
    pub fn adjust_time(&mut self, delta: i64) -> TimerState {
        self.update("adjust", false, |timer| timer.adjust_time(delta))
    }

    /// Replace both durations and return to the ready state
    pub fn reconfigure(&mut self, work_duration: u64, rest_duration: u64) -> TimerState {
        info!(
            "Reconfiguring timer: work={}s, rest={}s",
            work_duration, rest_duration
        );
        self.update("reconfigure", true, |timer| {
            timer.reconfigure(work_duration, rest_duration)
        })
    }

    /// Apply a command to the state, publish the result and optionally disarm
    fn update<F>(&mut self, action: &str, disarm: bool, updater: F) -> TimerState
    where
        F: FnOnce(&mut TimerState),
    {
        let snapshot = {
            let mut countdown = self.lock();
            updater(&mut countdown.timer);
            if disarm {
                countdown.epoch = countdown.epoch.wrapping_add(1);
                countdown.armed = false;
            }
            if let Err(e) = self.snapshot_tx.send(countdown.timer) {
                warn!("Failed to send timer snapshot: {}", e);
            }
            countdown.timer
        };

        if disarm {
            self.abort_ticker();
        }

        debug!(
            "{}: phase={}, remaining={}s, running={}",
            action, snapshot.phase, snapshot.remaining, snapshot.running
        );
        snapshot
    }

    fn arm(&mut self) {
        let epoch = {
            let mut countdown = self.lock();
            if countdown.armed {
                return;
            }
            countdown.epoch = countdown.epoch.wrapping_add(1);
            countdown.armed = true;
            countdown.epoch
        };

        // Any previous handle belongs to a ticker that already gave up its epoch
        self.abort_ticker();
        self.ticker = Some(tokio::spawn(ticker_task(
            Arc::clone(&self.countdown),
            epoch,
            Arc::clone(&self.snapshot_tx),
        )));
    }

    fn abort_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
            debug!("Ticker disarmed");
        }
    }

    fn lock(&self) -> MutexGuard<'_, Countdown> {
        // Every critical section leaves the countdown consistent
        self.countdown.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for TimerEngine {
    fn drop(&mut self) {
        {
            let mut countdown = self.lock();
            countdown.epoch = countdown.epoch.wrapping_add(1);
            countdown.armed = false;
        }
        self.abort_ticker();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Phase;
    use std::time::Duration;
    use tokio::time::sleep;

    async fn seconds(secs: f64) {
        sleep(Duration::from_secs_f64(secs)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn counts_through_work_and_rest() {
        let mut engine = TimerEngine::new(3, 2);
        engine.start();

        seconds(3.5).await;
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.phase, Phase::Rest);
        assert_eq!(snapshot.remaining, 2);
        assert!(engine.is_armed());

        seconds(2.0).await;
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.phase, Phase::Finished);
        assert_eq!(snapshot.remaining, 0);
        assert!(!snapshot.running);
        assert!(!engine.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn start_does_not_tick_immediately() {
        let mut engine = TimerEngine::new(10, 5);
        let snapshot = engine.start();
        assert_eq!(snapshot.phase, Phase::Active);
        assert_eq!(snapshot.remaining, 10);

        seconds(0.5).await;
        assert_eq!(engine.snapshot().remaining, 10);
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_start_keeps_single_ticker() {
        let mut engine = TimerEngine::new(30, 5);
        engine.start();
        engine.start();
        seconds(0.5).await;
        engine.start();

        seconds(2.0).await;
        assert_eq!(engine.snapshot().remaining, 28);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_suspends_countdown_in_place() {
        let mut engine = TimerEngine::new(30, 5);
        engine.start();
        seconds(2.5).await;

        let paused = engine.pause();
        assert_eq!(paused.remaining, 28);
        assert!(!engine.is_armed());

        seconds(10.0).await;
        assert_eq!(engine.snapshot().remaining, 28);

        engine.start();
        seconds(1.5).await;
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.remaining, 27);
        assert_eq!(snapshot.phase, Phase::Active);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_and_stop_return_to_ready() {
        let mut engine = TimerEngine::new(5, 5);
        engine.start();
        seconds(6.5).await;
        assert_eq!(engine.snapshot().phase, Phase::Rest);

        assert_eq!(engine.reset(), TimerState::new(5, 5));
        engine.start();
        seconds(1.5).await;
        assert_eq!(engine.stop(), TimerState::new(5, 5));

        seconds(3.0).await;
        assert_eq!(engine.snapshot(), TimerState::new(5, 5));
        assert!(!engine.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn reconfigure_while_running_stops_countdown() {
        let mut engine = TimerEngine::new(180, 60);
        engine.start();
        seconds(5.5).await;

        let snapshot = engine.reconfigure(600, 60);
        assert_eq!(snapshot, TimerState::new(600, 60));

        seconds(3.0).await;
        assert_eq!(engine.snapshot().remaining, 600);
    }

    #[tokio::test(start_paused = true)]
    async fn negative_adjust_finishes_segment_on_next_tick() {
        let mut engine = TimerEngine::new(5, 4);
        engine.start();

        let adjusted = engine.adjust_time(-10);
        assert_eq!(adjusted.remaining, 0);
        assert_eq!(adjusted.phase, Phase::Active);
        assert!(adjusted.running);

        seconds(1.5).await;
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.phase, Phase::Rest);
        assert_eq!(snapshot.remaining, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_rest_disarms_then_start_finishes() {
        let mut engine = TimerEngine::new(2, 0);
        engine.start();
        seconds(2.5).await;

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.phase, Phase::Rest);
        assert!(!snapshot.running);
        assert!(!engine.is_armed());

        engine.start();
        seconds(1.5).await;
        assert_eq!(engine.snapshot().phase, Phase::Finished);
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_see_ticks() {
        let mut engine = TimerEngine::new(3, 1);
        let mut rx = engine.subscribe();
        engine.start();
        let _ = rx.borrow_and_update();

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().remaining, 2);
    }
}
