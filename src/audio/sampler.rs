//! Periodic progress sampling.
//!
//! A `Clock` hands out interval timers; the `ProgressSampler` owns at most one
//! of them at a time. Timers fire `PlayerEvent::Tick(token)` into the event
//! channel, and ticks whose token no longer matches the live timer are stale.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use tracing::debug;

use super::types::PlayerEvent;

/// Source of interval timers.
pub trait Clock {
    /// Start firing `PlayerEvent::Tick(token)` every `interval` until the
    /// returned handle is cancelled.
    fn set_interval(&mut self, interval: Duration, token: u64) -> TimerHandle;
}

/// Cancellation handle for one interval timer.
#[derive(Debug)]
pub struct TimerHandle {
    token: u64,
    cancelled: Arc<AtomicBool>,
}

impl TimerHandle {
    pub fn new(token: u64, cancelled: Arc<AtomicBool>) -> Self {
        Self { token, cancelled }
    }

    pub fn token(&self) -> u64 {
        self.token
    }

    /// Stop the timer. Calling this more than once is harmless.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Clock backed by one ticker thread per timer.
pub struct ThreadClock {
    tx: Sender<PlayerEvent>,
}

impl ThreadClock {
    pub fn new(tx: Sender<PlayerEvent>) -> Self {
        Self { tx }
    }
}

impl Clock for ThreadClock {
    fn set_interval(&mut self, interval: Duration, token: u64) -> TimerHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = cancelled.clone();
        let tx = self.tx.clone();

        thread::spawn(move || {
            loop {
                thread::sleep(interval);
                if flag.load(Ordering::SeqCst) {
                    break;
                }
                // Receiver gone: the player is shutting down.
                if tx.send(PlayerEvent::Tick(token)).is_err() {
                    break;
                }
            }
        });

        TimerHandle::new(token, cancelled)
    }
}

/// Owner of the single progress-sampling timer.
pub struct ProgressSampler<C> {
    clock: C,
    interval: Duration,
    timer: Option<TimerHandle>,
    last_token: u64,
}

impl<C: Clock> ProgressSampler<C> {
    pub fn new(clock: C, interval: Duration) -> Self {
        Self {
            clock,
            interval,
            timer: None,
            last_token: 0,
        }
    }

    /// Start sampling. A no-op when a timer is already live.
    pub fn start(&mut self) {
        if self.timer.is_some() {
            debug!("progress sampler already running");
            return;
        }
        self.last_token += 1;
        debug!(token = self.last_token, "progress sampler started");
        self.timer = Some(self.clock.set_interval(self.interval, self.last_token));
    }

    /// Cancel the live timer, if any, and clear the handle.
    pub fn stop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
            debug!(token = timer.token(), "progress sampler stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Whether a tick carrying `token` came from the live timer.
    pub fn accepts(&self, token: u64) -> bool {
        self.timer.as_ref().is_some_and(|t| t.token() == token)
    }
}

impl<C> Drop for ProgressSampler<C> {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
    }
}

/// Percentage of `total` covered by `elapsed`, clamped to `[0, 100]`.
pub fn progress_percent(elapsed: Duration, total: Duration) -> f64 {
    if total.is_zero() {
        return 0.0;
    }
    (elapsed.as_secs_f64() / total.as_secs_f64() * 100.0).clamp(0.0, 100.0)
}
