//! One-second schedule driving a [`CountdownTimer`].
//!
//! The driver holds at most one armed `tokio::time::Interval`. It is armed
//! only when `CountdownTimer::start` reports a real transition, so a second
//! `start()` can never double the tick rate. The interval is dropped as
//! soon as the timer expires.

use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval};

use super::countdown::{CountdownTimer, Tick};

const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub struct CountdownDriver {
    timer: CountdownTimer,
    interval: Option<Interval>,
}

impl CountdownDriver {
    pub fn new(timer: CountdownTimer) -> Self {
        Self {
            timer,
            interval: None,
        }
    }

    pub fn timer(&self) -> &CountdownTimer {
        &self.timer
    }

    pub fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    /// Start the timer and arm the schedule. Returns `false` when the timer
    /// was already running or has expired.
    pub fn start(&mut self) -> bool {
        if !self.timer.start() {
            return false;
        }
        // First tick lands one full period from now, not immediately.
        self.interval = Some(interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD));
        tracing::debug!(remaining_secs = self.timer.remaining_secs(), "countdown armed");
        true
    }

    /// Swap in a fresh timer, dropping any armed schedule.
    pub fn replace(&mut self, timer: CountdownTimer) -> CountdownTimer {
        self.interval = None;
        std::mem::replace(&mut self.timer, timer)
    }

    /// Wait for the next elapsed second and tick the timer.
    ///
    /// Never resolves while nothing is armed, so it can sit in a
    /// `tokio::select!` branch for the whole session.
    pub async fn next_tick(&mut self) -> Tick {
        loop {
            match self.interval.as_mut() {
                Some(interval) => {
                    interval.tick().await;
                }
                None => std::future::pending::<()>().await,
            }

            match self.timer.tick() {
                Some(tick) => {
                    if tick.expired {
                        self.interval = None;
                        tracing::debug!("countdown expired, schedule cancelled");
                    }
                    return tick;
                }
                None => {
                    self.interval = None;
                }
            }
        }
    }
}
