//! Countdown timer state machine.
//!
//! Like the rest of the crate the timer owns no thread: something else
//! (normally [`super::CountdownDriver`]) calls `tick()` once per elapsed
//! second.
//!
//! ## State Transitions
//!
//! ```text
//! Stopped -> Running -> Expired
//! ```
//!
//! There is no way back out of `Expired`; build a new timer instead.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownState {
    Stopped,
    Running,
    Expired,
}

/// Minutes and seconds derived from a total-seconds value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeComponents {
    pub minutes: u64,
    /// Always below 60.
    pub seconds: u64,
}

/// What observers receive on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tick {
    pub remaining_secs: u64,
    pub components: TimeComponents,
    /// Read after the decrement, so the final tick already reports `true`.
    pub expired: bool,
}

/// Receives one call per elapsed second.
///
/// Any `FnMut(&Tick)` closure is an observer. Implement the trait directly
/// when the observer can fail; a failure is logged and the remaining
/// observers still run.
pub trait TickObserver {
    fn on_tick(&mut self, tick: &Tick) -> Result<(), CoreError>;
}

impl<F> TickObserver for F
where
    F: FnMut(&Tick),
{
    fn on_tick(&mut self, tick: &Tick) -> Result<(), CoreError> {
        self(tick);
        Ok(())
    }
}

type BoxedObserver = Box<dyn TickObserver + Send>;

/// A single countdown with an ordered list of tick observers.
pub struct CountdownTimer {
    total_secs: u64,
    remaining_secs: u64,
    state: CountdownState,
    observers: Vec<BoxedObserver>,
}

impl CountdownTimer {
    /// Create a stopped timer. A zero duration is expired from the start.
    pub fn new(duration_secs: u64) -> Self {
        let state = if duration_secs == 0 {
            CountdownState::Expired
        } else {
            CountdownState::Stopped
        };
        Self {
            total_secs: duration_secs,
            remaining_secs: duration_secs,
            state,
            observers: Vec::new(),
        }
    }

    /// Split a total-seconds value into minutes and seconds.
    pub fn parse(total_secs: u64) -> TimeComponents {
        TimeComponents {
            minutes: total_secs / 60,
            seconds: total_secs % 60,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn components(&self) -> TimeComponents {
        Self::parse(self.remaining_secs)
    }

    pub fn expired(&self) -> bool {
        self.remaining_secs == 0
    }

    pub fn is_running(&self) -> bool {
        self.state == CountdownState::Running
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Register an observer. Observers are called in registration order.
    pub fn on_tick<O>(&mut self, observer: O) -> &mut Self
    where
        O: TickObserver + Send + 'static,
    {
        self.observers.push(Box::new(observer));
        self
    }

    /// Returns `true` only on the Stopped -> Running transition.
    pub fn start(&mut self) -> bool {
        match self.state {
            CountdownState::Stopped => {
                self.state = CountdownState::Running;
                true
            }
            CountdownState::Running | CountdownState::Expired => false,
        }
    }

    /// Advance by one second. Returns `None` unless the timer is running.
    pub fn tick(&mut self) -> Option<Tick> {
        if self.state != CountdownState::Running {
            return None;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.state = CountdownState::Expired;
        }

        let tick = Tick {
            remaining_secs: self.remaining_secs,
            components: self.components(),
            expired: self.expired(),
        };

        for (index, observer) in self.observers.iter_mut().enumerate() {
            if let Err(e) = observer.on_tick(&tick) {
                tracing::warn!(observer = index, error = %e, "tick observer failed");
            }
        }

        Some(tick)
    }
}

impl std::fmt::Debug for CountdownTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountdownTimer")
            .field("total_secs", &self.total_secs)
            .field("remaining_secs", &self.remaining_secs)
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}
