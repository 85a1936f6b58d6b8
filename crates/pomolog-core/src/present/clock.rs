use serde::{Deserialize, Serialize};

use crate::timer::{Tick, TimeComponents};

/// Binary visual state of the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayState {
    Normal,
    Expired,
}

impl DisplayState {
    pub fn from_tick(tick: &Tick) -> Self {
        if tick.expired {
            DisplayState::Expired
        } else {
            DisplayState::Normal
        }
    }
}

/// Zero-padded `MMm SSs`.
pub fn format_clock(time: TimeComponents) -> String {
    format!("{:02}m {:02}s", time.minutes, time.seconds)
}

/// Reports the transition into the expired state exactly once.
#[derive(Debug, Default)]
pub struct ExpiryLatch {
    fired: bool,
}

impl ExpiryLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` the first time an expired tick is observed, `false` after.
    pub fn observe(&mut self, tick: &Tick) -> bool {
        if tick.expired && !self.fired {
            self.fired = true;
            return true;
        }
        false
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}
