use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc::UnboundedSender;

use super::clock::{format_clock, DisplayState, ExpiryLatch};
use super::Surface;
use crate::error::CoreError;
use crate::timer::{Tick, TickObserver};

pub type SharedSurface = Arc<Mutex<dyn Surface + Send>>;

/// Sent once when a countdown reaches zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub duration_secs: u64,
    pub at: DateTime<Utc>,
}

/// Tick observer that renders the clock and raises the completion request.
pub struct Presenter {
    surface: SharedSurface,
    completions: UnboundedSender<CompletionRequest>,
    latch: ExpiryLatch,
    duration_secs: u64,
}

impl Presenter {
    pub fn new(
        surface: SharedSurface,
        completions: UnboundedSender<CompletionRequest>,
        duration_secs: u64,
    ) -> Self {
        Self {
            surface,
            completions,
            latch: ExpiryLatch::new(),
            duration_secs,
        }
    }
}

impl TickObserver for Presenter {
    fn on_tick(&mut self, tick: &Tick) -> Result<(), CoreError> {
        let text = format_clock(tick.components);
        let state = DisplayState::from_tick(tick);
        self.surface
            .lock()
            .map_err(|_| CoreError::observer("presenter", "surface lock poisoned"))?
            .show_clock(&text, state);

        if self.latch.observe(tick) {
            self.completions
                .send(CompletionRequest {
                    duration_secs: self.duration_secs,
                    at: Utc::now(),
                })
                .map_err(|_| CoreError::observer("presenter", "completion channel closed"))?;
        }
        Ok(())
    }
}
