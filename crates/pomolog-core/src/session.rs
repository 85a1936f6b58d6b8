//! Session: the composition root for one interactive run.
//!
//! A session owns the countdown driver, the task log client, the surface and
//! the alarm, and wires the presenter onto every timer it builds. Everything
//! runs on the task that calls [`Session::run`]; only task log requests are
//! spawned, and they report back over a channel.
//!
//! ```text
//! Input::Start -> CountdownDriver -> Presenter (clock, expiry latch)
//!                                        |
//!                                CompletionRequest
//!                                        v
//!                      alarm + record_completion -> fetch_log -> Surface
//! ```

use chrono::Utc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::error::Result;
use crate::events::Event;
use crate::present::{format_clock, render_log, CompletionRequest, DisplayState, Presenter, SharedSurface};
use crate::storage::Config;
use crate::tasklog::{TaskLogClient, TaskLogEntry};
use crate::timer::{CountdownDriver, CountdownTimer, Tick};

/// User intent coming from whatever input surface the front end has.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Start,
    Silence,
    SetTask(String),
    Quit,
}

/// Something that can make noise on expiry until told to stop.
pub trait Alarm: Send {
    fn play(&mut self);
    fn silence(&mut self);
}

/// Alarm that does nothing, for `alarm.enabled = false`.
#[derive(Debug, Default)]
pub struct SilentAlarm;

impl Alarm for SilentAlarm {
    fn play(&mut self) {}
    fn silence(&mut self) {}
}

/// Per-session settings, usually taken from [`Config`].
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub duration_secs: u64,
    pub description: String,
}

impl From<&Config> for SessionOptions {
    fn from(config: &Config) -> Self {
        Self {
            duration_secs: config.timer.duration_secs,
            description: config.task.default_description.clone(),
        }
    }
}

enum LogUpdate {
    Recorded(String),
    Refreshed(Vec<TaskLogEntry>),
    Failed {
        operation: &'static str,
        message: String,
    },
}

pub struct Session {
    driver: CountdownDriver,
    client: TaskLogClient,
    surface: SharedSurface,
    alarm: Box<dyn Alarm>,
    options: SessionOptions,
    events: Option<UnboundedSender<Event>>,
    completion_tx: UnboundedSender<CompletionRequest>,
    completion_rx: UnboundedReceiver<CompletionRequest>,
    log_tx: UnboundedSender<LogUpdate>,
    log_rx: UnboundedReceiver<LogUpdate>,
}

impl Session {
    pub fn new(
        options: SessionOptions,
        client: TaskLogClient,
        surface: SharedSurface,
        alarm: Box<dyn Alarm>,
    ) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        let (log_tx, log_rx) = mpsc::unbounded_channel();

        let mut session = Self {
            driver: CountdownDriver::new(CountdownTimer::new(options.duration_secs)),
            client,
            surface,
            alarm,
            options,
            events: None,
            completion_tx,
            completion_rx,
            log_tx,
            log_rx,
        };
        let timer = session.build_timer();
        session.driver.replace(timer);
        session
    }

    /// Mirror every [`Event`] into `sink`.
    pub fn with_events(mut self, sink: UnboundedSender<Event>) -> Self {
        self.events = Some(sink);
        // Nothing has started yet, so the timer can simply be rebuilt.
        let timer = self.build_timer();
        self.driver.replace(timer);
        self
    }

    pub fn timer(&self) -> &CountdownTimer {
        self.driver.timer()
    }

    pub fn description(&self) -> &str {
        &self.options.description
    }

    /// Run until `Input::Quit` arrives or the input channel closes.
    pub async fn run(&mut self, mut inputs: UnboundedReceiver<Input>) -> Result<()> {
        self.show_initial_clock();
        self.refresh_log();

        loop {
            // Queued completions are handled before any further input.
            tokio::select! {
                biased;
                Some(request) = self.completion_rx.recv() => self.complete(request),
                Some(update) = self.log_rx.recv() => self.apply_log_update(update),
                tick = self.driver.next_tick() => self.on_tick(tick),
                input = inputs.recv() => match input {
                    Some(Input::Quit) | None => break,
                    Some(input) => self.handle_input(input),
                },
            }
        }

        self.alarm.silence();
        tracing::info!("session ended");
        Ok(())
    }

    pub fn handle_input(&mut self, input: Input) {
        match input {
            Input::Start => self.start(),
            Input::Silence => {
                self.alarm.silence();
                self.notify("alarm silenced");
            }
            Input::SetTask(description) => {
                tracing::debug!(description = %description, "task description set");
                self.options.description = description;
            }
            Input::Quit => {}
        }
    }

    /// Fetch the log in the background; the result is drawn when it lands.
    pub fn refresh_log(&self) {
        let client = self.client.clone();
        let tx = self.log_tx.clone();
        tokio::spawn(async move {
            fetch_into(&client, &tx).await;
        });
    }

    fn start(&mut self) {
        if self.driver.timer().expired() {
            // An expired timer is never reused; a fresh one starts the next cycle.
            self.alarm.silence();
            let timer = self.build_timer();
            self.driver.replace(timer);
            self.show_initial_clock();
        }

        if self.driver.start() {
            tracing::info!(duration_secs = self.options.duration_secs, "countdown started");
            self.emit(Event::TimerStarted {
                duration_secs: self.options.duration_secs,
                remaining_secs: self.driver.timer().remaining_secs(),
                at: Utc::now(),
            });
        } else {
            tracing::debug!(state = ?self.driver.timer().state(), "start ignored");
        }
    }

    fn build_timer(&self) -> CountdownTimer {
        let mut timer = CountdownTimer::new(self.options.duration_secs);
        timer.on_tick(Presenter::new(
            self.surface.clone(),
            self.completion_tx.clone(),
            self.options.duration_secs,
        ));
        timer
    }

    fn on_tick(&mut self, tick: Tick) {
        self.emit(Event::TimerTicked {
            remaining_secs: tick.remaining_secs,
            at: Utc::now(),
        });
        if tick.expired {
            tracing::info!("countdown expired");
            self.emit(Event::TimerExpired {
                duration_secs: self.options.duration_secs,
                at: Utc::now(),
            });
        }
    }

    fn complete(&mut self, request: CompletionRequest) {
        tracing::debug!(duration_secs = request.duration_secs, at = %request.at, "completion requested");
        self.alarm.play();

        let description = self.options.description.clone();
        let client = self.client.clone();
        let tx = self.log_tx.clone();
        tokio::spawn(async move {
            match client.record_completion(&description).await {
                Ok(recorded) => {
                    let _ = tx.send(LogUpdate::Recorded(recorded));
                }
                Err(e) => {
                    let _ = tx.send(LogUpdate::Failed {
                        operation: "record",
                        message: e.to_string(),
                    });
                    return;
                }
            }
            fetch_into(&client, &tx).await;
        });
    }

    fn apply_log_update(&mut self, update: LogUpdate) {
        match update {
            LogUpdate::Recorded(description) => {
                tracing::info!(description = %description, "completion recorded");
                self.emit(Event::CompletionRecorded {
                    description,
                    at: Utc::now(),
                });
            }
            LogUpdate::Refreshed(entries) => {
                let lines = render_log(&entries);
                match self.surface.lock() {
                    Ok(mut surface) => surface.show_log(&lines),
                    Err(_) => tracing::warn!("surface lock poisoned, task list not drawn"),
                }
                self.emit(Event::LogRefreshed {
                    entries: entries.len(),
                    at: Utc::now(),
                });
            }
            LogUpdate::Failed { operation, message } => {
                // Diagnostics only; the surface keeps whatever it last showed.
                tracing::error!(operation, error = %message, "task log request failed");
            }
        }
    }

    fn show_initial_clock(&self) {
        let text = format_clock(self.driver.timer().components());
        let state = if self.driver.timer().expired() {
            DisplayState::Expired
        } else {
            DisplayState::Normal
        };
        if let Ok(mut surface) = self.surface.lock() {
            surface.show_clock(&text, state);
        }
    }

    fn notify(&self, message: &str) {
        if let Ok(mut surface) = self.surface.lock() {
            surface.notify(message);
        }
    }

    fn emit(&self, event: Event) {
        if let Some(sink) = &self.events {
            let _ = sink.send(event);
        }
    }
}

async fn fetch_into(client: &TaskLogClient, tx: &UnboundedSender<LogUpdate>) {
    let update = match client.fetch_log().await {
        Ok(entries) => LogUpdate::Refreshed(entries),
        Err(e) => LogUpdate::Failed {
            operation: "fetch",
            message: e.to_string(),
        },
    };
    let _ = tx.send(update);
}
