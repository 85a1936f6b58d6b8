//! # pomolog Core Library
//!
//! Core logic for the pomolog countdown timer and its task-completion log.
//! The CLI binary is a thin layer of input and terminal drawing over this
//! library.
//!
//! ## Architecture
//!
//! - **Timer**: a countdown state machine ticked once per second by a
//!   single tokio interval; observers are notified in registration order
//! - **Presentation**: clock formatting, expiry detection and log rendering
//!   onto a [`Surface`]
//! - **Task log**: HTTP client for the remote append-only task log
//! - **Session**: composition root wiring the above together
//!
//! ## Key Components
//!
//! - [`CountdownTimer`]: countdown state machine
//! - [`CountdownDriver`]: the one-second schedule
//! - [`TaskLogClient`]: record and fetch completed tasks
//! - [`Session`]: one interactive run
//! - [`Config`]: application configuration management

pub mod error;
pub mod events;
pub mod present;
pub mod session;
pub mod storage;
pub mod tasklog;
pub mod timer;

pub use error::{ConfigError, CoreError};
pub use events::Event;
pub use present::{format_clock, render_log, DisplayState, Presenter, RecordingSurface, SharedSurface, Surface};
pub use session::{Alarm, Input, Session, SessionOptions, SilentAlarm};
pub use storage::Config;
pub use tasklog::{TaskLogClient, TaskLogEntry, UNKNOWN_TASK};
pub use timer::{CountdownDriver, CountdownState, CountdownTimer, Tick, TickObserver, TimeComponents};
