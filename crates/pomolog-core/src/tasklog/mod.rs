//! Client side of the remote task log.

mod client;
mod entry;

pub use client::TaskLogClient;
pub use entry::{describe, LogTimestamp, TaskLogEntry, UNKNOWN_TASK};
