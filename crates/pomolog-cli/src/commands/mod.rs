pub mod config;
pub mod log;
pub mod run;

use pomolog_core::{Config, TaskLogClient};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Runtime for commands that talk to the task log.
pub fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
}

/// Client for the configured service, with an optional base URL override.
pub fn log_client(config: &Config, base_url: Option<&str>) -> Result<TaskLogClient, pomolog_core::CoreError> {
    let base = base_url.unwrap_or(&config.server.base_url);
    TaskLogClient::new(base, config.server.timeout())
}
