use clap::Subcommand;
use pomolog_core::{render_log, Config};

use super::{log_client, runtime, CommandResult};

#[derive(Subcommand)]
pub enum LogAction {
    /// Show completed tasks, newest first
    List {
        /// Print the raw entries as JSON
        #[arg(long)]
        json: bool,
        /// Task log service URL (overrides server.base_url)
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Record a completed task without running a countdown
    Record {
        /// Task description ("unknown task" when empty)
        #[arg(default_value = "")]
        description: String,
        /// Task log service URL (overrides server.base_url)
        #[arg(long)]
        base_url: Option<String>,
    },
}

pub fn run(action: LogAction) -> CommandResult {
    let config = Config::load_or_default();
    let rt = runtime()?;

    match action {
        LogAction::List { json, base_url } => {
            let client = log_client(&config, base_url.as_deref())?;
            let entries = rt.block_on(client.fetch_log())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if entries.is_empty() {
                println!("No completed tasks.");
            } else {
                for line in render_log(&entries) {
                    println!("{line}");
                }
            }
        }
        LogAction::Record {
            description,
            base_url,
        } => {
            let client = log_client(&config, base_url.as_deref())?;
            let recorded = rt.block_on(client.record_completion(&description))?;
            println!("recorded: {recorded}");
        }
    }
    Ok(())
}
