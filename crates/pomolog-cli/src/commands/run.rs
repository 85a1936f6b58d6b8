use std::io::IsTerminal;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Args;
use pomolog_core::{Alarm, Config, Event, Input, Session, SessionOptions, SharedSurface, SilentAlarm};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedSender};

use super::{log_client, runtime, CommandResult};
use crate::terminal::{parse_input, TerminalBell, TerminalSurface, HELP};

#[derive(Args)]
pub struct RunArgs {
    /// Task description recorded on completion
    #[arg(short, long)]
    task: Option<String>,
    /// Countdown length in seconds (overrides timer.duration_secs)
    #[arg(short, long)]
    duration: Option<u64>,
    /// Task log service URL (overrides server.base_url)
    #[arg(long)]
    base_url: Option<String>,
    /// Start counting down immediately
    #[arg(long)]
    now: bool,
    /// Print every session event as a JSON line on stderr
    #[arg(long)]
    events: bool,
}

pub fn run(args: RunArgs) -> CommandResult {
    let config = Config::load_or_default();
    let client = log_client(&config, args.base_url.as_deref())?;

    let mut options = SessionOptions::from(&config);
    if let Some(duration) = args.duration {
        options.duration_secs = duration;
    }
    if let Some(task) = args.task {
        options.description = task;
    }

    let (start_now, print_events) = (args.now, args.events);
    let rt = runtime()?;
    let result = rt.block_on(async move {
        let stdout = std::io::stdout();
        let color = stdout.is_terminal();
        let surface: SharedSurface = Arc::new(Mutex::new(TerminalSurface::new(stdout, color)));

        let alarm: Box<dyn Alarm> = if config.alarm.enabled {
            Box::new(TerminalBell::new(Duration::from_secs(
                config.alarm.ring_interval_secs.max(1),
            )))
        } else {
            Box::new(SilentAlarm)
        };

        let mut session = Session::new(options, client, surface, alarm);
        if print_events {
            let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();
            session = session.with_events(event_tx);
            tokio::spawn(async move {
                while let Some(event) = event_rx.recv().await {
                    match serde_json::to_string(&event) {
                        Ok(line) => eprintln!("{line}"),
                        Err(e) => tracing::warn!(error = %e, "cannot serialize event"),
                    }
                }
            });
        }

        let (input_tx, input_rx) = mpsc::unbounded_channel();
        if start_now {
            let _ = input_tx.send(Input::Start);
        }
        eprintln!("{HELP}");
        spawn_ctrl_c(input_tx.clone());
        spawn_stdin_reader(input_tx);

        session.run(input_rx).await
    });

    // A blocking stdin read may still be parked; don't wait on it.
    rt.shutdown_timeout(Duration::from_millis(200));
    result?;

    println!();
    Ok(())
}

fn spawn_stdin_reader(tx: UnboundedSender<Input>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => match parse_input(&line) {
                    Some(Input::Quit) => {
                        let _ = tx.send(Input::Quit);
                        break;
                    }
                    Some(input) => {
                        if tx.send(input).is_err() {
                            break;
                        }
                    }
                    None => eprintln!("{HELP}"),
                },
                Ok(None) => {
                    tracing::debug!("stdin closed, ctrl-c to quit");
                    break;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "stdin read failed");
                    break;
                }
            }
        }
    });
}

fn spawn_ctrl_c(tx: UnboundedSender<Input>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = tx.send(Input::Quit);
        }
    });
}
