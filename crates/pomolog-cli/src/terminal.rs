//! Terminal front end: clock line, task list, bell and stdin commands.

use std::io::Write;
use std::time::Duration;

use pomolog_core::{Alarm, DisplayState, Input, Surface};
use tokio::task::JoinHandle;

const CLEAR_LINE: &str = "\r\x1b[2K";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";
const BELL: &str = "\x07";
/// The bell gives up on its own after this many rings.
const MAX_RINGS: u32 = 30;

pub const HELP: &str =
    "commands: <enter>|start  silence|esc  task <description>  quit";

/// Draws onto any writer; stdout in practice.
pub struct TerminalSurface<W: Write> {
    out: W,
    color: bool,
    last_clock: Option<(String, DisplayState)>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out,
            color,
            last_clock: None,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw_clock(&mut self) {
        let Some((text, state)) = &self.last_clock else {
            return;
        };
        let result = match (state, self.color) {
            (DisplayState::Expired, true) => write!(self.out, "{CLEAR_LINE}{RED}{text}{RESET}"),
            (DisplayState::Expired, false) => write!(self.out, "{CLEAR_LINE}{text} (expired)"),
            (DisplayState::Normal, _) => write!(self.out, "{CLEAR_LINE}{text}"),
        };
        if let Err(e) = result.and_then(|_| self.out.flush()) {
            tracing::warn!(error = %e, "failed to draw clock");
        }
    }

    fn write_block(&mut self, block: &str) {
        let result = write!(self.out, "{CLEAR_LINE}{block}").and_then(|_| self.out.flush());
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to write to terminal");
        }
        self.draw_clock();
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn show_clock(&mut self, text: &str, state: DisplayState) {
        self.last_clock = Some((text.to_string(), state));
        self.draw_clock();
    }

    fn show_log(&mut self, lines: &[String]) {
        let mut block = String::from("Completed tasks:\n");
        if lines.is_empty() {
            block.push_str("  (none yet)\n");
        }
        for line in lines {
            block.push_str("  ");
            block.push_str(line);
            block.push('\n');
        }
        self.write_block(&block);
    }

    fn notify(&mut self, message: &str) {
        self.write_block(&format!("[{message}]\n"));
    }
}

/// Rings the terminal bell until silenced.
pub struct TerminalBell {
    interval: Duration,
    ringing: Option<JoinHandle<()>>,
}

impl TerminalBell {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            ringing: None,
        }
    }
}

impl Alarm for TerminalBell {
    fn play(&mut self) {
        self.silence();
        let interval = self.interval;
        self.ringing = Some(tokio::spawn(async move {
            for _ in 0..MAX_RINGS {
                let mut err = std::io::stderr();
                if write!(err, "{BELL}").and_then(|_| err.flush()).is_err() {
                    break;
                }
                tokio::time::sleep(interval).await;
            }
        }));
    }

    fn silence(&mut self) {
        if let Some(handle) = self.ringing.take() {
            handle.abort();
        }
    }
}

impl Drop for TerminalBell {
    fn drop(&mut self) {
        self.silence();
    }
}

/// Map one line typed on stdin to an input. `None` for unknown commands.
pub fn parse_input(line: &str) -> Option<Input> {
    let trimmed = line.trim();

    if let Some(rest) = trimmed.strip_prefix("task ") {
        return Some(Input::SetTask(rest.trim().to_string()));
    }

    match trimmed {
        "" | "start" | "s" => Some(Input::Start),
        "\x1b" | "esc" | "silence" => Some(Input::Silence),
        "task" => Some(Input::SetTask(String::new())),
        "q" | "quit" | "exit" => Some(Input::Quit),
        _ => None,
    }
}
