//! Presentation adapter: turns ticks and log entries into text.

mod clock;
mod log_view;
mod presenter;

pub use clock::{format_clock, DisplayState, ExpiryLatch};
pub use log_view::render_log;
pub use presenter::{CompletionRequest, Presenter, SharedSurface};

/// Where the clock and the task list are drawn.
pub trait Surface {
    fn show_clock(&mut self, text: &str, state: DisplayState);
    fn show_log(&mut self, lines: &[String]);
    /// Short status line, e.g. "alarm silenced".
    fn notify(&mut self, message: &str);
}

/// In-memory surface that keeps everything it was asked to draw.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    pub clocks: Vec<(String, DisplayState)>,
    pub logs: Vec<Vec<String>>,
    pub notices: Vec<String>,
}

impl Surface for RecordingSurface {
    fn show_clock(&mut self, text: &str, state: DisplayState) {
        self.clocks.push((text.to_string(), state));
    }

    fn show_log(&mut self, lines: &[String]) {
        self.logs.push(lines.to_vec());
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}
