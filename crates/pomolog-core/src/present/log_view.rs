use crate::tasklog::TaskLogEntry;

/// One `"{ts} | {desc}"` line per entry, newest first.
///
/// The service returns entries oldest first, so the order is reversed.
pub fn render_log(entries: &[TaskLogEntry]) -> Vec<String> {
    entries.iter().rev().map(TaskLogEntry::display_line).collect()
}
