use serde::{Deserialize, Serialize};
use std::fmt;

/// Stand-in description for a completion recorded with an empty task field.
pub const UNKNOWN_TASK: &str = "unknown task";

/// Timestamp as sent by the log service. Only ever displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LogTimestamp {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for LogTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogTimestamp::Text(s) => f.write_str(s),
            LogTimestamp::Number(n) => write!(f, "{n}"),
        }
    }
}

/// One completed task as stored by the log service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskLogEntry {
    pub ts: LogTimestamp,
    #[serde(default)]
    pub desc: String,
}

impl TaskLogEntry {
    /// The `"{ts} | {desc}"` line shown in the task list.
    pub fn display_line(&self) -> String {
        format!("{} | {}", self.ts, self.desc)
    }
}

/// The description as given, or [`UNKNOWN_TASK`] when it is empty.
pub fn describe(description: &str) -> &str {
    if description.is_empty() {
        UNKNOWN_TASK
    } else {
        description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_description_becomes_unknown_task() {
        assert_eq!(describe(""), "unknown task");
    }

    #[test]
    fn non_empty_description_is_sent_verbatim() {
        assert_eq!(describe(" write docs "), " write docs ");
        assert_eq!(describe("  "), "  ");
    }

    #[test]
    fn parses_string_and_numeric_timestamps() {
        let entries: Vec<TaskLogEntry> = serde_json::from_str(
            r#"[{"ts":"2019-01-01T12:00:00Z","desc":"a"},{"ts":1546344000,"desc":"b","extra":true}]"#,
        )
        .unwrap();
        assert_eq!(entries[0].display_line(), "2019-01-01T12:00:00Z | a");
        assert_eq!(entries[1].display_line(), "1546344000 | b");
    }

    #[test]
    fn missing_desc_defaults_to_empty() {
        let entry: TaskLogEntry = serde_json::from_str(r#"{"ts":"12:00"}"#).unwrap();
        assert_eq!(entry.desc, "");
    }
}
