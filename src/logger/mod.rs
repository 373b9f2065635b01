//! Activity log: append-only line-delimited JSON.
//!
//! Each line is a self-contained JSON object describing one pipeline event,
//! so the history of what was parsed and listed can be tailed or replayed by
//! other tooling. Logging must never take a run down: a failed file write
//! degrades to stderr, and a failed stderr write is dropped.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::config::Config;

/// Severity level for activity events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Activity event types covering the listing pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    AccountParsed,
    ListingGenerated,
    UsageRecorded,
    UsageReset,
    BatchCompleted,
    Error,
}

/// One activity line. Only `ts`, `event`, and `severity` are always present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// ISO 8601 UTC timestamp.
    pub ts: String,
    pub event: EventType,
    pub severity: Severity,
    /// Account folder the event refers to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    /// Normalized server code of the parsed account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    /// Character length of a generated title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_chars: Option<usize>,
    /// Champions featured in a generated title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub champions_featured: Option<usize>,
    /// Names whose counters were bumped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub names_recorded: Option<usize>,
    /// Accounts processed by a batch run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accounts_processed: Option<usize>,
    /// Accounts a batch run failed on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accounts_failed: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl LogEntry {
    /// Create a new entry stamped with the current UTC time.
    #[must_use]
    pub fn new(event: EventType, severity: Severity) -> Self {
        Self {
            ts: format_utc_now(),
            event,
            severity,
            account: None,
            server: None,
            title_chars: None,
            champions_featured: None,
            names_recorded: None,
            accounts_processed: None,
            accounts_failed: None,
            error_code: None,
            error_message: None,
            details: None,
        }
    }
}

#[derive(Debug)]
enum Sink {
    File(File),
    Stderr,
    Disabled,
}

/// Append-only activity log with stderr degradation.
#[derive(Debug)]
pub struct ActivityLog {
    sink: Sink,
}

impl ActivityLog {
    /// A log that drops every entry.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            sink: Sink::Disabled,
        }
    }

    /// Open `path` for appending, creating parent directories as needed.
    /// An unopenable path degrades to stderr instead of failing.
    #[must_use]
    pub fn open(path: &Path) -> Self {
        if let Some(parent) = path.parent()
            && let Err(error) = fs::create_dir_all(parent)
        {
            let _ = writeln!(
                io::stderr(),
                "[ALH-LOG] cannot create {}: {error}, logging to stderr",
                parent.display()
            );
            return Self { sink: Sink::Stderr };
        }
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Self {
                sink: Sink::File(file),
            },
            Err(error) => {
                let _ = writeln!(
                    io::stderr(),
                    "[ALH-LOG] cannot open {}: {error}, logging to stderr",
                    path.display()
                );
                Self { sink: Sink::Stderr }
            }
        }
    }

    /// Build the log the configuration asks for.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        if config.telemetry.activity_log_enabled {
            Self::open(&config.paths.activity_log_file)
        } else {
            Self::disabled()
        }
    }

    /// Append one entry as a single JSONL line. Never fails.
    pub fn record(&mut self, entry: &LogEntry) {
        if matches!(self.sink, Sink::Disabled) {
            return;
        }
        let line = match serde_json::to_string(entry) {
            Ok(json) => format!("{json}\n"),
            Err(error) => {
                let _ = writeln!(io::stderr(), "[ALH-LOG] serialize error: {error}");
                return;
            }
        };
        if let Sink::File(file) = &mut self.sink
            && file.write_all(line.as_bytes()).is_err()
        {
            self.sink = Sink::Stderr;
        }
        if matches!(self.sink, Sink::Stderr) {
            let _ = write!(io::stderr(), "[ALH-LOG] {line}");
        }
    }
}

fn format_utc_now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_land_as_valid_json_lines() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("activity.jsonl");
        let mut log = ActivityLog::open(&path);

        let mut entry = LogEntry::new(EventType::AccountParsed, Severity::Info);
        entry.account = Some("acc-1".to_string());
        entry.server = Some("EUW".to_string());
        log.record(&entry);
        log.record(&LogEntry::new(EventType::UsageReset, Severity::Info));

        let contents = fs::read_to_string(&path).expect("read log");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        let parsed: serde_json::Value = serde_json::from_str(lines[0]).expect("json");
        assert_eq!(parsed["event"], "account_parsed");
        assert_eq!(parsed["severity"], "info");
        assert_eq!(parsed["account"], "acc-1");
    }

    #[test]
    fn none_fields_are_omitted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("sparse.jsonl");
        let mut log = ActivityLog::open(&path);
        log.record(&LogEntry::new(EventType::ListingGenerated, Severity::Info));

        let line = fs::read_to_string(&path).expect("read log");
        assert!(!line.contains("\"account\""));
        assert!(!line.contains("\"error_code\""));
    }

    #[test]
    fn open_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("activity.jsonl");
        let mut log = ActivityLog::open(&path);
        log.record(&LogEntry::new(EventType::BatchCompleted, Severity::Info));
        assert!(path.exists());
    }

    #[test]
    fn appends_across_reopens() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("activity.jsonl");
        for _ in 0..2 {
            let mut log = ActivityLog::open(&path);
            log.record(&LogEntry::new(EventType::UsageRecorded, Severity::Info));
        }
        let contents = fs::read_to_string(&path).expect("read log");
        assert_eq!(contents.lines().count(), 2);
    }

    #[test]
    fn disabled_log_writes_nothing() {
        let mut log = ActivityLog::disabled();
        log.record(&LogEntry::new(EventType::Error, Severity::Error));
    }

    #[test]
    fn from_config_honors_the_telemetry_flag() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut config = Config::default();
        config.paths.activity_log_file = dir.path().join("activity.jsonl");
        config.telemetry.activity_log_enabled = false;

        let mut log = ActivityLog::from_config(&config);
        log.record(&LogEntry::new(EventType::AccountParsed, Severity::Info));
        assert!(!config.paths.activity_log_file.exists());
    }
}
