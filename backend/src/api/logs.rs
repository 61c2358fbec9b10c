//! Conversion logs, printed to stderr and streamed over SSE.
//!
//! Every entry goes through the process-wide [`LOG_BROADCASTER`]. Uploads
//! tag their entries with a job id through [`JobLog`] so a client following
//! `/api/logs` can pick out its own conversion.

use chrono::Utc;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Log level for client display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Upload this entry belongs to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    /// RFC 3339, UTC.
    pub timestamp: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            job_id: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn with_job(mut self, job_id: impl Into<String>) -> Self {
        self.job_id = Some(job_id.into());
        self
    }
}

/// Global log broadcaster
pub static LOG_BROADCASTER: Lazy<LogBroadcaster> = Lazy::new(LogBroadcaster::new);

/// Fans log entries out to stderr and every SSE subscriber.
pub struct LogBroadcaster {
    sender: broadcast::Sender<LogEntry>,
}

impl LogBroadcaster {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(256);
        Self { sender }
    }

    pub fn log(&self, entry: LogEntry) {
        let prefix = match entry.level {
            LogLevel::Info => "   ",
            LogLevel::Success => "   ✓",
            LogLevel::Warning => "   ⚠️",
            LogLevel::Error => "   ❌",
        };
        match entry.job_id {
            Some(ref job) => eprintln!("{} [{}] {}", prefix, short_job(job), entry.message),
            None => eprintln!("{} {}", prefix, entry.message),
        }

        // No subscribers is fine
        let _ = self.sender.send(entry);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LogEntry> {
        self.sender.subscribe()
    }
}

impl Default for LogBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

fn short_job(job_id: &str) -> &str {
    job_id.get(..8).unwrap_or(job_id)
}

pub fn log_info(msg: impl Into<String>) {
    LOG_BROADCASTER.log(LogEntry::new(LogLevel::Info, msg));
}

pub fn log_success(msg: impl Into<String>) {
    LOG_BROADCASTER.log(LogEntry::new(LogLevel::Success, msg));
}

pub fn log_warning(msg: impl Into<String>) {
    LOG_BROADCASTER.log(LogEntry::new(LogLevel::Warning, msg));
}

pub fn log_error(msg: impl Into<String>) {
    LOG_BROADCASTER.log(LogEntry::new(LogLevel::Error, msg));
}

/// Logger that tags every entry with one job id.
#[derive(Debug, Clone, Default)]
pub struct JobLog {
    job_id: Option<String>,
}

impl JobLog {
    /// Entries without a job id (CLI runs).
    pub fn untagged() -> Self {
        Self::default()
    }

    pub fn for_job(job_id: impl Into<String>) -> Self {
        Self {
            job_id: Some(job_id.into()),
        }
    }

    pub fn job_id(&self) -> Option<&str> {
        self.job_id.as_deref()
    }

    fn emit(&self, level: LogLevel, msg: impl Into<String>) {
        let entry = LogEntry::new(level, msg);
        let entry = match self.job_id {
            Some(ref job) => entry.with_job(job.clone()),
            None => entry,
        };
        LOG_BROADCASTER.log(entry);
    }

    pub fn info(&self, msg: impl Into<String>) {
        self.emit(LogLevel::Info, msg);
    }

    pub fn success(&self, msg: impl Into<String>) {
        self.emit(LogLevel::Success, msg);
    }

    pub fn warning(&self, msg: impl Into<String>) {
        self.emit(LogLevel::Warning, msg);
    }

    pub fn error(&self, msg: impl Into<String>) {
        self.emit(LogLevel::Error, msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_serialization() {
        let entry = LogEntry::new(LogLevel::Warning, "row 3 has no title").with_job("abc");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["level"], "warning");
        assert_eq!(json["jobId"], "abc");
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn test_untagged_entry_omits_job() {
        let entry = LogEntry::new(LogLevel::Info, "hello");
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("jobId").is_none());
    }

    #[test]
    fn test_subscribers_receive_entries() {
        let broadcaster = LogBroadcaster::new();
        let mut rx = broadcaster.subscribe();
        broadcaster.log(LogEntry::new(LogLevel::Success, "done").with_job("job-1"));

        let entry = rx.try_recv().unwrap();
        assert_eq!(entry.level, LogLevel::Success);
        assert_eq!(entry.message, "done");
        assert_eq!(entry.job_id.as_deref(), Some("job-1"));
    }

    #[test]
    fn test_short_job() {
        assert_eq!(short_job("0123456789abcdef"), "01234567");
        assert_eq!(short_job("abc"), "abc");
    }

    #[test]
    fn test_job_log_tag() {
        assert_eq!(JobLog::for_job("x").job_id(), Some("x"));
        assert_eq!(JobLog::untagged().job_id(), None);
    }
}
