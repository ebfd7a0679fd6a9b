use chrono::{Local, NaiveTime};
use std::collections::VecDeque;

/// Number of entries the control screen keeps
pub const LOG_CAPACITY: usize = 10;

/// Shown while nothing has been logged yet
pub const LOG_PLACEHOLDER: &str = "Ready to connect...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub time: NaiveTime,
    pub message: String,
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.time.format("%H:%M:%S"), self.message)
    }
}

/// Bounded in-memory log, oldest entry evicted first
pub struct CommandLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl Default for CommandLog {
    fn default() -> Self {
        Self::with_capacity(LOG_CAPACITY)
    }
}

impl CommandLog {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a message stamped with the local wall clock
    pub fn push(&mut self, message: impl Into<String>) {
        self.push_at(Local::now().time(), message);
    }

    pub fn push_at(&mut self, time: NaiveTime, message: impl Into<String>) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            time,
            message: message.into(),
        });
    }

    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Text for the log label, oldest first
    pub fn render(&self) -> String {
        if self.entries.is_empty() {
            return LOG_PLACEHOLDER.to_string();
        }
        self.entries
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: u32) -> NaiveTime {
        NaiveTime::from_num_seconds_from_midnight_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_keeps_last_ten_oldest_first() {
        let mut log = CommandLog::default();
        for i in 1..=12 {
            log.push_at(at(i), format!("message {}", i));
        }

        assert_eq!(log.len(), 10);
        let messages: Vec<&str> = log.entries().map(|e| e.message.as_str()).collect();
        let expected: Vec<String> = (3..=12).map(|i| format!("message {}", i)).collect();
        assert_eq!(messages, expected);
    }

    #[test]
    fn test_placeholder_when_empty() {
        let mut log = CommandLog::default();
        assert_eq!(log.render(), LOG_PLACEHOLDER);

        log.push_at(at(3_661), "Connected to HC-05");
        assert_eq!(log.render(), "[01:01:01] Connected to HC-05");

        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.render(), LOG_PLACEHOLDER);
    }

    #[test]
    fn test_render_joins_lines() {
        let mut log = CommandLog::with_capacity(2);
        log.push_at(at(1), "a");
        log.push_at(at(2), "b");
        log.push_at(at(3), "c");
        assert_eq!(log.render(), "[00:00:02] b\n[00:00:03] c");
    }

    #[test]
    fn test_push_uses_wall_clock() {
        let mut log = CommandLog::default();
        log.push("Sent: F (Forward)");
        assert_eq!(log.len(), 1);
        assert!(log.render().ends_with("] Sent: F (Forward)"));
    }
}
