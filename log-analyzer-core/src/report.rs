//! Aggregation of decoded entries into a [`Summary`] and rendering of the
//! fixed-format text report.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use crate::contract::LogEntry;

const LABEL_WIDTH: usize = 25;

/// Level buckets shown in the report, as `(label, level)`. Other levels are
/// counted in [`Summary::level_counts`] and in the total only.
pub const REPORTED_LEVELS: [(&str, &str); 4] = [
    ("INFO Logs", "info"),
    ("WARN Logs", "warning"),
    ("ERROR Logs", "error"),
    ("UNKNOWN Logs", "unknown"),
];

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    pub total_logs: usize,
    pub level_counts: HashMap<String, usize>,
    pub message_counts: HashMap<String, usize>,
}

impl Summary {
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a LogEntry>,
    {
        let mut summary = Summary::default();
        for entry in entries {
            summary.record(entry);
        }
        summary
    }

    pub fn record(&mut self, entry: &LogEntry) {
        self.total_logs += 1;
        *self.level_counts.entry(entry.level.clone()).or_default() += 1;
        *self.message_counts.entry(entry.message.clone()).or_default() += 1;
    }

    pub fn level_count(&self, level: &str) -> usize {
        self.level_counts.get(level).copied().unwrap_or(0)
    }

    /// All messages sharing the highest count, sorted, with that count.
    /// Empty with a count of 0 when nothing was recorded.
    pub fn most_frequent_messages(&self) -> (Vec<&str>, usize) {
        let max = self.message_counts.values().copied().max().unwrap_or(0);
        let mut messages: Vec<&str> = self
            .message_counts
            .iter()
            .filter(|(_, &count)| count == max)
            .map(|(message, _)| message.as_str())
            .collect();
        messages.sort_unstable();
        (messages, max)
    }

    /// The fixed-format report block; same text as the [`fmt::Display`] output.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (frequent, _) = self.most_frequent_messages();
        writeln!(f, "\n========= Log Analysis Summary =========")?;
        writeln!(
            f,
            "{:<LABEL_WIDTH$} : {}",
            "Total Logs Processed", self.total_logs
        )?;
        for (label, level) in REPORTED_LEVELS {
            writeln!(f, "{:<LABEL_WIDTH$} : {}", label, self.level_count(level))?;
        }
        writeln!(
            f,
            "{:<LABEL_WIDTH$} : {}",
            "Most Frequent Message",
            frequent.join(", ")
        )?;
        writeln!(f, "========================================")
    }
}

/// `Processing Time: <ms> ms <µs> µs`, where the µs part is the sub-millisecond remainder.
pub fn format_processing_time(elapsed: Duration) -> String {
    format!(
        "Processing Time: {} ms {} µs",
        elapsed.as_millis(),
        elapsed.as_micros() % 1000
    )
}
