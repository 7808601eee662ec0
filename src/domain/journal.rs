//! Append-only status journal

use std::fmt;

use chrono::{DateTime, Local};

/// One timestamped journal line.
///
/// Entries are never mutated after creation; errors render with the
/// "Error -" prefix.
#[derive(Debug, Clone)]
pub struct JournalEntry {
    timestamp: DateTime<Local>,
    message: String,
    is_error: bool,
}

impl JournalEntry {
    fn new(message: impl Into<String>, is_error: bool) -> Self {
        Self {
            timestamp: Local::now(),
            message: message.into(),
            is_error,
        }
    }

    /// When the entry was appended
    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// The raw message, without timestamp or error prefix
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether this entry records an error
    pub fn is_error(&self) -> bool {
        self.is_error
    }
}

impl fmt::Display for JournalEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let time = self.timestamp.format("%H:%M:%S");
        if self.is_error {
            write!(f, "{}: Error - {}", time, self.message)
        } else {
            write!(f, "{}: {}", time, self.message)
        }
    }
}

/// Append-only record of status and error messages.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    /// Create an empty journal
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an informational entry
    pub fn log(&mut self, message: impl Into<String>) -> &JournalEntry {
        self.push(JournalEntry::new(message, false))
    }

    /// Append an error entry
    pub fn log_error(&mut self, message: impl Into<String>) -> &JournalEntry {
        self.push(JournalEntry::new(message, true))
    }

    fn push(&mut self, entry: JournalEntry) -> &JournalEntry {
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    /// All entries in append order
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether any entry has been appended
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The newest entry, if any
    pub fn last(&self) -> Option<&JournalEntry> {
        self.entries.last()
    }

    /// Count of error entries
    pub fn error_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_error()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_appends_in_order() {
        let mut journal = Journal::new();
        journal.log("first");
        journal.log("second");

        assert_eq!(journal.len(), 2);
        assert_eq!(journal.entries()[0].message(), "first");
        assert_eq!(journal.entries()[1].message(), "second");
        assert_eq!(journal.last().map(JournalEntry::message), Some("second"));
    }

    #[test]
    fn errors_are_flagged_and_prefixed() {
        let mut journal = Journal::new();
        let entry = journal.log_error("stream denied");

        assert!(entry.is_error());
        assert!(entry.to_string().contains("Error - stream denied"));
        assert_eq!(journal.error_count(), 1);
    }

    #[test]
    fn info_entries_have_no_error_prefix() {
        let mut journal = Journal::new();
        let entry = journal.log("recording started");

        assert!(!entry.is_error());
        assert!(!entry.to_string().contains("Error -"));
        assert!(entry.to_string().ends_with("recording started"));
    }

    #[test]
    fn display_includes_timestamp() {
        let mut journal = Journal::new();
        let line = journal.log("hello").to_string();
        // HH:MM:SS prefix before the message
        assert!(line.matches(':').count() >= 2);
        assert!(line.ends_with(": hello"));
    }
}
