//! Terminal panel for checklist, journal, and progress output

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::checklist::{Checklist, MILESTONES};
use crate::domain::journal::JournalEntry;

/// Renders controller state to the terminal.
///
/// Journal lines and status go to stderr, leaving stdout clean for
/// machine-readable output (config values, saved paths).
pub struct ConsolePanel {
    spinner: Option<ProgressBar>,
}

impl ConsolePanel {
    /// Create a new panel
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Print one journal entry, errors in red
    pub fn print_entry(entry: &JournalEntry) {
        if entry.is_error() {
            eprintln!("{}", entry.to_string().red());
        } else {
            eprintln!("{}", entry);
        }
    }

    /// Print a milestone completion line
    pub fn milestone_done(index: usize) {
        if let Some(description) = MILESTONES.get(index) {
            eprintln!("{} {}", "✓".green(), description);
        }
    }

    /// Render the full checklist
    pub fn checklist(&self, checklist: &Checklist) {
        eprintln!("{}", "Setup checklist:".bold());
        for (_, description, completed) in checklist.entries() {
            if completed {
                eprintln!("  {} {}", "[✓]".green(), description);
            } else {
                eprintln!("  [ ] {}", description);
            }
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Show a recording progress spinner
    pub fn show_recording_progress(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.red} {msg}")
        {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Update the progress line with elapsed/total time
    pub fn update_recording_progress(&self, elapsed_ms: u64, total_ms: u64) {
        if let Some(spinner) = &self.spinner {
            spinner.set_message(format!(
                "Recording... {}",
                self.format_progress(elapsed_ms, total_ms)
            ));
        }
    }

    /// Clear the progress spinner
    pub fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    /// Format a recording progress bar
    pub fn format_progress(&self, elapsed_ms: u64, total_ms: u64) -> String {
        let elapsed_secs = elapsed_ms / 1000;
        let total_secs = total_ms / 1000;
        let percent = if total_ms > 0 {
            (elapsed_ms as f64 / total_ms as f64 * 100.0).min(100.0)
        } else {
            0.0
        };

        let bar_width = 20;
        let filled = ((percent / 100.0) * bar_width as f64) as usize;
        let empty = bar_width - filled;

        format!(
            "[{}{}] {:>3}s / {}s",
            "█".repeat(filled).red(),
            "░".repeat(empty),
            elapsed_secs,
            total_secs
        )
    }
}

impl Default for ConsolePanel {
    fn default() -> Self {
        Self::new()
    }
}
