//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// CaptureCheck - verify your recording setup by capturing test sessions
#[derive(Parser, Debug)]
#[command(name = "capture-check")]
#[command(version = "1.0.0")]
#[command(about = "Record microphone and screen test sessions, saved as WebM files")]
#[command(long_about = None)]
pub struct Cli {
    /// Directory recordings are saved into (defaults to the download directory)
    #[arg(short = 'o', long, value_name = "DIR", env = "CAPTURE_CHECK_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Show a desktop notification when a recording is saved
    #[arg(short = 'n', long)]
    pub notify: bool,

    /// Play audio cues on recording start/stop
    #[arg(short = 'c', long)]
    pub cue: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record a microphone test session
    Mic {
        /// Recording duration (e.g., 10s, 1m, 2m30s)
        #[arg(short = 'd', long, value_name = "TIME")]
        duration: Option<String>,
    },
    /// Record a screen test session (plus system audio when configured)
    System {
        /// Recording duration (e.g., 10s, 1m, 2m30s)
        #[arg(short = 'd', long, value_name = "TIME")]
        duration: Option<String>,
    },
    /// Start and stop recordings interactively (the default)
    Interactive,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Print the config file path
    Path,
}

/// Valid configuration keys
pub const VALID_CONFIG_KEYS: [&str; 6] = [
    "output_dir",
    "duration",
    "notify",
    "cue",
    "display.screen",
    "display.audio_source",
];

/// Check whether a key names a known config field
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys_validate() {
        for key in VALID_CONFIG_KEYS {
            assert!(is_valid_config_key(key), "{} should be valid", key);
        }
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(!is_valid_config_key("api_key"));
        assert!(!is_valid_config_key(""));
        assert!(!is_valid_config_key("display"));
    }
}
