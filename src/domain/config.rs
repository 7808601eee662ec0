//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::duration::Duration;

/// Display-capture specific configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Screen to grab, e.g. ":0.0". Defaults to the DISPLAY environment.
    pub screen: Option<String>,
    /// System-audio source, e.g. a PulseAudio sink monitor. When unset,
    /// the display stream carries no audio track.
    pub audio_source: Option<String>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub output_dir: Option<String>,
    pub duration: Option<String>,
    pub notify: Option<bool>,
    pub cue: Option<bool>,
    pub display: Option<DisplayConfig>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            output_dir: None,
            duration: Some("10s".to_string()),
            notify: Some(false),
            cue: Some(false),
            display: Some(DisplayConfig {
                screen: None,
                audio_source: None,
            }),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            output_dir: other.output_dir.or(self.output_dir),
            duration: other.duration.or(self.duration),
            notify: other.notify.or(self.notify),
            cue: other.cue.or(self.cue),
            display: Self::merge_display(self.display, other.display),
        }
    }

    fn merge_display(
        base: Option<DisplayConfig>,
        other: Option<DisplayConfig>,
    ) -> Option<DisplayConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(DisplayConfig {
                screen: o.screen.or(b.screen),
                audio_source: o.audio_source.or(b.audio_source),
            }),
        }
    }

    /// Get duration as parsed Duration, or default if not set/invalid
    pub fn duration_or_default(&self) -> Duration {
        self.duration
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Configured output directory, if any
    pub fn output_dir(&self) -> Option<PathBuf> {
        self.output_dir.as_ref().map(PathBuf::from)
    }

    /// Whether desktop notifications are enabled
    pub fn notify_or_default(&self) -> bool {
        self.notify.unwrap_or(false)
    }

    /// Whether audio cues are enabled
    pub fn cue_or_default(&self) -> bool {
        self.cue.unwrap_or(false)
    }

    /// Configured screen to grab, if any
    pub fn screen(&self) -> Option<&str> {
        self.display.as_ref()?.screen.as_deref()
    }

    /// Configured system-audio source, if any
    pub fn audio_source(&self) -> Option<&str> {
        self.display.as_ref()?.audio_source.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_duration() {
        let config = AppConfig::defaults();
        assert_eq!(config.duration_or_default().as_secs(), 10);
        assert!(!config.notify_or_default());
        assert!(!config.cue_or_default());
    }

    #[test]
    fn merge_prefers_other() {
        let base = AppConfig {
            duration: Some("10s".into()),
            notify: Some(false),
            ..AppConfig::empty()
        };
        let override_config = AppConfig {
            duration: Some("30s".into()),
            ..AppConfig::empty()
        };

        let merged = base.merge(override_config);
        assert_eq!(merged.duration.as_deref(), Some("30s"));
        assert_eq!(merged.notify, Some(false));
    }

    #[test]
    fn merge_display_sections() {
        let base = AppConfig {
            display: Some(DisplayConfig {
                screen: Some(":0.0".into()),
                audio_source: None,
            }),
            ..AppConfig::empty()
        };
        let other = AppConfig {
            display: Some(DisplayConfig {
                screen: None,
                audio_source: Some("alsa_output.pci.analog-stereo.monitor".into()),
            }),
            ..AppConfig::empty()
        };

        let merged = base.merge(other);
        assert_eq!(merged.screen(), Some(":0.0"));
        assert_eq!(
            merged.audio_source(),
            Some("alsa_output.pci.analog-stereo.monitor")
        );
    }

    #[test]
    fn invalid_duration_falls_back_to_default() {
        let config = AppConfig {
            duration: Some("not-a-duration".into()),
            ..AppConfig::empty()
        };
        assert_eq!(config.duration_or_default().as_secs(), 10);
    }

    #[test]
    fn output_dir_path() {
        let config = AppConfig {
            output_dir: Some("/tmp/recordings".into()),
            ..AppConfig::empty()
        };
        assert_eq!(config.output_dir(), Some(PathBuf::from("/tmp/recordings")));
    }
}
