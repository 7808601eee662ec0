//! Capture kind and artifact label value objects

use std::fmt;

/// The two independent recording kinds.
///
/// Each kind owns at most one active session at a time; the kinds share
/// no state and may record concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureKind {
    /// Microphone audio capture
    Microphone,
    /// Display capture (screen video plus optional system audio)
    System,
}

impl CaptureKind {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Microphone => "microphone",
            Self::System => "system",
        }
    }
}

impl fmt::Display for CaptureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Label stamped onto a finished artifact and its filename.
///
/// The system kind can produce two artifacts per cycle: the primary
/// `System` recording and, when the display stream carried an audio
/// track, a parallel `SystemAudio` recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactLabel {
    Microphone,
    System,
    SystemAudio,
}

impl ArtifactLabel {
    /// Get the string representation used in filenames
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Microphone => "microphone",
            Self::System => "system",
            Self::SystemAudio => "system-audio",
        }
    }

    /// The kind whose lifecycle owns sessions with this label
    pub const fn kind(&self) -> CaptureKind {
        match self {
            Self::Microphone => CaptureKind::Microphone,
            Self::System | Self::SystemAudio => CaptureKind::System,
        }
    }
}

impl fmt::Display for ArtifactLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
