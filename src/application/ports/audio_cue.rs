//! Audio cue port interface

use async_trait::async_trait;
use thiserror::Error;

/// Audio cue errors
#[derive(Debug, Clone, Error)]
pub enum AudioCueError {
    #[error("Audio output device not available: {0}")]
    DeviceNotAvailable(String),

    #[error("Failed to play cue: {0}")]
    PlaybackFailed(String),
}

/// The cues played around a recording lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCueType {
    RecordingStart,
    RecordingStop,
}

/// Port for audible recording feedback
#[async_trait]
pub trait AudioCue: Send + Sync {
    /// Play a cue. Failures are non-fatal to the recording flow.
    async fn play(&self, cue_type: AudioCueType) -> Result<(), AudioCueError>;
}
