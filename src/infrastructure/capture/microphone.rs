//! Microphone source adapter

use async_trait::async_trait;
use cpal::traits::HostTrait;

use crate::application::ports::{
    CaptureError, CaptureInput, MediaStream, MediaTrack, MicrophoneSource, TrackKind,
};

#[cfg(target_os = "linux")]
const AUDIO_FACILITY: (&str, &str) = ("pulse", "default");
#[cfg(target_os = "macos")]
const AUDIO_FACILITY: (&str, &str) = ("avfoundation", ":default");
#[cfg(target_os = "windows")]
const AUDIO_FACILITY: (&str, &str) = ("dshow", "audio=default");

/// Microphone stream acquisition through the platform audio server.
///
/// Acquisition verifies a default input device exists on the audio
/// host, then describes the default source for the encoder to open.
pub struct PulseMicrophoneSource;

impl PulseMicrophoneSource {
    /// Create a microphone source for the default input
    pub fn new() -> Self {
        Self
    }

    fn has_input_device() -> bool {
        cpal::default_host().default_input_device().is_some()
    }
}

impl Default for PulseMicrophoneSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MicrophoneSource for PulseMicrophoneSource {
    async fn acquire(&self) -> Result<MediaStream, CaptureError> {
        let available = tokio::task::spawn_blocking(Self::has_input_device)
            .await
            .map_err(|e| CaptureError::AcquireFailed(format!("Task join error: {}", e)))?;

        if !available {
            return Err(CaptureError::NoDevice);
        }

        let (facility, target) = AUDIO_FACILITY;
        Ok(MediaStream::from_track(MediaTrack::new(
            TrackKind::Audio,
            CaptureInput::new(facility, target),
        )))
    }
}
