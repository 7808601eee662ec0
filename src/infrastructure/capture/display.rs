//! Display capture source adapter

#[cfg(target_os = "linux")]
use std::env;

use async_trait::async_trait;

use crate::application::ports::{
    CaptureError, CaptureInput, DisplaySource, MediaStream, MediaTrack, TrackKind,
};

/// Display stream acquisition over the platform screen-grab facility.
///
/// The video track targets the configured screen (or the session's
/// DISPLAY on X11). An audio track is added only when a system-audio
/// source (a sink monitor) has been configured; without one the stream
/// is video-only.
pub struct DisplayGrabSource {
    screen: Option<String>,
    audio_source: Option<String>,
}

impl DisplayGrabSource {
    /// Create a display source from configuration
    pub fn new(screen: Option<String>, audio_source: Option<String>) -> Self {
        Self {
            screen,
            audio_source,
        }
    }

    #[cfg(target_os = "linux")]
    fn video_input(&self) -> Result<CaptureInput, CaptureError> {
        let screen = match &self.screen {
            Some(screen) => screen.clone(),
            None => env::var("DISPLAY").map_err(|_| {
                CaptureError::Unsupported(
                    "no DISPLAY environment; screen capture requires an X11 session".into(),
                )
            })?,
        };
        Ok(CaptureInput::new("x11grab", screen))
    }

    #[cfg(target_os = "macos")]
    fn video_input(&self) -> Result<CaptureInput, CaptureError> {
        let screen = self.screen.clone().unwrap_or_else(|| "default:none".into());
        Ok(CaptureInput::new("avfoundation", screen))
    }

    #[cfg(target_os = "windows")]
    fn video_input(&self) -> Result<CaptureInput, CaptureError> {
        let screen = self.screen.clone().unwrap_or_else(|| "desktop".into());
        Ok(CaptureInput::new("gdigrab", screen))
    }

    #[cfg(target_os = "linux")]
    fn audio_input(&self) -> Option<CaptureInput> {
        self.audio_source
            .as_ref()
            .map(|source| CaptureInput::new("pulse", source.clone()))
    }

    #[cfg(not(target_os = "linux"))]
    fn audio_input(&self) -> Option<CaptureInput> {
        self.audio_source
            .as_ref()
            .map(|source| CaptureInput::new("loopback", source.clone()))
    }
}

#[async_trait]
impl DisplaySource for DisplayGrabSource {
    async fn acquire(&self) -> Result<MediaStream, CaptureError> {
        let video = self.video_input()?;

        let mut tracks = vec![MediaTrack::new(TrackKind::Video, video)];
        if let Some(audio) = self.audio_input() {
            tracks.push(MediaTrack::new(TrackKind::Audio, audio));
        }

        Ok(MediaStream::new(tracks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn configured_screen_is_used() {
        let source = DisplayGrabSource::new(Some(":1.0".into()), None);
        let stream = source.acquire().await.unwrap();

        let video = stream.video_track().expect("video track");
        assert_eq!(video.input().target, ":1.0");
        assert!(!stream.has_audio());
    }

    #[tokio::test]
    async fn audio_track_present_only_when_configured() {
        let source = DisplayGrabSource::new(
            Some(":0.0".into()),
            Some("alsa_output.pci.analog-stereo.monitor".into()),
        );
        let stream = source.acquire().await.unwrap();

        assert!(stream.has_audio());
        let audio = stream.audio_track().expect("audio track");
        assert_eq!(audio.input().target, "alsa_output.pci.analog-stereo.monitor");
    }
}
