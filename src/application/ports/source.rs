//! Capture source port interfaces and the acquired-stream model

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// Capture acquisition errors
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    #[error("Capture permission denied: {0}")]
    Denied(String),

    #[error("Capture not supported: {0}")]
    Unsupported(String),

    #[error("No capture device available")]
    NoDevice,

    #[error("Failed to acquire stream: {0}")]
    AcquireFailed(String),
}

/// Track content kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackKind {
    Audio,
    Video,
}

/// Descriptor for one track of an acquired stream: the host capture
/// facility that produces it and the target to open on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureInput {
    /// Capture facility, e.g. "pulse", "x11grab", "avfoundation", "dshow"
    pub facility: String,
    /// Device or target within the facility, e.g. "default", ":0.0",
    /// a sink monitor name
    pub target: String,
}

impl CaptureInput {
    /// Create a capture input descriptor
    pub fn new(facility: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            facility: facility.into(),
            target: target.into(),
        }
    }
}

/// One live track of an acquired stream.
///
/// The liveness flag is the track's stop handle: every consumer of the
/// track observes the same flag, and `stop` releases the underlying
/// capture. [`duplicate`](Self::duplicate) creates a track over the
/// same input with an independent lifecycle.
#[derive(Debug)]
pub struct MediaTrack {
    kind: TrackKind,
    input: CaptureInput,
    live: Arc<AtomicBool>,
}

impl MediaTrack {
    /// Create a live track for a capture input
    pub fn new(kind: TrackKind, input: CaptureInput) -> Self {
        Self {
            kind,
            input,
            live: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Audio or video
    pub fn kind(&self) -> TrackKind {
        self.kind
    }

    /// The capture input this track reads from
    pub fn input(&self) -> &CaptureInput {
        &self.input
    }

    /// Whether the track is still capturing
    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }

    /// Release the track's capture resource
    pub fn stop(&self) {
        self.live.store(false, Ordering::SeqCst);
    }

    /// Duplicate into an independently stoppable track over the same
    /// capture input.
    pub fn duplicate(&self) -> MediaTrack {
        MediaTrack::new(self.kind, self.input.clone())
    }
}

/// An acquired capture stream: an ordered set of live tracks.
#[derive(Debug, Default)]
pub struct MediaStream {
    tracks: Vec<MediaTrack>,
}

impl MediaStream {
    /// Create a stream from its tracks
    pub fn new(tracks: Vec<MediaTrack>) -> Self {
        Self { tracks }
    }

    /// Create a single-track stream
    pub fn from_track(track: MediaTrack) -> Self {
        Self {
            tracks: vec![track],
        }
    }

    /// All tracks in order
    pub fn tracks(&self) -> &[MediaTrack] {
        &self.tracks
    }

    /// The first audio track, if any
    pub fn audio_track(&self) -> Option<&MediaTrack> {
        self.tracks.iter().find(|t| t.kind() == TrackKind::Audio)
    }

    /// The first video track, if any
    pub fn video_track(&self) -> Option<&MediaTrack> {
        self.tracks.iter().find(|t| t.kind() == TrackKind::Video)
    }

    /// Whether the stream carries an audio track
    pub fn has_audio(&self) -> bool {
        self.audio_track().is_some()
    }

    /// Stop every track, releasing the underlying capture devices
    pub fn stop_tracks(&self) {
        for track in &self.tracks {
            track.stop();
        }
    }
}

/// Port for microphone stream acquisition (audio-only).
#[async_trait]
pub trait MicrophoneSource: Send + Sync {
    /// Acquire an audio-only capture stream from the default input.
    async fn acquire(&self) -> Result<MediaStream, CaptureError>;
}

/// Port for display stream acquisition (video plus optional system audio).
#[async_trait]
pub trait DisplaySource: Send + Sync {
    /// Acquire a display capture stream. The returned stream always has
    /// a video track; an audio track is present only when a system
    /// audio source is available.
    async fn acquire(&self) -> Result<MediaStream, CaptureError>;
}
