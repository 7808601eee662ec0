//! Codec profiles for the WebM container

use std::fmt;

use crate::domain::capture::ArtifactLabel;

/// Media types produced by the encoder.
///
/// Everything ships in a WebM container; the difference is whether a
/// video track is present alongside the Opus audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaMimeType {
    /// Opus audio in WebM
    WebmAudio,
    /// VP8 video plus Opus audio in WebM
    WebmVideo,
}

impl MediaMimeType {
    /// Get the MIME type string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WebmAudio => "audio/webm;codecs=opus",
            Self::WebmVideo => "video/webm;codecs=vp8,opus",
        }
    }

    /// Get the file extension (shared container for both types)
    pub const fn extension(&self) -> &'static str {
        "webm"
    }

    /// Whether this type carries a video track
    pub const fn has_video(&self) -> bool {
        matches!(self, Self::WebmVideo)
    }
}

impl fmt::Display for MediaMimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Encoder configuration for one artifact label.
///
/// The mapping is a fixed table: microphone and system-audio record
/// audio-only, the primary system recording adds the VP8 video track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecProfile {
    mime_type: MediaMimeType,
    audio_codec: &'static str,
    video_codec: Option<&'static str>,
}

impl CodecProfile {
    /// Audio-only profile (Opus in WebM)
    pub const fn audio() -> Self {
        Self {
            mime_type: MediaMimeType::WebmAudio,
            audio_codec: "libopus",
            video_codec: None,
        }
    }

    /// Video-plus-audio profile (VP8 + Opus in WebM)
    pub const fn video() -> Self {
        Self {
            mime_type: MediaMimeType::WebmVideo,
            audio_codec: "libopus",
            video_codec: Some("libvpx"),
        }
    }

    /// Look up the profile for an artifact label
    pub const fn for_label(label: ArtifactLabel) -> Self {
        match label {
            ArtifactLabel::Microphone | ArtifactLabel::SystemAudio => Self::audio(),
            ArtifactLabel::System => Self::video(),
        }
    }

    /// The media type artifacts of this profile are tagged with
    pub const fn mime_type(&self) -> MediaMimeType {
        self.mime_type
    }

    /// Encoder identifier for the audio track
    pub const fn audio_codec(&self) -> &'static str {
        self.audio_codec
    }

    /// Encoder identifier for the video track, if any
    pub const fn video_codec(&self) -> Option<&'static str> {
        self.video_codec
    }

    /// Whether this profile encodes a video track
    pub const fn has_video(&self) -> bool {
        self.video_codec.is_some()
    }
}
