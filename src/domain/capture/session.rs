//! Capture session entity

use std::fmt;
use std::time::Instant;

use chrono::{DateTime, Utc};

use crate::domain::media::{Artifact, CodecProfile};

use super::ArtifactLabel;

/// Session lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Recording,
    Stopped,
}

impl SessionState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
            Self::Stopped => "stopped",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One start-to-stop recording cycle.
///
/// Created when a stream has been acquired (entering `Recording`), the
/// session owns the ordered sequence of encoder output fragments. While
/// recording the sequence is append-only; it is cleared exactly once,
/// when [`finalize`](Self::finalize) packages it into an [`Artifact`].
#[derive(Debug)]
pub struct CaptureSession {
    label: ArtifactLabel,
    profile: CodecProfile,
    started_at: DateTime<Utc>,
    started_instant: Instant,
    state: SessionState,
    fragments: Vec<Vec<u8>>,
}

impl CaptureSession {
    /// Begin a session for an acquired stream
    pub fn start(label: ArtifactLabel, profile: CodecProfile) -> Self {
        Self {
            label,
            profile,
            started_at: Utc::now(),
            started_instant: Instant::now(),
            state: SessionState::Recording,
            fragments: Vec::new(),
        }
    }

    /// Artifact label this session records under
    pub fn label(&self) -> ArtifactLabel {
        self.label
    }

    /// Codec profile the encoder was opened with
    pub fn profile(&self) -> CodecProfile {
        self.profile
    }

    /// Wall-clock time the session started
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Check if the session is still recording
    pub fn is_recording(&self) -> bool {
        self.state == SessionState::Recording
    }

    /// Elapsed wall-clock time since the session started
    pub fn elapsed(&self) -> std::time::Duration {
        self.started_instant.elapsed()
    }

    /// Append one encoder output fragment.
    ///
    /// Empty fragments are dropped, and fragments arriving after the
    /// session stopped recording are ignored.
    pub fn push_fragment(&mut self, fragment: Vec<u8>) {
        if self.state != SessionState::Recording || fragment.is_empty() {
            return;
        }
        self.fragments.push(fragment);
    }

    /// Number of fragments accumulated so far
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    /// Total bytes across all accumulated fragments
    pub fn fragment_bytes(&self) -> usize {
        self.fragments.iter().map(Vec::len).sum()
    }

    /// Package the accumulated fragments into the final artifact.
    ///
    /// Fragments are concatenated in append order, tagged with the
    /// session's media type, and the sequence is cleared. The session
    /// transitions to `Stopped`.
    pub fn finalize(&mut self) -> Artifact {
        let total = self.fragment_bytes();
        let mut data = Vec::with_capacity(total);
        for fragment in self.fragments.drain(..) {
            data.extend_from_slice(&fragment);
        }
        self.state = SessionState::Stopped;
        Artifact::new(self.label, data, self.profile.mime_type(), self.elapsed())
    }
}
