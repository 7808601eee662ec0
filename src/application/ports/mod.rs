//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod audio_cue;
pub mod config;
pub mod encoder;
pub mod notifier;
pub mod permissions;
pub mod sink;
pub mod source;

// Re-export common types
pub use audio_cue::{AudioCue, AudioCueError, AudioCueType};
pub use config::ConfigStore;
pub use encoder::{EncoderError, EncoderFactory, FragmentSink, StreamEncoder};
pub use notifier::{NotificationError, NotificationIcon, Notifier};
pub use permissions::{PermissionProbe, PermissionState, ProbeError};
pub use sink::{ArtifactSink, SaveError};
pub use source::{
    CaptureError, CaptureInput, DisplaySource, MediaStream, MediaTrack, MicrophoneSource,
    TrackKind,
};
