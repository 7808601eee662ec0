//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems like the audio host, ffmpeg,
//! the filesystem, and the desktop.

pub mod audio_cue;
pub mod capture;
pub mod config;
pub mod encoding;
pub mod notification;
pub mod permissions;
pub mod sink;

// Re-export adapters
pub use audio_cue::{NoOpAudioCue, RodioAudioCue};
pub use capture::{DisplayGrabSource, PulseMicrophoneSource};
pub use config::XdgConfigStore;
pub use encoding::FfmpegEncoderFactory;
pub use notification::NotifyRustNotifier;
pub use permissions::CpalPermissionProbe;
pub use sink::DownloadsSink;
