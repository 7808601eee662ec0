//! Audio cue adapters

mod noop;
mod rodio_cue;

pub use noop::NoOpAudioCue;
pub use rodio_cue::RodioAudioCue;
