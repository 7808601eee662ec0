//! Capture source adapters
//!
//! Sources resolve host capture facilities into stream descriptors; the
//! encoder opens the described inputs when it starts.

mod display;
mod microphone;

pub use display::DisplayGrabSource;
pub use microphone::PulseMicrophoneSource;
