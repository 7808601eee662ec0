//! Encoding infrastructure module
//!
//! The encoder abstraction is backed by an ffmpeg child process muxing
//! WebM to a pipe; fragments are the chunked pipe reads.

mod ffmpeg;

pub use ffmpeg::{FfmpegEncoder, FfmpegEncoderFactory};
