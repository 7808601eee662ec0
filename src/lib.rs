//! CaptureCheck - microphone and screen-recording setup checker
//!
//! This crate records test capture sessions (microphone audio, screen
//! video plus system audio) and saves each as a WebM artifact, tracking
//! four setup milestones and an append-only status journal.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Sessions, artifacts, checklist, journal, and config
//! - **Application**: The session controller and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (cpal, ffmpeg, filesystem, desktop)
//! - **CLI**: Command-line interface, terminal panel, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
