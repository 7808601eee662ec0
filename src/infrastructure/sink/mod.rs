//! Artifact sink adapters

mod downloads;

pub use downloads::DownloadsSink;
