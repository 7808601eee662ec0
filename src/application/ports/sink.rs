//! Artifact sink port interface

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::media::Artifact;

/// Artifact save errors
#[derive(Debug, Clone, Error)]
pub enum SaveError {
    #[error("No writable output directory")]
    NoOutputDir,

    #[error("Failed to write artifact: {0}")]
    WriteFailed(String),
}

/// Port for persisting finished artifacts.
#[async_trait]
pub trait ArtifactSink: Send + Sync {
    /// Save the artifact under its synthesized filename.
    ///
    /// # Returns
    /// The path the artifact was written to.
    async fn save(&self, artifact: &Artifact) -> Result<PathBuf, SaveError>;
}
