//! Download-directory artifact sink

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::{ArtifactSink, SaveError};
use crate::domain::media::Artifact;

/// Writes finished artifacts into a download directory.
///
/// Files land under the artifact's synthesized filename; the directory
/// is created on first save.
pub struct DownloadsSink {
    dir: PathBuf,
}

impl DownloadsSink {
    /// Create a sink writing into a specific directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create a sink for the configured directory, falling back to the
    /// platform download directory and then the working directory.
    pub fn from_config(configured: Option<PathBuf>) -> Self {
        let dir = configured
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        Self { dir }
    }

    /// The directory artifacts are written into
    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }
}

#[async_trait]
impl ArtifactSink for DownloadsSink {
    async fn save(&self, artifact: &Artifact) -> Result<PathBuf, SaveError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| SaveError::WriteFailed(e.to_string()))?;

        let path = self.dir.join(artifact.filename());
        fs::write(&path, artifact.data())
            .await
            .map_err(|e| SaveError::WriteFailed(e.to_string()))?;

        Ok(path)
    }
}
