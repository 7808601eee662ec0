//! Encoder port interfaces

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::media::CodecProfile;

use super::source::MediaStream;

/// Encoder errors
#[derive(Debug, Clone, Error)]
pub enum EncoderError {
    #[error("Unsupported codec profile: {0}")]
    UnsupportedProfile(String),

    #[error("Encoder not available: {0}")]
    NotAvailable(String),

    #[error("Failed to start encoder: {0}")]
    StartFailed(String),

    #[error("Failed to stop encoder: {0}")]
    StopFailed(String),
}

/// Callback receiving one encoded output fragment.
pub type FragmentSink = Arc<dyn Fn(Vec<u8>) + Send + Sync>;

/// Port for one encoder instance bound to an acquired stream.
///
/// Fragments are delivered to the sink in production order, and every
/// pending fragment is delivered before `stop` returns.
#[async_trait]
pub trait StreamEncoder: Send + Sync {
    /// Begin encoding, delivering output fragments to `sink`.
    async fn start(&self, sink: FragmentSink) -> Result<(), EncoderError>;

    /// Stop encoding and flush remaining output.
    async fn stop(&self) -> Result<(), EncoderError>;

    /// Check if the encoder is currently running
    fn is_active(&self) -> bool;
}

/// Port for constructing encoder instances.
#[async_trait]
pub trait EncoderFactory: Send + Sync {
    /// Bind a new encoder to an acquired stream with a codec profile.
    async fn open(
        &self,
        stream: &MediaStream,
        profile: CodecProfile,
    ) -> Result<Box<dyn StreamEncoder>, EncoderError>;
}
