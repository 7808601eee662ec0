//! Permission probe port interface

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

/// Permission probe errors
#[derive(Debug, Clone, Error)]
pub enum ProbeError {
    #[error("Permission query not supported: {0}")]
    Unsupported(String),

    #[error("Permission query failed: {0}")]
    QueryFailed(String),
}

/// Result of a capability/permission query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    Granted,
    Denied,
    Unknown,
}

impl PermissionState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PermissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Port for the one-shot startup capability probe.
///
/// Best effort: a failed or unsupported query must not prevent later
/// recording attempts.
#[async_trait]
pub trait PermissionProbe: Send + Sync {
    /// Query the current microphone permission state.
    async fn microphone(&self) -> Result<PermissionState, ProbeError>;
}
