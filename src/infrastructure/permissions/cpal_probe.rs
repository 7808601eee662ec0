//! Microphone capability probe backed by the cpal audio host

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait};

use crate::application::ports::{PermissionProbe, PermissionState, ProbeError};

/// Probes the default audio host for a usable input device.
///
/// Desktop platforms surface microphone permission through device
/// enumeration: a host with no default input, or one whose supported
/// configurations cannot be read, behaves like a denied permission.
pub struct CpalPermissionProbe;

impl CpalPermissionProbe {
    /// Create a new probe against the default audio host
    pub fn new() -> Self {
        Self
    }

    fn query() -> Result<PermissionState, ProbeError> {
        let host = cpal::default_host();

        let Some(device) = host.default_input_device() else {
            return Ok(PermissionState::Denied);
        };

        match device.supported_input_configs() {
            Ok(mut configs) => {
                if configs.next().is_some() {
                    Ok(PermissionState::Granted)
                } else {
                    Ok(PermissionState::Unknown)
                }
            }
            Err(e) => Err(ProbeError::QueryFailed(e.to_string())),
        }
    }
}

impl Default for CpalPermissionProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PermissionProbe for CpalPermissionProbe {
    async fn microphone(&self) -> Result<PermissionState, ProbeError> {
        // Device enumeration can block on some hosts
        tokio::task::spawn_blocking(Self::query)
            .await
            .map_err(|e| ProbeError::QueryFailed(format!("Task join error: {}", e)))?
    }
}
