//! Finished recording artifact

use std::time::Duration as StdDuration;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::domain::capture::ArtifactLabel;

use super::{MediaData, MediaMimeType};

/// A completed recording ready to be saved.
///
/// Carries the concatenated encoder output, the label it records under,
/// the elapsed session duration, and the completion timestamp that the
/// filename is synthesized from.
#[derive(Debug, Clone)]
pub struct Artifact {
    label: ArtifactLabel,
    media: MediaData,
    duration: StdDuration,
    completed_at: DateTime<Utc>,
}

impl Artifact {
    /// Create an artifact, stamping the current time as completion
    pub fn new(
        label: ArtifactLabel,
        data: Vec<u8>,
        mime_type: MediaMimeType,
        duration: StdDuration,
    ) -> Self {
        Self {
            label,
            media: MediaData::new(data, mime_type),
            duration,
            completed_at: Utc::now(),
        }
    }

    /// The label this artifact records under
    pub fn label(&self) -> ArtifactLabel {
        self.label
    }

    /// The encoded media
    pub fn media(&self) -> &MediaData {
        &self.media
    }

    /// Raw bytes of the encoded media
    pub fn data(&self) -> &[u8] {
        self.media.data()
    }

    /// Size of the encoded media in bytes
    pub fn size_bytes(&self) -> usize {
        self.media.size_bytes()
    }

    /// Elapsed wall-clock recording duration
    pub fn duration(&self) -> StdDuration {
        self.duration
    }

    /// Completion timestamp
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Synthesize the artifact filename: `<label>-<ISO8601>.<ext>`
    pub fn filename(&self) -> String {
        format!(
            "{}-{}.{}",
            self.label,
            self.completed_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            self.media.mime_type().extension()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(label: ArtifactLabel, mime: MediaMimeType) -> Artifact {
        Artifact::new(label, vec![1, 2, 3], mime, StdDuration::from_secs(5))
    }

    #[test]
    fn filename_shape() {
        let a = artifact(ArtifactLabel::Microphone, MediaMimeType::WebmAudio);
        let name = a.filename();
        assert!(name.starts_with("microphone-"));
        assert!(name.ends_with(".webm"));
        // ISO8601 timestamp between label and extension
        let ts = &name["microphone-".len()..name.len() - ".webm".len()];
        assert!(ts.contains('T'));
        assert!(ts.ends_with('Z'));
    }

    #[test]
    fn filename_label_variants() {
        let system = artifact(ArtifactLabel::System, MediaMimeType::WebmVideo);
        assert!(system.filename().starts_with("system-2"));

        let aux = artifact(ArtifactLabel::SystemAudio, MediaMimeType::WebmAudio);
        assert!(aux.filename().starts_with("system-audio-"));
    }

    #[test]
    fn carries_duration_and_size() {
        let a = artifact(ArtifactLabel::Microphone, MediaMimeType::WebmAudio);
        assert_eq!(a.duration(), StdDuration::from_secs(5));
        assert_eq!(a.size_bytes(), 3);
    }
}
