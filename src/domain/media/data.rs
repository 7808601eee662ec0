//! Media data value object

use super::MediaMimeType;

/// Encoded media bytes together with their MIME type.
#[derive(Debug, Clone)]
pub struct MediaData {
    data: Vec<u8>,
    mime_type: MediaMimeType,
}

impl MediaData {
    /// Create MediaData from raw bytes
    pub fn new(data: Vec<u8>, mime_type: MediaMimeType) -> Self {
        Self { data, mime_type }
    }

    /// Get the raw bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume and return the raw bytes
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Get the MIME type
    pub fn mime_type(&self) -> MediaMimeType {
        self.mime_type
    }

    /// Get the size in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        let bytes = self.size_bytes();
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_data_size() {
        let data = MediaData::new(vec![0u8; 1024], MediaMimeType::WebmAudio);
        assert_eq!(data.size_bytes(), 1024);
        assert_eq!(data.mime_type(), MediaMimeType::WebmAudio);
    }

    #[test]
    fn human_readable_size_bytes() {
        let data = MediaData::new(vec![0u8; 500], MediaMimeType::WebmAudio);
        assert_eq!(data.human_readable_size(), "500 B");
    }

    #[test]
    fn human_readable_size_kb() {
        let data = MediaData::new(vec![0u8; 2048], MediaMimeType::WebmVideo);
        assert_eq!(data.human_readable_size(), "2.0 KB");
    }

    #[test]
    fn human_readable_size_mb() {
        let data = MediaData::new(vec![0u8; 2 * 1024 * 1024], MediaMimeType::WebmVideo);
        assert_eq!(data.human_readable_size(), "2.0 MB");
    }
}
