use std::path::{Path, PathBuf};

use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct VideoMetadata {
    pub resolution: (u32, u32),
    pub frame_rate: f64,
    pub codec: String,
}

/// A media item the engine has opened and attached to its playback target.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaHandle {
    id: Uuid,
    path: PathBuf,
    length_ms: Option<u64>,
    metadata: Option<VideoMetadata>,
}

impl MediaHandle {
    pub fn new(path: impl Into<PathBuf>, length_ms: Option<u64>) -> Self {
        Self {
            id: Uuid::new_v4(),
            path: path.into(),
            length_ms,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: VideoMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Length as discovered when the file was opened. Engines may know better later.
    pub fn length_ms(&self) -> Option<u64> {
        self.length_ms
    }

    pub fn metadata(&self) -> Option<&VideoMetadata> {
        self.metadata.as_ref()
    }

    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_distinct() {
        let a = MediaHandle::new("/videos/clip.mp4", Some(1000));
        let b = MediaHandle::new("/videos/clip.mp4", Some(1000));
        assert_ne!(a.id(), b.id());
        assert_ne!(a, b);
    }

    #[test]
    fn test_display_name_and_metadata() {
        let handle = MediaHandle::new("/videos/holiday.mkv", None).with_metadata(VideoMetadata {
            resolution: (1920, 1080),
            frame_rate: 25.0,
            codec: "video/x-h264".to_string(),
        });
        assert_eq!(handle.display_name(), "holiday.mkv");
        assert_eq!(handle.length_ms(), None);
        assert_eq!(handle.metadata().unwrap().resolution, (1920, 1080));
    }
}
