//! Media kind detection from file names.

use serde::{Deserialize, Serialize};

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "avi", "mov", "wmv", "flv", "mkv"];
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "svg", "webp"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "aac", "m4a", "flac"];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Image,
    Audio,
}

impl MediaKind {
    /// Classify a file name or URL by its extension (case-insensitive).
    pub fn from_file_name(name: &str) -> Option<MediaKind> {
        let ext = file_extension(name)?.to_ascii_lowercase();
        if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Video)
        } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Image)
        } else if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Audio)
        } else {
            None
        }
    }
}

/// The text after the last `.` of the final path segment, if any.
pub fn file_extension(name: &str) -> Option<&str> {
    let name = name.split(['?', '#']).next().unwrap_or(name);
    let segment = name.rsplit(['/', '\\']).next().unwrap_or(name);
    match segment.rfind('.') {
        Some(idx) if idx + 1 < segment.len() => Some(&segment[idx + 1..]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_extension() {
        assert_eq!(MediaKind::from_file_name("clip.MP4"), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_file_name("photo.jpeg"), Some(MediaKind::Image));
        assert_eq!(MediaKind::from_file_name("song.flac"), Some(MediaKind::Audio));
        assert_eq!(MediaKind::from_file_name("notes.txt"), None);
        assert_eq!(MediaKind::from_file_name("README"), None);
    }

    #[test]
    fn extension_ignores_query_and_directories() {
        assert_eq!(file_extension("https://cdn/x/a.webm?t=3"), Some("webm"));
        assert_eq!(file_extension("dir.d/file"), None);
        assert_eq!(file_extension("trailing."), None);
        assert_eq!(file_extension("C:\\media\\shot.png"), Some("png"));
    }
}
