use std::path::Path;

use crate::error::{PlayerError, Result};

/// Checks a picked path against the extension allow-list.
///
/// Passing says nothing about whether the engine can decode the file.
pub fn validate_media_path(path: &Path, extensions: &[String]) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(PlayerError::InvalidPath("empty path".to_string()));
    }
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if !extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(&ext)) {
        return Err(PlayerError::InvalidPath(format!(
            "{} is not one of {}",
            path.display(),
            extensions.join(", ")
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VIDEO_EXTENSIONS;

    fn allowed() -> Vec<String> {
        VIDEO_EXTENSIONS.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn test_accepts_video_extensions() {
        for name in ["a.mp4", "b.mkv", "c.avi", "d.wmv", "/movies/E.MP4"] {
            assert!(validate_media_path(Path::new(name), &allowed()).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_rejects_empty_path() {
        assert!(matches!(
            validate_media_path(Path::new(""), &allowed()),
            Err(PlayerError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_rejects_other_extensions() {
        for name in ["song.mp3", "notes.txt", "noextension", "archive.mp4.zip"] {
            assert!(matches!(
                validate_media_path(Path::new(name), &allowed()),
                Err(PlayerError::InvalidPath(_))
            ));
        }
    }
}
