//! File loading and saving.
//!
//! The session owns exactly one on-disk artifact: the file it was opened
//! with. [`load`] reads it whole at startup and [`save`] overwrites it
//! whole on an explicit save command. There is no locking; if another
//! process writes the file while a session is open, the last writer wins.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Failure to read the document at startup.
///
/// Fatal to session start: the caller reports the error and exits before
/// any terminal UI is initialized.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("{} is not valid UTF-8 text", path.display())]
    InvalidUtf8 { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure to write the buffer back to disk.
///
/// Non-fatal: surfaced as a toast, and the in-memory buffer is left
/// untouched so the user can retry or keep editing.
#[derive(Debug, thiserror::Error)]
#[error("failed to save {}: {source}", path.display())]
pub struct SaveError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Read the entire file as UTF-8 text, line terminators preserved.
///
/// # Errors
///
/// Returns [`LoadError::NotFound`] for a missing file,
/// [`LoadError::InvalidUtf8`] for undecodable content, and
/// [`LoadError::Io`] for any other read failure.
pub fn load(path: &Path) -> Result<String, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            LoadError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    String::from_utf8(bytes).map_err(|_| LoadError::InvalidUtf8 {
        path: path.to_path_buf(),
    })
}

/// Write `text` to `path`, replacing the file's entire prior content.
///
/// # Errors
///
/// Returns a [`SaveError`] carrying the path and underlying cause if the
/// write fails (permissions, disk full, path removed since load).
pub fn save(path: &Path, text: &str) -> Result<(), SaveError> {
    std::fs::write(path, text).map_err(|source| SaveError {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_returns_content_verbatim() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.md");
        std::fs::write(&path, "# Hello\r\nWorld\n").unwrap();

        let text = load(&path).unwrap();
        assert_eq!(text, "# Hello\r\nWorld\n");
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.md");

        let err = load(&path).unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
        assert!(err.to_string().contains("missing.md"));
    }

    #[test]
    fn test_load_rejects_invalid_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("binary.md");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x41]).unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, LoadError::InvalidUtf8 { .. }));
    }

    #[test]
    fn test_save_overwrites_entire_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.md");
        std::fs::write(&path, "old content that is much longer").unwrap();

        save(&path, "new").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.md");

        save(&path, "# Hello\nWorld\n").unwrap();
        assert_eq!(load(&path).unwrap(), "# Hello\nWorld\n");
    }

    #[test]
    fn test_save_to_missing_directory_fails_with_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gone").join("doc.md");

        let err = save(&path, "text").unwrap_err();
        assert_eq!(err.path, path);
    }
}
