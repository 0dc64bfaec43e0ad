//! # File Management Module
//!
//! Questo modulo raccoglie le operazioni elementari sul filesystem usate dal walker e dal main.
//!
//! ## Responsabilità:
//! - Riconoscimento delle immagini tramite estensione (case-insensitive)
//! - Creazione idempotente delle directory di output
//! - Risoluzione dei path relativi in path assoluti
//!
//! ## Formati supportati:
//! - **Immagini**: PNG, JPG, JPEG
//!
//! ## Esempio:
//! ```rust,ignore
//! if FileManager::is_image(&path) {
//!     // schedule resize
//! }
//! ```

use crate::error::ResizeError;
use std::path::{Path, PathBuf};

/// Extensions picked up by the walker, compared lowercase
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Filesystem helpers shared by the walker and the binary
pub struct FileManager;

impl FileManager {
    /// Check if a file name carries one of the supported image extensions.
    ///
    /// A bare extension such as `.png` is a hidden file, not an image.
    pub fn is_image(path: &Path) -> bool {
        match path.extension() {
            Some(ext) => {
                let ext_lower = ext.to_string_lossy().to_lowercase();
                IMAGE_EXTENSIONS.contains(&ext_lower.as_str())
            }
            None => false,
        }
    }

    /// Create a directory (and its parents) unless it already exists.
    /// Existing contents are left untouched.
    pub fn ensure_dir(path: &Path) -> Result<(), ResizeError> {
        std::fs::create_dir_all(path).map_err(|source| ResizeError::CreateDir {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve a path against the current working directory without touching the filesystem
    pub fn absolutize(path: &Path) -> std::io::Result<PathBuf> {
        std::path::absolute(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_image_extensions() {
        assert!(FileManager::is_image(Path::new("a.png")));
        assert!(FileManager::is_image(Path::new("b.jpg")));
        assert!(FileManager::is_image(Path::new("c.jpeg")));
        assert!(FileManager::is_image(Path::new("D.PNG")));
        assert!(FileManager::is_image(Path::new("e.JpEg")));
        assert!(FileManager::is_image(Path::new("sub/dir/f.Jpg")));
    }

    #[test]
    fn test_is_image_rejects_others() {
        assert!(!FileManager::is_image(Path::new("notes.txt")));
        assert!(!FileManager::is_image(Path::new("photo.webp")));
        assert!(!FileManager::is_image(Path::new("archive.png.zip")));
        assert!(!FileManager::is_image(Path::new("png")));
        assert!(!FileManager::is_image(Path::new(".png")));
    }

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("a").join("b");

        FileManager::ensure_dir(&target).unwrap();
        std::fs::write(target.join("keep.txt"), b"keep").unwrap();
        FileManager::ensure_dir(&target).unwrap();

        assert!(target.join("keep.txt").exists());
    }

    #[test]
    fn test_ensure_dir_over_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("file");
        std::fs::write(&target, b"x").unwrap();

        let err = FileManager::ensure_dir(&target).unwrap_err();
        assert!(matches!(err, ResizeError::CreateDir { .. }));
    }

    #[test]
    fn test_absolutize_relative() {
        let resolved = FileManager::absolutize(Path::new("some/dir")).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("some/dir"));
    }
}
