//! # Path Resolution Module
//!
//! Centralizza il calcolo dei path di input e di output di ogni operazione.
//! Il thumbnail sta nella stessa directory replicata dell'immagine, con prefisso `tn-`.

use crate::walker::WorkItem;
use std::path::{Path, PathBuf};

/// Prefisso dei thumbnails, inserito davanti al nome del file
pub const THUMBNAIL_PREFIX: &str = "tn-";

/// Utility per calcolare i path in modo centralizzato
pub struct PathResolver;

impl PathResolver {
    /// Path dell'immagine sorgente
    pub fn source_path(input_root: &Path, item: &WorkItem) -> PathBuf {
        input_root.join(item.relative_path())
    }

    /// Path dell'immagine ridimensionata: stesso path relativo sotto l'output
    pub fn output_path(output_root: &Path, item: &WorkItem) -> PathBuf {
        output_root.join(item.relative_path())
    }

    /// Path relativo del thumbnail: `sub/b.jpg` -> `sub/tn-b.jpg`
    pub fn thumbnail_relative(relative_path: &Path) -> PathBuf {
        let file_name = relative_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let thumbnail_name = format!("{}{}", THUMBNAIL_PREFIX, file_name);

        match relative_path.parent() {
            Some(parent) => parent.join(thumbnail_name),
            None => PathBuf::from(thumbnail_name),
        }
    }

    /// Path del thumbnail sotto l'output
    pub fn thumbnail_path(output_root: &Path, item: &WorkItem) -> PathBuf {
        output_root.join(Self::thumbnail_relative(item.relative_path()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_mirrors_input() {
        let item = WorkItem::new("sub/b.jpg", false);
        assert_eq!(
            PathResolver::source_path(Path::new("/in"), &item),
            PathBuf::from("/in/sub/b.jpg")
        );
        assert_eq!(
            PathResolver::output_path(Path::new("/out"), &item),
            PathBuf::from("/out/sub/b.jpg")
        );
    }

    #[test]
    fn test_thumbnail_path_prefixes_file_name() {
        let nested = WorkItem::new("sub/deeper/b.jpg", true);
        assert_eq!(
            PathResolver::thumbnail_path(Path::new("/out"), &nested),
            PathBuf::from("/out/sub/deeper/tn-b.jpg")
        );

        let top_level = WorkItem::new("a.png", true);
        assert_eq!(
            PathResolver::thumbnail_path(Path::new("/out"), &top_level),
            PathBuf::from("/out/tn-a.png")
        );
    }

    #[test]
    fn test_thumbnail_prefix_only_touches_file_name() {
        assert_eq!(
            PathResolver::thumbnail_relative(Path::new("tn-dir/photo.png")),
            PathBuf::from("tn-dir/tn-photo.png")
        );
    }
}
