//! # Tree Mirror Walker
//!
//! Scansione ricorsiva della directory di input con creazione della stessa gerarchia nell'output.
//!
//! ## Responsabilità:
//! - Visita depth-first dell'albero di input, nell'ordine restituito dal filesystem
//! - Crea ogni directory corrispondente sotto `output_root` (idempotente, nessuna pulizia)
//! - Produce la lista piatta di `WorkItem` con path relativi all'input
//! - Conta le immagini trovate direttamente in ogni directory (solo per diagnostica)
//!
//! La scansione deve terminare completamente prima che inizi il resize: lo scheduler
//! assume che ogni directory di output esista già quando ci scrive dentro.
//!
//! ## Errori:
//! Qualsiasi errore di lettura o di creazione directory interrompe l'intera scansione.
//! I link simbolici seguono la `SymlinkPolicy` configurata.

use crate::config::Config;
use crate::error::ResizeError;
use crate::file_manager::FileManager;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::debug;
use walkdir::WalkDir;

/// How symbolic links inside the input tree are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SymlinkPolicy {
    /// Abort the walk on the first symbolic link
    #[default]
    Error,
    /// Ignore symbolic links
    Skip,
    /// Resolve links and walk their targets; link cycles abort the walk
    Follow,
}

/// One discovered source image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    relative_path: PathBuf,
    has_thumbnail: bool,
}

impl WorkItem {
    pub fn new(relative_path: impl Into<PathBuf>, has_thumbnail: bool) -> Self {
        Self {
            relative_path: relative_path.into(),
            has_thumbnail,
        }
    }

    /// Path of the image relative to the input root, e.g. `sub/b.jpg`
    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    pub fn has_thumbnail(&self) -> bool {
        self.has_thumbnail
    }
}

/// Renders with the leading branch marker: `/sub/b.jpg`
impl fmt::Display for WorkItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", display_relative(&self.relative_path))
    }
}

/// Format a relative path as `/a/b/c` regardless of platform separator
pub fn display_relative(path: &Path) -> String {
    let mut rendered = String::new();
    for component in path.components() {
        rendered.push('/');
        rendered.push_str(&component.as_os_str().to_string_lossy());
    }
    if rendered.is_empty() {
        rendered.push('/');
    }
    rendered
}

/// True when `path` resolves to the already canonical `canonical`
fn same_directory(path: &Path, canonical: &Path) -> bool {
    std::fs::canonicalize(path).is_ok_and(|resolved| resolved == canonical)
}

/// Images found directly inside one mirrored directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySummary {
    /// Directory path relative to the input root (empty for the root itself)
    pub branch: PathBuf,
    pub images: usize,
}

/// Result of a complete walk
#[derive(Debug, Clone)]
pub struct WalkSummary {
    /// Work items in discovery order
    pub items: Vec<WorkItem>,
    /// Every mirrored directory in discovery order
    pub directories: Vec<DirectorySummary>,
    pub duration: Duration,
}

impl WalkSummary {
    pub fn total_images(&self) -> usize {
        self.items.len()
    }
}

/// Walks the input tree and mirrors its directories under the output root
pub struct TreeWalker {
    input_root: PathBuf,
    output_root: PathBuf,
    thumbnails: bool,
    symlinks: SymlinkPolicy,
}

impl TreeWalker {
    pub fn new(config: &Config) -> Self {
        Self {
            input_root: config.input_root.clone(),
            output_root: config.output_root.clone(),
            thumbnails: config.thumbnails_enabled(),
            symlinks: config.symlinks,
        }
    }

    /// Walk the whole input tree.
    ///
    /// Directories are created under the output root as they are discovered, so every
    /// output directory exists by the time this returns. The output root is skipped when
    /// it lives inside the input tree.
    pub fn walk(&self) -> Result<WalkSummary, ResizeError> {
        let started = Instant::now();
        let mut items = Vec::new();
        let mut directories: Vec<DirectorySummary> = Vec::new();
        let mut directory_index: HashMap<PathBuf, usize> = HashMap::new();

        FileManager::ensure_dir(&self.output_root)?;
        let output_root = std::fs::canonicalize(&self.output_root)?;
        let entries = WalkDir::new(&self.input_root)
            .follow_links(self.symlinks == SymlinkPolicy::Follow)
            .into_iter()
            .filter_entry(move |entry| {
                entry.depth() == 0
                    || !entry.file_type().is_dir()
                    || !same_directory(entry.path(), &output_root)
            });

        for entry in entries {
            let entry = entry.map_err(|source| {
                let path = source
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.input_root.clone());
                ResizeError::Traversal { path, source }
            })?;

            let Ok(relative) = entry.path().strip_prefix(&self.input_root) else {
                continue;
            };
            let file_type = entry.file_type();

            if file_type.is_symlink() {
                match self.symlinks {
                    SymlinkPolicy::Skip => {
                        debug!("Skipping symbolic link {}", entry.path().display());
                        continue;
                    }
                    _ => return Err(ResizeError::Symlink(entry.path().to_path_buf())),
                }
            }

            if file_type.is_dir() {
                FileManager::ensure_dir(&self.output_root.join(relative))?;
                directory_index.insert(relative.to_path_buf(), directories.len());
                directories.push(DirectorySummary {
                    branch: relative.to_path_buf(),
                    images: 0,
                });
            } else if file_type.is_file() && FileManager::is_image(relative) {
                let item = WorkItem::new(relative, self.thumbnails);
                debug!("{}", item);

                let parent = relative.parent().unwrap_or(Path::new(""));
                if let Some(&index) = directory_index.get(parent) {
                    directories[index].images += 1;
                }
                items.push(item);
            } else {
                debug!("Ignoring {}", entry.path().display());
            }
        }

        for directory in &directories {
            debug!(
                "Found {} images in {}",
                directory.images,
                self.input_root.join(&directory.branch).display()
            );
        }

        Ok(WalkSummary {
            items,
            directories,
            duration: started.elapsed(),
        })
    }
}
