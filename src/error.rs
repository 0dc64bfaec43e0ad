//! # Error Types Module
//!
//! Questo modulo definisce tutti i tipi di errore custom dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce `ResizeError` enum per categorizzare tutti gli errori possibili
//! - Fornisce messaggi di errore descrittivi e strutturati
//! - Integra con `thiserror` per automatic error conversion
//! - Mantiene il messaggio originale del backend nella riga di errore finale
//!
//! ## Categorie di errori:
//! - `Io` / `Image`: Errori prodotti dal backend di resize (decode, encode, scrittura)
//! - `Traversal` / `CreateDir` / `Symlink`: Errori durante la scansione dell'albero
//! - `Operation`: Fallimento di una singola operazione, con il path relativo coinvolto
//! - `Task`: Task tokio terminato in modo anomalo
//! - `Validation`: Errori di validazione della configurazione
//!
//! ## Esempio:
//! ```rust,ignore
//! if config.target_width == 0 {
//!     return Err(ResizeError::Validation("Width must be greater than 0!".to_string()));
//! }
//! ```

use crate::resizer::task::OperationKind;
use std::path::PathBuf;

/// Custom error types for recursive resizing
#[derive(thiserror::Error, Debug)]
pub enum ResizeError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error("Failed to read directory tree at {path}: {source}")]
    Traversal {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Symbolic link found at {0} (use --symlinks skip or --symlinks follow)")]
    Symlink(PathBuf),

    #[error("Problem outputting {kind}{path}: {source}")]
    Operation {
        kind: OperationKind,
        path: String,
        #[source]
        source: Box<ResizeError>,
    },

    #[error("Resize task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}

impl ResizeError {
    /// Relative path of the image whose operation failed, if any
    pub fn failed_path(&self) -> Option<&str> {
        match self {
            ResizeError::Operation { path, .. } => Some(path),
            _ => None,
        }
    }
}
