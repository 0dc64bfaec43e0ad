//! # JSON Output Module
//!
//! Questo modulo gestisce l'output strutturato in JSON per l'uso programmatico di `recres`.
//!
//! ## Responsabilità:
//! - Emette un oggetto JSON per riga su stdout per ogni evento della run
//! - Fornisce un'interfaccia standardizzata per comunicazione inter-processo
//!
//! ## Tipi di messaggi:
//! - `start`: Inizio della run con directory e larghezze
//! - `walk_complete`: Fine della scansione (immagini trovate, operazioni previste)
//! - `progress`: Un'operazione di resize completata
//! - `complete`: Tutte le operazioni completate
//! - `error`: Errore fatale (scansione o operazione)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Tipo di messaggio JSON
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum JsonMessage {
    /// Inizio della run
    #[serde(rename = "start")]
    Start {
        input_dir: PathBuf,
        output_dir: PathBuf,
        width: u32,
        thumbnail_width: Option<u32>,
    },

    /// Scansione completata
    #[serde(rename = "walk_complete")]
    WalkComplete {
        total_images: usize,
        total_operations: usize,
        directories: usize,
        duration_ms: u64,
    },

    /// Operazione completata
    #[serde(rename = "progress")]
    Progress {
        completed: usize,
        total: usize,
        percentage: usize,
        path: String,
    },

    /// Run completata
    #[serde(rename = "complete")]
    Complete {
        total_operations: usize,
        duration_ms: u64,
    },

    /// Errore fatale
    #[serde(rename = "error")]
    Error {
        message: String,
        path: Option<String>,
    },
}

impl JsonMessage {
    /// Emette il messaggio JSON su stdout
    pub fn emit(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            println!("{}", json);
        }
    }

    pub fn start(
        input_dir: PathBuf,
        output_dir: PathBuf,
        width: u32,
        thumbnail_width: Option<u32>,
    ) -> Self {
        Self::Start {
            input_dir,
            output_dir,
            width,
            thumbnail_width,
        }
    }

    pub fn walk_complete(
        total_images: usize,
        total_operations: usize,
        directories: usize,
        duration: Duration,
    ) -> Self {
        Self::WalkComplete {
            total_images,
            total_operations,
            directories,
            duration_ms: duration.as_millis() as u64,
        }
    }

    pub fn progress(completed: usize, total: usize, percentage: usize, path: &str) -> Self {
        Self::Progress {
            completed,
            total,
            percentage,
            path: path.to_string(),
        }
    }

    pub fn complete(total_operations: usize, duration: Duration) -> Self {
        Self::Complete {
            total_operations,
            duration_ms: duration.as_millis() as u64,
        }
    }

    pub fn error(message: String, path: Option<String>) -> Self {
        Self::Error { message, path }
    }
}
