//! # Recursive Resize Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API pubbliche.
//!
//! ## Responsabilità:
//! - Definisce la struttura modulare dell'applicazione
//! - Espone i tipi e le funzioni principali tramite re-exports
//! - Fornisce un'interfaccia pulita per il main.rs e per altri consumatori
//!
//! ## Architettura dei moduli:
//! - `config`: Gestione configurazione e validazione parametri
//! - `error`: Tipi di errore custom per scansione e resize
//! - `file_manager`: Riconoscimento immagini e operazioni sulle directory
//! - `walker`: Scansione ricorsiva e replica della gerarchia di directory
//! - `backend`: Decode, resize ed encode di una singola immagine
//! - `resizer`: Scheduler delle operazioni con completamento e fail-fast
//! - `progress`: Contatori della run e progress bar
//! - `json_output`: Eventi JSON per uso programmatico
//!
//! ## Utilizzo:
//! ```rust,ignore
//! use recursive_resize::{BatchResizer, Config};
//!
//! let config = Config::new("/photos", "/photos-small", 1024);
//! let resizer = BatchResizer::new(config)?;
//! let summary = resizer.run().await?;
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod file_manager;
pub mod json_output;
pub mod progress;
pub mod resizer;
pub mod walker;

pub use backend::{ImageCrateBackend, ResizeBackend};
pub use config::Config;
pub use error::ResizeError;
pub use resizer::{BatchResizer, RunSummary};
pub use walker::{SymlinkPolicy, TreeWalker, WalkSummary, WorkItem};
