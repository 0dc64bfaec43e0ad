//! # Resizer Module
//!
//! Scheduler del resize, separato in sottomoduli:
//! - `batch_resizer`: Orchestratore principale (scansione, dispatch, aggregazione)
//! - `task`: Singola operazione di resize eseguita sul backend
//! - `progress_tracker`: Gestione unificata dei completamenti
//! - `path_resolver`: Calcolo centralizzato dei path di output e dei thumbnails

pub mod batch_resizer;
pub mod task;
pub mod progress_tracker;
pub mod path_resolver;

pub use batch_resizer::{BatchResizer, RunSummary};
pub use task::{OperationKind, ResizeOperation};
pub use progress_tracker::ProgressTracker;
pub use path_resolver::PathResolver;
