//! # Resize Task Module
//!
//! Singola operazione di resize: una sorgente, una destinazione, una larghezza.
//! Ogni `WorkItem` produce una operazione full-size e, se configurato, una per il thumbnail.

use crate::{
    backend::ResizeBackend,
    config::Config,
    error::ResizeError,
    resizer::path_resolver::PathResolver,
    walker::{display_relative, WorkItem},
};
use std::fmt;
use std::path::PathBuf;

/// Which derived file an operation produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Full,
    Thumbnail,
}

/// Prefix used in failure lines: `Problem outputting thumbnail /tn-a.png`
impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Full => Ok(()),
            OperationKind::Thumbnail => write!(f, "thumbnail "),
        }
    }
}

/// One dispatched unit of work
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeOperation {
    pub kind: OperationKind,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub width: u32,
    /// Output path relative to the output root, as `/sub/b.jpg`
    pub label: String,
}

impl ResizeOperation {
    /// Operations for one work item: full size first, then the thumbnail when enabled.
    ///
    /// Thumbnails follow the configuration for every item, so a run always schedules
    /// exactly `items * config.operations_per_image()` operations.
    pub fn plan(item: &WorkItem, config: &Config) -> Vec<ResizeOperation> {
        let source = PathResolver::source_path(&config.input_root, item);
        let mut operations = Vec::with_capacity(config.operations_per_image());

        operations.push(ResizeOperation {
            kind: OperationKind::Full,
            source: source.clone(),
            destination: PathResolver::output_path(&config.output_root, item),
            width: config.target_width,
            label: item.to_string(),
        });

        if let Some(thumbnail_width) = config.thumbnail_width {
            operations.push(ResizeOperation {
                kind: OperationKind::Thumbnail,
                source,
                destination: PathResolver::thumbnail_path(&config.output_root, item),
                width: thumbnail_width,
                label: display_relative(&PathResolver::thumbnail_relative(item.relative_path())),
            });
        }

        operations
    }

    /// Run the operation against a backend, naming the output on failure
    pub fn execute(&self, backend: &dyn ResizeBackend) -> Result<(), ResizeError> {
        backend
            .resize(&self.source, &self.destination, self.width)
            .map_err(|source| self.failure(source))
    }

    /// Attribuisce un errore a questa operazione
    pub fn failure(&self, source: ResizeError) -> ResizeError {
        ResizeError::Operation {
            kind: self.kind,
            path: self.label.clone(),
            source: Box::new(source),
        }
    }
}
