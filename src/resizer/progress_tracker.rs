//! # Progress Tracking Module
//!
//! Handler unico per il completamento delle operazioni.
//! Aggiorna i contatori, la progress bar e gli eventi JSON; riporta la fine della run una sola volta.

use crate::{
    config::Config,
    error::ResizeError,
    json_output::JsonMessage,
    progress::{ProgressManager, RunCounters},
    resizer::task::ResizeOperation,
};
use tracing::{debug, info};

/// Tracker che riceve ogni completamento e ogni fallimento della run
pub struct ProgressTracker {
    counters: RunCounters,
    progress_manager: ProgressManager,
    debug: bool,
    json_output: bool,
}

impl ProgressTracker {
    /// Crea un nuovo tracker; la progress bar è nascosta in debug e in modalità JSON
    pub fn new(counters: RunCounters, config: &Config) -> Self {
        let visible = !config.debug && !config.json_output && counters.total_operations() > 0;
        let progress_manager = ProgressManager::new(counters.total_operations() as u64, visible);

        Self {
            counters,
            progress_manager,
            debug: config.debug,
            json_output: config.json_output,
        }
    }

    pub fn counters(&self) -> &RunCounters {
        &self.counters
    }

    /// Registra un'operazione completata. Ritorna `true` solo per l'ultima.
    pub fn handle_completion(&self, operation: &ResizeOperation) -> bool {
        let update = self.counters.record_completion();

        if self.debug {
            debug!("{}% - {}", update.percent, operation.label);
        }
        if self.json_output {
            JsonMessage::progress(update.completed, update.total, update.percent, &operation.label).emit();
        }
        self.progress_manager.update(&operation.label);

        if update.finished {
            self.finish();
        }
        update.finished
    }

    /// Riepilogo finale della run
    pub fn finish(&self) {
        let total = self.counters.total_operations();
        let elapsed = self.counters.phase_elapsed();
        let summary = format!("Done! Output {} images in {}ms.", total, elapsed.as_millis());

        self.progress_manager.finish(&summary);
        if self.json_output {
            JsonMessage::complete(total, elapsed).emit();
        }
        info!("{}", summary);
    }

    /// Fallimento fatale: la barra si ferma e nessun riepilogo di completamento viene stampato.
    /// La riga di errore è compito del chiamante.
    pub fn fail(&self, err: &ResizeError) {
        let message = match err.failed_path() {
            Some(path) => format!("Problem outputting {}", path),
            None => "failed".to_string(),
        };
        self.progress_manager.abandon(&message);
    }
}
