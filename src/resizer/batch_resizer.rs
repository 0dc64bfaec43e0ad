//! # Batch Resizer Orchestrator
//!
//! Orchestratore principale: scansione completa, poi dispatch di tutte le operazioni.
//!
//! ## Flusso di esecuzione:
//! 1. **Scansione**: `TreeWalker` replica le directory e produce i `WorkItem`
//! 2. **Totali**: `total_operations = immagini * (2 con thumbnails, altrimenti 1)`
//! 3. **Dispatch**: ogni operazione viene avviata subito in un `JoinSet`, senza attendere le precedenti
//! 4. **Aggregazione**: un solo loop su `join_next` conta i completamenti
//! 5. **Fine**: successo quando i completamenti raggiungono il totale
//!
//! ## Fail-fast:
//! Il primo errore di un'operazione interrompe la run: le operazioni rimaste vengono
//! abbandonate (`abort_all`), nessun retry, nessuna pulizia dell'output parziale.
//!
//! ## Concorrenza:
//! Il resize è CPU-bound e gira su `spawn_blocking`. Con `max_in_flight` un semaforo
//! limita le esecuzioni contemporanee del backend; il dispatch resta comunque immediato.

use crate::{
    backend::{ImageCrateBackend, ResizeBackend},
    config::Config,
    error::ResizeError,
    json_output::JsonMessage,
    progress::RunCounters,
    resizer::{progress_tracker::ProgressTracker, task::ResizeOperation},
    walker::{TreeWalker, WorkItem},
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info};

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub total_images: usize,
    pub total_operations: usize,
    pub completed_operations: usize,
    pub walk_duration: Duration,
    pub resize_duration: Duration,
}

/// Orchestratore principale del resize ricorsivo
pub struct BatchResizer {
    config: Config,
    backend: Arc<dyn ResizeBackend>,
    limiter: Option<Arc<Semaphore>>,
}

impl BatchResizer {
    /// Crea un resizer con il backend di default (`image` crate)
    pub fn new(config: Config) -> Result<Self, ResizeError> {
        Self::with_backend(config, Arc::new(ImageCrateBackend::default()))
    }

    /// Crea un resizer con un backend a scelta
    pub fn with_backend(config: Config, backend: Arc<dyn ResizeBackend>) -> Result<Self, ResizeError> {
        config.validate()?;
        let limiter = config
            .max_in_flight
            .map(|permits| Arc::new(Semaphore::new(permits)));

        Ok(Self {
            config,
            backend,
            limiter,
        })
    }

    /// Esegue la run completa: scansione, dispatch e attesa di tutte le operazioni
    pub async fn run(&self) -> Result<RunSummary, ResizeError> {
        let started = Instant::now();
        self.log_configuration();

        let walk = TreeWalker::new(&self.config).walk()?;
        let mut counters = RunCounters::new(
            walk.total_images(),
            self.config.operations_per_image(),
            started,
        );

        info!(
            "Found a total of {} images in {}ms.",
            walk.total_images(),
            walk.duration.as_millis()
        );
        if self.config.json_output {
            JsonMessage::walk_complete(
                walk.total_images(),
                counters.total_operations(),
                walk.directories.len(),
                walk.duration,
            )
            .emit();
        }

        info!("Resizing images...");
        counters.begin_phase();
        let tracker = ProgressTracker::new(counters, &self.config);

        if tracker.counters().total_operations() == 0 {
            tracker.finish();
        } else {
            self.dispatch_and_wait(&walk.items, &tracker).await?;
        }

        let counters = tracker.counters();
        Ok(RunSummary {
            total_images: counters.total_images(),
            total_operations: counters.total_operations(),
            completed_operations: counters.completed(),
            walk_duration: walk.duration,
            resize_duration: counters.phase_elapsed(),
        })
    }

    /// Tutte le operazioni della run, nell'ordine di scoperta
    pub fn schedule(&self, items: &[WorkItem]) -> Vec<ResizeOperation> {
        items
            .iter()
            .flat_map(|item| ResizeOperation::plan(item, &self.config))
            .collect()
    }

    /// Avvia ogni operazione senza attendere le altre, poi aggrega i risultati
    async fn dispatch_and_wait(&self, items: &[WorkItem], tracker: &ProgressTracker) -> Result<(), ResizeError> {
        let mut tasks = JoinSet::new();

        for operation in self.schedule(items) {
            let backend = Arc::clone(&self.backend);
            let limiter = self.limiter.clone();

            tasks.spawn(async move {
                // The semaphore is never closed, so acquisition only fails on shutdown
                let _permit = match limiter {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };

                let blocking = operation.clone();
                let outcome = match tokio::task::spawn_blocking(move || blocking.execute(backend.as_ref())).await {
                    Ok(outcome) => outcome,
                    // A panicking backend still names its file
                    Err(join_error) => Err(operation.failure(ResizeError::Task(join_error))),
                };
                (operation, outcome)
            });
        }
        debug!("Dispatched {} resize operations", tasks.len());

        while let Some(joined) = tasks.join_next().await {
            let failure = match joined {
                Ok((operation, Ok(()))) => {
                    tracker.handle_completion(&operation);
                    continue;
                }
                Ok((_, Err(err))) => err,
                Err(join_error) => ResizeError::Task(join_error),
            };

            tasks.abort_all();
            tracker.fail(&failure);
            return Err(failure);
        }

        Ok(())
    }

    /// Riepilogo iniziale della configurazione
    fn log_configuration(&self) {
        if self.config.json_output {
            JsonMessage::start(
                self.config.input_root.clone(),
                self.config.output_root.clone(),
                self.config.target_width,
                self.config.thumbnail_width,
            )
            .emit();
        }

        info!(
            "Recursively resizing all images from {} to {}, changing width to {}px.",
            self.config.input_root.display(),
            self.config.output_root.display(),
            self.config.target_width
        );
        if let Some(thumbnail_width) = self.config.thumbnail_width {
            info!("Generating thumbnails with width of {}px.", thumbnail_width);
        }
        if let Some(max_in_flight) = self.config.max_in_flight {
            info!("At most {} resize operations will run at once", max_in_flight);
        }
    }
}
