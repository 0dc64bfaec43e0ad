//! # Progress Tracking and Counters Module
//!
//! Questo modulo gestisce i contatori della run e la progress bar.
//!
//! ## Responsabilità:
//! - `RunCounters`: totali congelati dopo la scansione e contatore atomico delle operazioni completate
//! - `ProgressManager`: progress bar visuale con `indicatif` per feedback real-time
//!
//! ## Invarianti dei contatori:
//! - `total_operations = total_images * operazioni_per_immagine` (1, oppure 2 con i thumbnails)
//! - Ogni operazione completata incrementa `completed` esattamente una volta
//! - Solo l'incremento che raggiunge `total_operations` segnala la fine della run,
//!   quindi il completamento viene riportato una sola volta anche con task paralleli
//!
//! ## Visual feedback:
//! ```text
//! ⠋ [00:00:04] [========================>---------------] 98/160 (61%) /holiday/tn-beach.jpg
//! ```

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Counters shared by every completion of a run
#[derive(Debug)]
pub struct RunCounters {
    total_images: usize,
    total_operations: usize,
    completed: AtomicUsize,
    phase_started: Instant,
}

/// Snapshot produced by one recorded completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub completed: usize,
    pub total: usize,
    /// Truncated percentage, 0-100
    pub percent: usize,
    /// True only for the completion that reached the total
    pub finished: bool,
}

impl RunCounters {
    pub fn new(total_images: usize, operations_per_image: usize, started: Instant) -> Self {
        Self {
            total_images,
            total_operations: total_images * operations_per_image,
            completed: AtomicUsize::new(0),
            phase_started: started,
        }
    }

    /// Restart the phase clock, called right before dispatch
    pub fn begin_phase(&mut self) {
        self.phase_started = Instant::now();
    }

    pub fn record_completion(&self) -> ProgressUpdate {
        let completed = self.completed.fetch_add(1, Ordering::AcqRel) + 1;
        let percent = if self.total_operations == 0 {
            100
        } else {
            completed * 100 / self.total_operations
        };

        ProgressUpdate {
            completed,
            total: self.total_operations,
            percent,
            finished: completed == self.total_operations,
        }
    }

    pub fn total_images(&self) -> usize {
        self.total_images
    }

    pub fn total_operations(&self) -> usize {
        self.total_operations
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Acquire)
    }

    pub fn is_complete(&self) -> bool {
        self.completed() >= self.total_operations
    }

    /// Time since dispatch began
    pub fn phase_elapsed(&self) -> Duration {
        self.phase_started.elapsed()
    }
}

/// Manages the terminal progress bar
#[derive(Clone)]
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager; a hidden one draws nothing
    pub fn new(total_operations: u64, visible: bool) -> Self {
        if !visible {
            return Self {
                bar: ProgressBar::hidden(),
            };
        }

        let bar = ProgressBar::new(total_operations);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Update progress with a message
    pub fn update(&self, message: &str) {
        self.bar.inc(1);
        self.bar.set_message(message.to_string());
    }

    /// Finish with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    /// Stop the bar where it is, leaving it on screen
    pub fn abandon(&self, message: &str) {
        self.bar.abandon_with_message(message.to_string());
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}
