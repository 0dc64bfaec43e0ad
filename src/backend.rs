//! # Resize Backend Module
//!
//! Backend che esegue materialmente decode, resize ed encode di una singola immagine.
//!
//! ## Responsabilità:
//! - Definisce il contratto `ResizeBackend` usato dallo scheduler
//! - Fornisce `ImageCrateBackend`, l'implementazione di default basata sul crate `image`
//!
//! ## Contratto:
//! - Il resize è guidato solo dalla larghezza: l'altezza segue l'aspect ratio originale
//! - Il formato di output segue l'estensione del file di destinazione
//! - Ogni invocazione termina con un solo `Ok` o un solo `Err`, che lo scheduler
//!   riporta così com'è nella riga di errore
//!
//! Le chiamate sono sincrone e CPU-bound: lo scheduler le esegue su `spawn_blocking`.

use crate::error::ResizeError;
use image::imageops::FilterType;
use std::path::Path;
use tracing::debug;

/// Decodes `source`, resizes it to `width` keeping the aspect ratio, and writes `destination`
pub trait ResizeBackend: Send + Sync + 'static {
    fn resize(&self, source: &Path, destination: &Path, width: u32) -> Result<(), ResizeError>;
}

/// Resize backend built on the `image` crate
#[derive(Debug, Clone, Copy)]
pub struct ImageCrateBackend {
    filter: FilterType,
}

impl Default for ImageCrateBackend {
    fn default() -> Self {
        Self {
            filter: FilterType::Lanczos3,
        }
    }
}

impl ImageCrateBackend {
    /// Height matching `target_width` for an image of `width`x`height`, never below 1
    pub fn scaled_height(width: u32, height: u32, target_width: u32) -> u32 {
        if width == 0 {
            return height.max(1);
        }
        let scaled = (u64::from(height) * u64::from(target_width) + u64::from(width) / 2) / u64::from(width);
        scaled.clamp(1, u64::from(u32::MAX)) as u32
    }
}

impl ResizeBackend for ImageCrateBackend {
    fn resize(&self, source: &Path, destination: &Path, width: u32) -> Result<(), ResizeError> {
        let image = image::io::Reader::open(source)?
            .with_guessed_format()?
            .decode()?;

        let height = Self::scaled_height(image.width(), image.height(), width);
        debug!(
            "Resizing {} from {}x{} to {}x{}",
            source.display(),
            image.width(),
            image.height(),
            width,
            height
        );

        image.resize_exact(width, height, self.filter).save(destination)?;
        Ok(())
    }
}
