//! # Configuration Management Module
//!
//! Questo modulo gestisce tutta la configurazione dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce la struct `Config` con tutti i parametri del resize ricorsivo
//! - Fornisce validazione dei parametri prima che raggiungano il core
//! - Supporta caricamento/salvataggio configurazione da/verso file JSON
//!
//! ## Parametri di configurazione:
//! - `input_root`: Directory da scansionare ricorsivamente (path assoluto)
//! - `output_root`: Directory in cui replicare la gerarchia (path assoluto)
//! - `target_width`: Larghezza in pixel di ogni immagine ridimensionata (> 0)
//! - `thumbnail_width`: Larghezza dei thumbnails `tn-*` (opzionale, > 0)
//! - `debug`: Output dettagliato per file e per operazione
//! - `max_in_flight`: Limite opzionale alle operazioni di resize concorrenti (default: nessun limite)
//! - `symlinks`: Politica per i link simbolici incontrati durante la scansione
//! - `json_output`: Eventi JSON su stdout per uso programmatico
//!
//! ## Esempio:
//! ```rust,ignore
//! let config = Config {
//!     thumbnail_width: Some(200),
//!     ..Config::new("/photos", "/photos-small", 1024)
//! };
//! config.validate()?;
//! ```

use crate::error::ResizeError;
use crate::walker::SymlinkPolicy;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for a recursive resize run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory to resize recursively
    pub input_root: PathBuf,
    /// Directory receiving the mirrored tree of resized images
    pub output_root: PathBuf,
    /// New width for each image, in pixels
    pub target_width: u32,
    /// New width for each thumbnail, in pixels (None = no thumbnails)
    #[serde(default)]
    pub thumbnail_width: Option<u32>,
    /// Show extra output
    #[serde(default)]
    pub debug: bool,
    /// Upper bound on resize operations running at once (None = unbounded)
    #[serde(default)]
    pub max_in_flight: Option<usize>,
    /// What to do with symbolic links found in the input tree
    #[serde(default)]
    pub symlinks: SymlinkPolicy,
    /// Output progress and status as JSON for programmatic use
    #[serde(default)]
    pub json_output: bool,
}

impl Config {
    pub fn new(input_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>, target_width: u32) -> Self {
        Self {
            input_root: input_root.into(),
            output_root: output_root.into(),
            target_width,
            thumbnail_width: None,
            debug: false,
            max_in_flight: None,
            symlinks: SymlinkPolicy::default(),
            json_output: false,
        }
    }

    pub fn thumbnails_enabled(&self) -> bool {
        self.thumbnail_width.is_some()
    }

    /// Number of resize operations scheduled for every discovered image
    pub fn operations_per_image(&self) -> usize {
        if self.thumbnails_enabled() {
            2
        } else {
            1
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), ResizeError> {
        if self.target_width == 0 {
            return Err(ResizeError::Validation("Width must be greater than 0!".to_string()));
        }

        if self.thumbnail_width == Some(0) {
            return Err(ResizeError::Validation(
                "Thumbnail width must be greater than 0!".to_string(),
            ));
        }

        if self.max_in_flight == Some(0) {
            return Err(ResizeError::Validation(
                "Maximum in-flight operations must be greater than 0".to_string(),
            ));
        }

        if !self.input_root.is_dir() {
            return Err(ResizeError::Validation(format!(
                "Input directory does not exist or is not a directory: {}",
                self.input_root.display()
            )));
        }

        Ok(())
    }

    /// Load configuration from file.
    ///
    /// Il file non viene validato qui: i flag della command line possono ancora
    /// sovrascriverne i campi, quindi si valida solo la configurazione finale.
    pub async fn from_file(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read config file {}: {}", path.display(), e))?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_validation() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::new(temp_dir.path(), temp_dir.path(), 100);
        assert!(config.validate().is_ok());

        config.target_width = 0;
        assert!(config.validate().is_err());

        config.target_width = 100;
        config.thumbnail_width = Some(0);
        assert!(config.validate().is_err());

        config.thumbnail_width = Some(20);
        assert!(config.validate().is_ok());

        config.max_in_flight = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_rejects_missing_input() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::new(temp_dir.path().join("missing"), temp_dir.path(), 100);

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_operations_per_image() {
        let mut config = Config::new("/in", "/out", 100);
        assert_eq!(config.operations_per_image(), 1);

        config.thumbnail_width = Some(20);
        assert!(config.thumbnails_enabled());
        assert_eq!(config.operations_per_image(), 2);
    }

    #[tokio::test]
    async fn test_config_save_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");

        let original_config = Config {
            thumbnail_width: Some(64),
            debug: true,
            max_in_flight: Some(8),
            symlinks: SymlinkPolicy::Skip,
            ..Config::new(temp_dir.path(), temp_dir.path().join("out"), 640)
        };

        original_config.save_to_file(&config_path).await.unwrap();
        let loaded_config = Config::from_file(&config_path).await.unwrap();

        assert_eq!(loaded_config.input_root, temp_dir.path());
        assert_eq!(loaded_config.output_root, temp_dir.path().join("out"));
        assert_eq!(loaded_config.target_width, 640);
        assert_eq!(loaded_config.thumbnail_width, Some(64));
        assert!(loaded_config.debug);
        assert_eq!(loaded_config.max_in_flight, Some(8));
        assert_eq!(loaded_config.symlinks, SymlinkPolicy::Skip);
        assert!(!loaded_config.json_output);
    }

    #[tokio::test]
    async fn test_config_file_optional_fields_default() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let json = serde_json::json!({
            "input_root": temp_dir.path(),
            "output_root": temp_dir.path(),
            "target_width": 300,
        });
        tokio::fs::write(&config_path, json.to_string()).await.unwrap();

        let loaded_config = Config::from_file(&config_path).await.unwrap();
        assert_eq!(loaded_config.thumbnail_width, None);
        assert!(!loaded_config.debug);
        assert_eq!(loaded_config.max_in_flight, None);
        assert_eq!(loaded_config.symlinks, SymlinkPolicy::Error);
    }

    #[tokio::test]
    async fn test_config_file_loads_without_validating() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let json = serde_json::json!({
            "input_root": "/definitely/missing",
            "output_root": temp_dir.path(),
            "target_width": 0,
        });
        tokio::fs::write(&config_path, json.to_string()).await.unwrap();

        let loaded_config = Config::from_file(&config_path).await.unwrap();
        assert_eq!(loaded_config.target_width, 0);

        let err = loaded_config.validate().unwrap_err();
        assert_eq!(err.to_string(), "Configuration validation error: Width must be greater than 0!");
    }

    #[tokio::test]
    async fn test_config_file_malformed_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        tokio::fs::write(&config_path, "{ not json").await.unwrap();

        assert!(Config::from_file(&config_path).await.is_err());
    }
}
