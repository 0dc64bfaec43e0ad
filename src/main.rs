//! # Recursive Resize - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing`
//! - Validazione degli input dell'utente (uscita pulita con codice 0 se non validi)
//! - Creazione della configurazione e avvio del `BatchResizer`
//!
//! ## Flusso di esecuzione:
//! 1. Parsa gli argomenti CLI (input, output, width, thumbnail, debug, ...)
//! 2. Configura il logging (INFO o DEBUG a seconda del flag debug)
//! 3. Risolve le directory mancanti sulla directory corrente e le rende assolute
//! 4. Avvia la run; al primo errore termina subito con codice 1
//!
//! ## Esempio di utilizzo:
//! ```bash
//! recres -i ./photos -o ./photos-small -w 1024 -t 200 --debug
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use recursive_resize::{
    file_manager::FileManager, json_output::JsonMessage, BatchResizer, Config, ResizeError, SymlinkPolicy,
};

#[derive(Parser)]
#[command(name = "recres")]
#[command(about = "Recursively resize every image of a directory into a mirrored output tree")]
struct Args {
    /// Input directory to recursively resize
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output directory to place resized images/thumbnails
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// The new width for each image, in pixels
    #[arg(short, long, required_unless_present = "config", allow_negative_numbers = true)]
    width: Option<i64>,

    /// If defined, the new width for each thumbnail, in pixels
    #[arg(short, long, allow_negative_numbers = true)]
    thumbnail: Option<i64>,

    /// Show extra output
    #[arg(short, long)]
    debug: bool,

    /// Load settings from a JSON file (command-line flags take precedence)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Upper bound on resize operations running at once
    #[arg(long)]
    max_in_flight: Option<usize>,

    /// What to do with symbolic links found in the input tree
    #[arg(long, value_enum)]
    symlinks: Option<SymlinkPolicy>,

    /// Output progress and status as JSON lines on stdout
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.debug, args.json)?;

    let Some(config) = build_config(&args).await? else {
        return Ok(());
    };
    let json_output = config.json_output;

    let resizer = match BatchResizer::new(config) {
        Ok(resizer) => resizer,
        Err(ResizeError::Validation(message)) => {
            info!("{}", message);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if let Err(e) = resizer.run().await {
        if json_output {
            JsonMessage::error(e.to_string(), e.failed_path().map(str::to_string)).emit();
        }
        error!("{}", e);
        // In-flight resizes are abandoned, not awaited
        std::process::exit(1);
    }

    Ok(())
}

/// Install the global subscriber; JSON mode keeps stdout for events only
fn init_logging(debug: bool, json: bool) -> Result<()> {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    if json {
        tracing::subscriber::set_global_default(builder.with_writer(std::io::stderr).finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

/// Merge CLI flags over an optional config file.
///
/// Returns `None` when the input is rejected; the process then exits cleanly without work.
/// The merged result is validated by `BatchResizer::new`, never the file on its own.
async fn build_config(args: &Args) -> Result<Option<Config>> {
    let from_file = match &args.config {
        Some(path) => Some(Config::from_file(path).await?),
        None => None,
    };

    if from_file.is_none() && args.input.is_none() && args.output.is_none() {
        info!("You must specify either an input or an output directory. For help, use recres -h");
        return Ok(None);
    }

    let input_root = resolve_root(
        args.input.as_deref(),
        from_file.as_ref().map(|c| c.input_root.as_path()),
        "input",
    )?;
    let output_root = resolve_root(
        args.output.as_deref(),
        from_file.as_ref().map(|c| c.output_root.as_path()),
        "output",
    )?;

    let target_width = match (args.width, &from_file) {
        (Some(width), _) => match positive_width(width) {
            Some(width) => width,
            None => {
                info!("Width must be greater than 0!");
                return Ok(None);
            }
        },
        (None, Some(file)) => file.target_width,
        (None, None) => return Err(anyhow::anyhow!("A width is required. For help, use recres -h")),
    };

    let thumbnail_width = match (args.thumbnail, &from_file) {
        (Some(width), _) => match positive_width(width) {
            Some(width) => Some(width),
            None => {
                info!("Thumbnail width must be greater than 0!");
                return Ok(None);
            }
        },
        (None, Some(file)) => file.thumbnail_width,
        (None, None) => None,
    };

    let file_defaults = from_file.unwrap_or_else(|| Config::new(&input_root, &output_root, target_width));

    Ok(Some(Config {
        input_root,
        output_root,
        target_width,
        thumbnail_width,
        debug: args.debug || file_defaults.debug,
        max_in_flight: args.max_in_flight.or(file_defaults.max_in_flight),
        symlinks: args.symlinks.unwrap_or(file_defaults.symlinks),
        json_output: args.json || file_defaults.json_output,
    }))
}

/// Pick the CLI path, then the config file path, then the current directory
fn resolve_root(cli: Option<&Path>, from_file: Option<&Path>, role: &str) -> Result<PathBuf> {
    match cli.or(from_file) {
        Some(path) => Ok(FileManager::absolutize(path)?),
        None => {
            let cwd = std::env::current_dir()?;
            info!("No {} directory specified, using {}", role, cwd.display());
            Ok(cwd)
        }
    }
}

fn positive_width(width: i64) -> Option<u32> {
    u32::try_from(width).ok().filter(|w| *w > 0)
}
