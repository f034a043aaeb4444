//! # PDF Batch Compressor - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing`
//! - Prompt interattivi quando le directory non sono passate come argomenti
//! - Creazione della configurazione e avvio del batch
//!
//! ## Flusso di esecuzione:
//! 1. Parsa gli argomenti CLI (directory, quality, workers, etc.)
//! 2. Configura il logging (INFO o DEBUG a seconda del flag verbose)
//! 3. Risolve le directory di input/output (argomento o prompt con retry)
//! 4. Risolve il profilo di qualità (flag, oppure menu numerico 1-5)
//! 5. Istanzia BatchCompressor, avvia la run e stampa la durata
//!
//! ## Esempio di utilizzo:
//! ```bash
//! pdf-compressor /path/to/input /path/to/output --quality screen --workers 8
//! pdf-compressor            # modalità interattiva completa
//! ```

use anyhow::Result;
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use pdf_batch_compressor::{BatchCompressor, Config, QualityProfile};

#[derive(Parser)]
#[command(name = "pdf-compressor")]
#[command(about = "Compress PDF files in bulk via Ghostscript")]
struct Args {
    /// Directory containing PDF files to compress (prompted if omitted)
    input_dir: Option<PathBuf>,

    /// Directory receiving the compressed tree (prompted if omitted)
    output_dir: Option<PathBuf>,

    /// Ghostscript quality profile
    #[arg(short, long)]
    quality: Option<QualityProfile>,

    /// Number of parallel workers (default: available cores)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Load configuration from a JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to the Ghostscript binary (default: gs / gswin64c.exe on PATH)
    #[arg(long)]
    gs_binary: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Ask for a directory until an existing one is given
fn prompt_directory(prompt_text: &str) -> Result<PathBuf> {
    loop {
        print!("{}: ", prompt_text);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let path = PathBuf::from(input.trim().trim_matches('"').trim());

        if path.is_dir() {
            return Ok(path);
        }
        println!("Directory not found: {}\nPlease try again.\n", path.display());
    }
}

/// Numeric quality menu, defaulting to `ebook` on blank or invalid input
fn prompt_quality() -> Result<QualityProfile> {
    println!("Select a compression quality profile:");
    println!("1. screen   (low quality, max compression)");
    println!("2. ebook    (balanced, default)");
    println!("3. printer  (high quality, moderate compression)");
    println!("4. prepress (max quality, minimal compression)");
    println!("5. default  (engine defaults)");
    print!("Enter a number (1-5, default 2): ");
    io::stdout().flush()?;

    let mut choice = String::new();
    io::stdin().read_line(&mut choice)?;
    Ok(QualityProfile::from_menu_choice(&choice))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Resolve directories: CLI argument or interactive prompt with retry
    let interactive = args.input_dir.is_none();

    let input_dir = match args.input_dir {
        Some(dir) => {
            if !dir.is_dir() {
                return Err(anyhow::anyhow!("Input directory does not exist: {}", dir.display()));
            }
            dir
        }
        None => prompt_directory("Enter the INPUT directory")?,
    };

    let output_dir = match args.output_dir {
        Some(dir) => {
            if !dir.exists() {
                std::fs::create_dir_all(&dir)?;
                info!("Created output directory: {}", dir.display());
            }
            if !dir.is_dir() {
                return Err(anyhow::anyhow!("Output path is not a directory: {}", dir.display()));
            }
            dir
        }
        None => prompt_directory("Enter the OUTPUT directory")?,
    };

    let mut config = match args.config {
        Some(ref path) => Config::from_file(path).await?,
        None => Config::default(),
    };

    if let Some(quality) = args.quality {
        config.quality = quality;
    } else if interactive {
        config.quality = prompt_quality()?;
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if args.gs_binary.is_some() {
        config.gs_binary = args.gs_binary;
    }

    let start = Instant::now();

    let compressor = BatchCompressor::new(config)?;
    compressor.run(&input_dir, &output_dir).await?;

    info!("Elapsed time: {:.2}s", start.elapsed().as_secs_f64());

    Ok(())
}
