//! # PDF Batch Compressor Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API pubbliche.
//!
//! ## Responsabilità:
//! - Definisce la struttura modulare dell'applicazione
//! - Espone i tipi e le funzioni principali tramite re-exports
//! - Fornisce un'interfaccia pulita per il main.rs e per altri consumatori
//!
//! ## Architettura dei moduli:
//! - `config`: Gestione configurazione, profili di qualità e validazione
//! - `error`: Tipi di errore custom per le diverse operazioni
//! - `file_manager`: Discovery ricorsiva dei PDF e utilità sui file
//! - `platform`: Risoluzione cross-platform del binario Ghostscript
//! - `ghostscript`: Adapter verso il motore di compressione esterno
//! - `compressor`: Pianificazione task, pool di worker e orchestrazione
//! - `progress`: Progress tracking e statistiche aggregate
//!
//! ## Utilizzo:
//! ```rust,ignore
//! use pdf_batch_compressor::{BatchCompressor, Config};
//!
//! let compressor = BatchCompressor::new(Config::default())?;
//! let stats = compressor.run(&input_dir, &output_dir).await?;
//! println!("{}", stats.format_summary());
//! ```

pub mod compressor;
pub mod config;
pub mod error;
pub mod file_manager;
pub mod ghostscript;
pub mod platform;
pub mod progress;

pub use compressor::{BatchCompressor, CompressionTask};
pub use config::{Config, QualityProfile};
pub use error::CompressError;
pub use ghostscript::{GhostscriptEngine, TaskOutcome};
pub use progress::BatchStats;
