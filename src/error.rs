//! # Error Types Module
//!
//! Questo modulo definisce tutti i tipi di errore custom dell'applicazione.
//!
//! ## Categorie di errori:
//! - `Io`: Errori di I/O (file non trovati, permessi, etc.)
//! - `MissingDependency`: Ghostscript assente o non interrogabile (fatale allo startup)
//! - `InvalidDirectory`: Directory di input/output inesistente (recuperata dal layer interattivo)
//! - `Ghostscript`: Dettaglio di una invocazione fallita (loggato, mai propagato oltre l'adapter)
//! - `Validation`: Errori di validazione della configurazione
//!
//! ## Policy di propagazione:
//! I fallimenti per singolo task non attraversano mai il boundary dell'executor:
//! vengono convertiti in `TaskOutcome::Failed`. Solo le precondizioni dell'intero
//! batch (tool mancante, directory mancanti) abortiscono la run.

use std::path::PathBuf;

/// Custom error types for batch PDF compression
#[derive(thiserror::Error, Debug)]
pub enum CompressError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dependency missing: {0}")]
    MissingDependency(String),

    #[error("Directory not found: {0}")]
    InvalidDirectory(PathBuf),

    #[error("Ghostscript error: {0}")]
    Ghostscript(String),

    #[error("Validation error: {0}")]
    Validation(String),
}
