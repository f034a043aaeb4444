//! # Ghostscript Adapter Module
//!
//! Questo modulo gestisce tutte le invocazioni del motore di compressione esterno.
//!
//! ## Responsabilità:
//! - Probe della presenza e versione di Ghostscript (`--version`)
//! - Costruzione della command line `pdfwrite` per ogni task
//! - Cattura di exit status e dimensioni prima/dopo
//! - Conversione di ogni fallimento in `TaskOutcome::Failed`
//!
//! ## Contratto di invocazione:
//! ```text
//! gs -sDEVICE=pdfwrite -dCompatibilityLevel=1.4 -dPDFSETTINGS=/ebook \
//!    -dNOPAUSE -dQUIET -dBATCH -sOutputFile=<output> <input>
//! ```
//!
//! ## Policy di fallimento ("swallow and flag"):
//! Un input malformato non deve mai abortire il batch. Exit status non-zero,
//! output mancante o errori di I/O sulle dimensioni producono un
//! `TaskOutcome::Failed` che conserva solo il path di input; il dettaglio
//! (stderr del motore) viene loggato a livello debug e poi scartato.
//!
//! ## Esempio:
//! ```rust,ignore
//! let engine = GhostscriptEngine::new(&config);
//! let version = engine.probe().await?;
//! let outcome = engine.compress(&input, &output).await;
//! ```

use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

use crate::config::{Config, QualityProfile};
use crate::error::CompressError;
use crate::file_manager::FileManager;
use crate::platform::PlatformCommands;

/// Outcome of executing one compression task.
///
/// Failures carry only the input path: the batch report lists failed
/// files by path and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The engine exited cleanly and the output file is readable
    Compressed {
        input_path: PathBuf,
        original_size: u64,
        compressed_size: u64,
    },
    /// The invocation failed in any way (exit status, missing output, I/O)
    Failed { input_path: PathBuf },
}

impl TaskOutcome {
    /// The input file this outcome refers to
    pub fn input_path(&self) -> &Path {
        match self {
            Self::Compressed { input_path, .. } => input_path,
            Self::Failed { input_path } => input_path,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Compressed { .. })
    }
}

/// Adapter around the external Ghostscript binary
#[derive(Debug, Clone)]
pub struct GhostscriptEngine {
    binary: PathBuf,
    quality: QualityProfile,
    compatibility_level: String,
}

impl GhostscriptEngine {
    pub fn new(config: &Config) -> Self {
        Self {
            binary: PlatformCommands::resolve_engine_binary(config.gs_binary.as_ref()),
            quality: config.quality,
            compatibility_level: config.compatibility_level.clone(),
        }
    }

    /// Verify the engine is present and report its version.
    /// A failure here is fatal: no batch may start without the engine.
    pub async fn probe(&self) -> Result<String, CompressError> {
        let output = Command::new(&self.binary)
            .arg("--version")
            .output()
            .await
            .map_err(|e| {
                CompressError::MissingDependency(format!(
                    "Ghostscript not found ({}): {}. Make sure it is installed and on PATH",
                    self.binary.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            return Err(CompressError::MissingDependency(format!(
                "Ghostscript version probe failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Compress a single PDF into its planned output path.
    ///
    /// Never returns an error: every failure mode collapses into
    /// `TaskOutcome::Failed` so one bad file cannot abort the batch.
    pub async fn compress(&self, input_path: &Path, output_path: &Path) -> TaskOutcome {
        let failed = || TaskOutcome::Failed {
            input_path: input_path.to_path_buf(),
        };

        // Original size is read before the invocation
        let original_size = match FileManager::file_size(input_path).await {
            Ok(size) => size,
            Err(e) => {
                debug!("Failed to read input size for {}: {}", input_path.display(), e);
                return failed();
            }
        };

        let mut cmd = Command::new(&self.binary);
        cmd.args([
            "-sDEVICE=pdfwrite",
            &format!("-dCompatibilityLevel={}", self.compatibility_level),
            &format!("-dPDFSETTINGS={}", self.quality.as_pdf_setting()),
            "-dNOPAUSE",
            "-dQUIET",
            "-dBATCH",
            &format!("-sOutputFile={}", output_path.display()),
        ]);
        cmd.arg(input_path);

        debug!(
            "Running {} on {} -> {}",
            self.binary.display(),
            input_path.display(),
            output_path.display()
        );

        let output = match cmd.output().await {
            Ok(output) => output,
            Err(e) => {
                debug!("Failed to spawn engine for {}: {}", input_path.display(), e);
                return failed();
            }
        };

        if !output.status.success() {
            // Detail is swallowed here by design; only the path survives
            // into the final report
            let detail = CompressError::Ghostscript(format!(
                "exit status {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ));
            debug!("Engine failed for {}: {}", input_path.display(), detail);
            return failed();
        }

        // Compressed size is read after the invocation; a clean exit with
        // no readable output still counts as failure
        let compressed_size = match FileManager::file_size(output_path).await {
            Ok(size) => size,
            Err(e) => {
                debug!(
                    "Engine succeeded but output is unreadable for {}: {}",
                    input_path.display(),
                    e
                );
                return failed();
            }
        };

        TaskOutcome::Compressed {
            input_path: input_path.to_path_buf(),
            original_size,
            compressed_size,
        }
    }
}
