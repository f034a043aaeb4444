//! # Progress Tracking and Statistics Module
//!
//! Questo modulo gestisce il progress tracking e le statistiche del batch.
//!
//! ## Responsabilità:
//! - Progress bar visual con `indicatif` per feedback real-time
//! - Accumulo dei `TaskOutcome` in statistiche aggregate (`BatchStats`)
//! - Calcolo di byte risparmiati e percentuale di riduzione
//! - Report finale con elenco dei file falliti
//!
//! ## Statistiche tracciate:
//! - **total**: File PDF scoperti (fissato all'inizio del batch)
//! - **success** / **failed**: Partizione degli esiti
//! - **error_paths**: Path di input dei task falliti, in ordine di completamento
//! - **original_size** / **compressed_size**: Somme sui soli task riusciti
//!
//! ## Invariante:
//! `success + failed == total` una volta completati tutti i task.
//!
//! ## Visual feedback:
//! ```text
//! ⠋ [00:00:42] [========================>---------------] 93/150 (62%) [OK] report.pdf: 41.3% saved
//! ```

use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

use crate::file_manager::FileManager;
use crate::ghostscript::TaskOutcome;

/// Manages progress reporting for the compression batch
#[derive(Clone)]
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new(total_files: u64) -> Self {
        let bar = ProgressBar::new(total_files);

        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .unwrap()
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
}

/// Run-scoped aggregate of all task outcomes.
///
/// Constructed once per run and mutated only by the single consumer of
/// the result channel; workers never touch it directly.
#[derive(Debug, Default)]
pub struct BatchStats {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub error_paths: Vec<PathBuf>,
    pub original_size: u64,
    pub compressed_size: u64,
}

impl BatchStats {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    /// Fold one task outcome into the running totals
    pub fn record(&mut self, outcome: &TaskOutcome) {
        match outcome {
            TaskOutcome::Compressed {
                original_size,
                compressed_size,
                ..
            } => {
                self.success += 1;
                self.original_size += original_size;
                self.compressed_size += compressed_size;
            }
            TaskOutcome::Failed { input_path } => {
                self.failed += 1;
                self.error_paths.push(input_path.clone());
            }
        }
    }

    /// Number of outcomes recorded so far
    pub fn completed(&self) -> usize {
        self.success + self.failed
    }

    /// Bytes saved across all successful tasks
    pub fn bytes_saved(&self) -> u64 {
        self.original_size.saturating_sub(self.compressed_size)
    }

    /// Overall size reduction, guarded against an empty batch
    pub fn reduction_percent(&self) -> f64 {
        FileManager::calculate_reduction(self.original_size, self.compressed_size)
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Processed: {} files | Success: {} | Failed: {} | Saved: {} ({:.1}%)",
            self.total,
            self.success,
            self.failed,
            FileManager::format_size(self.bytes_saved()),
            self.reduction_percent()
        )
    }
}
