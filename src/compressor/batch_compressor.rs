//! # Batch Compressor Orchestrator
//!
//! Orchestratore principale: probe del motore, discovery, pianificazione,
//! esecuzione con pool limitato e report finale. Delega il lavoro per
//! singolo file a `Executor` e `GhostscriptEngine`.

use anyhow::Result;
use std::path::Path;
use tracing::info;

use crate::{
    compressor::{executor::Executor, task_planner::TaskPlanner},
    config::Config,
    file_manager::FileManager,
    ghostscript::{GhostscriptEngine, TaskOutcome},
    progress::{BatchStats, ProgressManager},
};

/// Drives one compression run end to end
pub struct BatchCompressor {
    config: Config,
    engine: GhostscriptEngine,
}

impl BatchCompressor {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let engine = GhostscriptEngine::new(&config);

        Ok(Self { config, engine })
    }

    /// Run the whole batch: every PDF under `input_root` is compressed into
    /// the mirrored location under `output_root`. Returns the aggregate
    /// statistics; individual task failures are part of the stats, not errors.
    pub async fn run(&self, input_root: &Path, output_root: &Path) -> Result<BatchStats> {
        // Batch-wide precondition: no work starts without the engine
        let version = self.engine.probe().await?;
        info!("Ghostscript found, version: {}", version);

        let files = FileManager::find_pdf_files(input_root)?;
        info!("Found {} PDF files under {}", files.len(), input_root.display());

        if files.is_empty() {
            let stats = BatchStats::new(0);
            info!("No PDF files found, nothing to do");
            return Ok(stats);
        }

        info!(
            "Compressing with quality profile '{}' using {} workers",
            self.config.quality, self.config.workers
        );

        let tasks = TaskPlanner::plan_tasks(&files, input_root, output_root)?;

        let progress = ProgressManager::new(tasks.len() as u64);
        let mut stats = BatchStats::new(tasks.len());

        let executor = Executor::new(self.engine.clone(), self.config.workers);
        executor
            .run(tasks, |outcome| {
                stats.record(&outcome);
                progress.update(&Self::outcome_message(&outcome));
            })
            .await?;

        progress.finish(&stats.format_summary());
        self.log_final_report(&stats);

        Ok(stats)
    }

    /// Progress-bar message for one completed task
    fn outcome_message(outcome: &TaskOutcome) -> String {
        let name = outcome
            .input_path()
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        match outcome {
            TaskOutcome::Compressed {
                original_size,
                compressed_size,
                ..
            } => format!(
                "[OK] {}: {:.1}% saved",
                name,
                FileManager::calculate_reduction(*original_size, *compressed_size)
            ),
            TaskOutcome::Failed { .. } => format!("[FAIL] {}", name),
        }
    }

    fn log_final_report(&self, stats: &BatchStats) {
        info!("=== Compression Complete ===");
        info!("Files processed: {}", stats.total);
        info!("Success: {}", stats.success);
        info!("Failed: {}", stats.failed);
        info!("Total size before: {}", FileManager::format_size(stats.original_size));
        info!("Total size after: {}", FileManager::format_size(stats.compressed_size));
        info!(
            "Saved: {} ({:.1}%)",
            FileManager::format_size(stats.bytes_saved()),
            stats.reduction_percent()
        );

        if !stats.error_paths.is_empty() {
            info!("Failed files:");
            for path in &stats.error_paths {
                info!("  - {}", path.display());
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Stub engine: halves any input, except paths under a `b/` directory,
    /// which fail with a non-zero exit
    fn write_halving_stub(dir: &Path) -> PathBuf {
        let path = dir.join("gs_halving");
        fs::write(
            &path,
            r#"#!/bin/sh
for a in "$@"; do
  case "$a" in
    --version) echo 10.02.1; exit 0 ;;
    -sOutputFile=*) out="${a#-sOutputFile=}" ;;
    *) in="$a" ;;
  esac
done
case "$in" in */b/*) exit 1 ;; esac
size=$(wc -c < "$in")
head -c $((size / 2)) "$in" > "$out"
"#,
        )
        .unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn config_with_stub(stub: PathBuf) -> Config {
        Config {
            gs_binary: Some(stub),
            workers: 2,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_mixed_batch_scenario() {
        let temp_dir = TempDir::new().unwrap();
        let stub = write_halving_stub(temp_dir.path());

        let input_root = temp_dir.path().join("in");
        let output_root = temp_dir.path().join("out");
        fs::create_dir_all(input_root.join("a")).unwrap();
        fs::create_dir_all(input_root.join("b")).unwrap();
        fs::create_dir_all(&output_root).unwrap();

        // a/1.pdf gets halved, b/2.pdf fails
        fs::write(input_root.join("a/1.pdf"), vec![0u8; 1000]).unwrap();
        fs::write(input_root.join("b/2.pdf"), vec![0u8; 2000]).unwrap();

        let compressor = BatchCompressor::new(config_with_stub(stub)).unwrap();
        let stats = compressor.run(&input_root, &output_root).await.unwrap();

        assert_eq!(stats.total, 2);
        assert_eq!(stats.success, 1);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.success + stats.failed, stats.total);
        assert_eq!(stats.original_size, 1000);
        assert_eq!(stats.compressed_size, 500);
        assert_eq!(stats.bytes_saved(), 500);
        assert_eq!(stats.reduction_percent(), 50.0);
        assert_eq!(stats.error_paths, vec![input_root.join("b/2.pdf")]);

        // Output mirrors the input structure, failed file produced nothing
        let compressed = output_root.join("a/1.pdf");
        assert_eq!(fs::metadata(&compressed).unwrap().len(), 500);
        assert!(!output_root.join("b/2.pdf").exists());
    }

    #[tokio::test]
    async fn test_all_success_batch() {
        let temp_dir = TempDir::new().unwrap();
        let stub = write_halving_stub(temp_dir.path());

        let input_root = temp_dir.path().join("in");
        let output_root = temp_dir.path().join("out");
        fs::create_dir_all(input_root.join("nested/deep")).unwrap();
        fs::create_dir_all(&output_root).unwrap();

        fs::write(input_root.join("x.pdf"), vec![1u8; 100]).unwrap();
        fs::write(input_root.join("nested/y.pdf"), vec![1u8; 200]).unwrap();
        fs::write(input_root.join("nested/deep/z.PDF"), vec![1u8; 400]).unwrap();

        let compressor = BatchCompressor::new(config_with_stub(stub)).unwrap();
        let stats = compressor.run(&input_root, &output_root).await.unwrap();

        assert_eq!(stats.total, 3);
        assert_eq!(stats.failed, 0);
        assert!(stats.error_paths.is_empty());
        assert_eq!(stats.original_size, 700);
        assert_eq!(stats.compressed_size, 350);

        // Every reported compressed size matches the file on disk
        assert_eq!(fs::metadata(output_root.join("x.pdf")).unwrap().len(), 50);
        assert_eq!(fs::metadata(output_root.join("nested/y.pdf")).unwrap().len(), 100);
        assert_eq!(
            fs::metadata(output_root.join("nested/deep/z.PDF")).unwrap().len(),
            200
        );
    }

    #[tokio::test]
    async fn test_empty_input_root() {
        let temp_dir = TempDir::new().unwrap();
        let stub = write_halving_stub(temp_dir.path());

        let input_root = temp_dir.path().join("in");
        let output_root = temp_dir.path().join("out");
        fs::create_dir_all(&input_root).unwrap();
        fs::create_dir_all(&output_root).unwrap();

        let compressor = BatchCompressor::new(config_with_stub(stub)).unwrap();
        let stats = compressor.run(&input_root, &output_root).await.unwrap();

        assert_eq!(stats.total, 0);
        assert_eq!(stats.completed(), 0);
        assert_eq!(stats.reduction_percent(), 0.0);
        assert!(stats.error_paths.is_empty());
    }

    #[tokio::test]
    async fn test_missing_engine_aborts_before_work() {
        let temp_dir = TempDir::new().unwrap();

        let input_root = temp_dir.path().join("in");
        let output_root = temp_dir.path().join("out");
        fs::create_dir_all(&input_root).unwrap();
        fs::create_dir_all(&output_root).unwrap();
        fs::write(input_root.join("doc.pdf"), b"%PDF").unwrap();

        let config = config_with_stub(temp_dir.path().join("no_such_gs"));
        let compressor = BatchCompressor::new(config).unwrap();
        let result = compressor.run(&input_root, &output_root).await;

        assert!(result.is_err());
        assert!(!output_root.join("doc.pdf").exists());
    }

    #[tokio::test]
    async fn test_rerun_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let stub = write_halving_stub(temp_dir.path());

        let input_root = temp_dir.path().join("in");
        fs::create_dir_all(input_root.join("a")).unwrap();
        fs::create_dir_all(input_root.join("b")).unwrap();
        fs::write(input_root.join("a/1.pdf"), vec![0u8; 1000]).unwrap();
        fs::write(input_root.join("b/2.pdf"), vec![0u8; 2000]).unwrap();

        let compressor = BatchCompressor::new(config_with_stub(stub)).unwrap();

        let out_one = temp_dir.path().join("out1");
        let out_two = temp_dir.path().join("out2");
        fs::create_dir_all(&out_one).unwrap();
        fs::create_dir_all(&out_two).unwrap();

        let first = compressor.run(&input_root, &out_one).await.unwrap();
        let second = compressor.run(&input_root, &out_two).await.unwrap();

        assert_eq!(first.total, second.total);
        assert_eq!(first.success, second.success);
        assert_eq!(first.failed, second.failed);
        assert_eq!(first.error_paths, second.error_paths);
    }
}
