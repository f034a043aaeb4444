//! # Task Planner Module
//!
//! Mappa ogni file scoperto sul suo path di output, preservando la
//! struttura delle sottodirectory relativa alla radice di input.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// One unit of work: an input PDF and its planned output location.
/// Immutable once planned; consumed exactly once by the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionTask {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

/// Computes output paths for discovered files
pub struct TaskPlanner;

impl TaskPlanner {
    /// Build one task per discovered file. The output path is
    /// `output_root` joined with the file's path relative to `input_root`,
    /// so the directory structure is mirrored. Distinct relative paths map
    /// to distinct outputs by construction.
    pub fn plan_tasks(
        files: &[PathBuf],
        input_root: &Path,
        output_root: &Path,
    ) -> Result<Vec<CompressionTask>> {
        files
            .iter()
            .map(|input_path| {
                let relative_path = input_path.strip_prefix(input_root).with_context(|| {
                    format!(
                        "File {} is not under input root {}",
                        input_path.display(),
                        input_root.display()
                    )
                })?;

                Ok(CompressionTask {
                    input_path: input_path.clone(),
                    output_path: output_root.join(relative_path),
                })
            })
            .collect()
    }

    /// Create parent directories for an output path if needed.
    /// Idempotent: safe to call when they already exist.
    pub async fn ensure_parent_dirs(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create parent directories for {}", path.display())
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_plan_mirrors_directory_structure() {
        let input_root = Path::new("/data/in");
        let output_root = Path::new("/data/out");
        let files = vec![
            PathBuf::from("/data/in/a.pdf"),
            PathBuf::from("/data/in/sub/b.pdf"),
            PathBuf::from("/data/in/sub/deep/c.pdf"),
        ];

        let tasks = TaskPlanner::plan_tasks(&files, input_root, output_root).unwrap();

        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].output_path, Path::new("/data/out/a.pdf"));
        assert_eq!(tasks[1].output_path, Path::new("/data/out/sub/b.pdf"));
        assert_eq!(tasks[2].output_path, Path::new("/data/out/sub/deep/c.pdf"));
        // Inputs carried through untouched
        assert_eq!(tasks[1].input_path, files[1]);
    }

    #[test]
    fn test_plan_rejects_file_outside_root() {
        let files = vec![PathBuf::from("/elsewhere/x.pdf")];
        let result = TaskPlanner::plan_tasks(&files, Path::new("/data/in"), Path::new("/data/out"));
        assert!(result.is_err());
    }

    #[test]
    fn test_distinct_inputs_give_distinct_outputs() {
        let input_root = Path::new("/in");
        let output_root = Path::new("/out");
        let files = vec![
            PathBuf::from("/in/a/report.pdf"),
            PathBuf::from("/in/b/report.pdf"),
        ];

        let tasks = TaskPlanner::plan_tasks(&files, input_root, output_root).unwrap();
        assert_ne!(tasks[0].output_path, tasks[1].output_path);
    }

    #[tokio::test]
    async fn test_ensure_parent_dirs_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("nested/dirs/doc.pdf");

        TaskPlanner::ensure_parent_dirs(&target).await.unwrap();
        assert!(target.parent().unwrap().is_dir());

        // Second call on existing directories must not fail
        TaskPlanner::ensure_parent_dirs(&target).await.unwrap();
    }
}
