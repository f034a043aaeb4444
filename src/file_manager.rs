//! # File Management Module
//!
//! Questo modulo gestisce la discovery dei PDF e le utilità sui file.
//!
//! ## Responsabilità:
//! - Discovery ricorsiva dei file PDF in una directory (ordine deterministico)
//! - Lettura dimensione file
//! - Formattazione human-readable delle dimensioni
//! - Calcolo percentuale di riduzione
//!
//! ## Discovery:
//! - `find_pdf_files()`: tutti i file regolari con estensione `.pdf`
//!   (case-insensitive) a qualsiasi profondità, ordinati per nome file
//!   per directory, così l'ordine di sottomissione è riproducibile nei test.
//!
//! ## Esempio:
//! ```rust,ignore
//! let files = FileManager::find_pdf_files(&input_root)?;
//! for file in &files {
//!     println!("{} ({})", file.display(), FileManager::format_size(1234));
//! }
//! ```

use anyhow::Result;
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

use crate::error::CompressError;

/// Manages file discovery and size utilities
pub struct FileManager;

impl FileManager {
    /// Get the size of a file in bytes
    pub async fn file_size(path: &Path) -> Result<u64> {
        let metadata = fs::metadata(path).await?;
        Ok(metadata.len())
    }

    /// Find all PDF files beneath a directory, recursively.
    /// Entries are sorted by file name within each directory so the
    /// resulting order is deterministic.
    pub fn find_pdf_files(root: &Path) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(CompressError::InvalidDirectory(root.to_path_buf()).into());
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();
            if Self::is_pdf(path) {
                files.push(path.to_path_buf());
            }
        }

        Ok(files)
    }

    /// Check if a file name ends with `.pdf`, case-insensitively.
    /// Matches on the name suffix rather than `Path::extension()` so a
    /// bare dotfile named `.pdf` is included too.
    pub fn is_pdf(path: &Path) -> bool {
        match path.file_name() {
            Some(name) => name.to_string_lossy().to_lowercase().ends_with(".pdf"),
            None => false,
        }
    }

    /// Get human-readable file size
    pub fn format_size(size: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", size as u64, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }

    /// Calculate percentage reduction
    pub fn calculate_reduction(original_size: u64, new_size: u64) -> f64 {
        if original_size == 0 {
            0.0
        } else {
            ((original_size as f64 - new_size as f64) / original_size as f64) * 100.0
        }
    }
}
