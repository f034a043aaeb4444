//! # Configuration Management Module
//!
//! Questo modulo gestisce tutta la configurazione dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce la struct `Config` con tutti i parametri di compressione
//! - Definisce `QualityProfile` con la mappatura verso `-dPDFSETTINGS` di Ghostscript
//! - Fornisce validazione robusta dei parametri di input
//! - Supporta caricamento/salvataggio configurazione da/verso file JSON
//!
//! ## Parametri di configurazione:
//! - `quality`: Profilo di qualità Ghostscript (default: `ebook`)
//! - `workers`: Numero di worker paralleli (default: core disponibili)
//! - `compatibility_level`: Livello di compatibilità PDF in output (default: "1.4")
//! - `gs_binary`: Override del binario Ghostscript (default: risolto per piattaforma)
//!
//! ## Profili di qualità:
//! - `screen`: Massima compressione, bassa qualità
//! - `ebook`: Compromesso bilanciato (default)
//! - `printer`: Alta qualità, compressione moderata
//! - `prepress`: Qualità massima, compressione minima
//! - `default`: Impostazioni standard del motore
//!
//! ## Esempio:
//! ```rust,ignore
//! let config = Config {
//!     quality: QualityProfile::Screen,
//!     workers: 8,
//!     ..Default::default()
//! };
//! config.validate()?;
//! ```

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::CompressError;

/// Named Ghostscript quality preset controlling the size/fidelity tradeoff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum QualityProfile {
    /// Max compression, low quality
    Screen,
    /// Balanced compression (default)
    Ebook,
    /// High quality, moderate compression
    Printer,
    /// Max quality, minimal compression
    Prepress,
    /// Engine defaults
    Default,
}

impl QualityProfile {
    /// The `-dPDFSETTINGS` value Ghostscript expects for this profile
    pub fn as_pdf_setting(&self) -> &'static str {
        match self {
            Self::Screen => "/screen",
            Self::Ebook => "/ebook",
            Self::Printer => "/printer",
            Self::Prepress => "/prepress",
            Self::Default => "/default",
        }
    }

    /// Map an interactive menu choice (1-5) to a profile.
    /// Blank or unrecognized input falls back to `Ebook`.
    pub fn from_menu_choice(choice: &str) -> Self {
        match choice.trim() {
            "1" => Self::Screen,
            "3" => Self::Printer,
            "4" => Self::Prepress,
            "5" => Self::Default,
            _ => Self::Ebook,
        }
    }
}

impl std::fmt::Display for QualityProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Screen => "screen",
            Self::Ebook => "ebook",
            Self::Printer => "printer",
            Self::Prepress => "prepress",
            Self::Default => "default",
        };
        write!(f, "{}", name)
    }
}

/// Configuration for a compression run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Ghostscript quality profile
    pub quality: QualityProfile,
    /// Number of parallel workers
    pub workers: usize,
    /// PDF compatibility level passed to the engine
    pub compatibility_level: String,
    /// Override for the Ghostscript executable (None = platform default)
    pub gs_binary: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quality: QualityProfile::Ebook,
            workers: default_workers(),
            compatibility_level: "1.4".to_string(),
            gs_binary: None,
        }
    }
}

/// Default worker count: one per available processing unit
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

impl Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(CompressError::Validation(
                "Number of workers must be greater than 0".to_string(),
            )
            .into());
        }

        // Ghostscript expects "major.minor", e.g. "1.4"
        let mut parts = self.compatibility_level.split('.');
        let valid = matches!(
            (parts.next(), parts.next(), parts.next()),
            (Some(major), Some(minor), None)
                if !major.is_empty()
                    && !minor.is_empty()
                    && major.chars().all(|c| c.is_ascii_digit())
                    && minor.chars().all(|c| c.is_ascii_digit())
        );
        if !valid {
            return Err(CompressError::Validation(format!(
                "Invalid PDF compatibility level: {}",
                self.compatibility_level
            ))
            .into());
        }

        Ok(())
    }

    /// Load configuration from file
    pub async fn from_file(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save_to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}
