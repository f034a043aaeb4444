//! # Platform-specific utilities
//!
//! Questo modulo centralizza la logica cross-platform per la risoluzione
//! del binario Ghostscript. La verifica di disponibilità avviene tramite
//! il probe `--version` dell'adapter, non qui.

use std::path::PathBuf;

/// Platform-specific command resolution for the Ghostscript engine
pub struct PlatformCommands;

impl PlatformCommands {
    /// The Ghostscript executable name on this platform.
    /// Windows ships the console binary as `gswin64c.exe`.
    pub fn ghostscript_command() -> &'static str {
        if cfg!(windows) {
            "gswin64c.exe"
        } else {
            "gs"
        }
    }

    /// Resolve the engine binary: explicit override wins, otherwise
    /// the platform default name is used and looked up on PATH.
    pub fn resolve_engine_binary(override_path: Option<&PathBuf>) -> PathBuf {
        match override_path {
            Some(path) => path.clone(),
            None => PathBuf::from(Self::ghostscript_command()),
        }
    }
}
