//! # Compressor Module
//!
//! Modulo che separa le responsabilità del batch in sottomoduli:
//! - `batch_compressor`: Orchestratore principale
//! - `executor`: Pool di worker con fan-in su canale
//! - `task_planner`: Mappatura input/output dei task

pub mod batch_compressor;
pub mod executor;
pub mod task_planner;

pub use batch_compressor::BatchCompressor;
pub use executor::Executor;
pub use task_planner::{CompressionTask, TaskPlanner};
