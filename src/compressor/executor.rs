//! # Executor Module
//!
//! Pool di worker con concorrenza limitata per le invocazioni del motore.
//!
//! ## Modello:
//! - Tutti i task vengono spawnati subito, nell'ordine della sequenza;
//!   un semaforo limita quanti girano contemporaneamente.
//! - Gli esiti confluiscono su un canale mpsc verso un unico consumer,
//!   in ordine di completamento e mentre il batch è ancora in corso,
//!   così il report procede incrementalmente.
//! - Il fallimento di un task non cancella né influenza i task fratelli:
//!   l'adapter è infallibile al boundary del task.
//! - Nessun timeout, nessun retry, nessuna cancellazione: i task sottomessi
//!   corrono fino al completamento.

use anyhow::Result;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tracing::debug;

use crate::compressor::task_planner::{CompressionTask, TaskPlanner};
use crate::ghostscript::{GhostscriptEngine, TaskOutcome};

/// Bounded worker pool that fans tasks out to the engine and funnels
/// outcomes back to a single consumer.
pub struct Executor {
    engine: GhostscriptEngine,
    workers: usize,
}

impl Executor {
    pub fn new(engine: GhostscriptEngine, workers: usize) -> Self {
        Self {
            engine,
            workers: workers.max(1),
        }
    }

    /// Run every task and invoke `on_outcome` once per task, in completion
    /// order, as results arrive. Returns once all tasks have completed.
    pub async fn run<F>(&self, tasks: Vec<CompressionTask>, mut on_outcome: F) -> Result<()>
    where
        F: FnMut(TaskOutcome),
    {
        let semaphore = Arc::new(Semaphore::new(self.workers));
        let (tx, mut rx) = mpsc::channel(self.workers);

        // Spawn everything up front and acquire permits inside the tasks:
        // this loop never blocks on a permit, so the consumer below drains
        // outcomes while the batch is still running.
        for task in tasks {
            let semaphore = semaphore.clone();
            let engine = self.engine.clone();
            let tx = tx.clone();

            tokio::spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    // The semaphore is never closed while the run is alive
                    Err(_) => return,
                };

                let outcome = Self::run_single(&engine, &task).await;
                // The receiver outlives all senders; a send failure only
                // means the run was torn down
                let _ = tx.send(outcome).await;
            });
        }
        drop(tx);

        // Single consumer: the only writer to the aggregate state
        while let Some(outcome) = rx.recv().await {
            on_outcome(outcome);
        }

        Ok(())
    }

    /// Prepare the output location and invoke the engine for one task.
    /// Any preparation failure collapses into a failed outcome, keeping
    /// task isolation intact.
    async fn run_single(engine: &GhostscriptEngine, task: &CompressionTask) -> TaskOutcome {
        if let Err(e) = TaskPlanner::ensure_parent_dirs(&task.output_path).await {
            debug!(
                "Failed to prepare output directory for {}: {}",
                task.output_path.display(),
                e
            );
            return TaskOutcome::Failed {
                input_path: task.input_path.clone(),
            };
        }

        engine.compress(&task.input_path, &task.output_path).await
    }
}
