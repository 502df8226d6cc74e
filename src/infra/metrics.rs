// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records the average training loss of every epoch to a CSV
// file stored alongside the checkpoint it belongs to.
//
// Example output:
//   epoch,train_loss
//   1,3.124500
//   2,2.890100

use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TraceError};

pub const METRICS_FILE: &str = "metrics.csv";

/// One row of metrics data for a single training epoch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// The epoch number (starts at 1)
    pub epoch: usize,

    /// Mean over mini-batches of the batch-mean sequence loss
    pub train_loss: f64,
}

impl EpochMetrics {
    pub fn new(epoch: usize, train_loss: f64) -> Self {
        Self { epoch, train_loss }
    }
}

/// Appends epoch metrics to `<dir>/metrics.csv`.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create the logger, writing the CSV header if the file is new.
    pub fn new(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir).map_err(|e| TraceError::io(e, dir))?;

        let csv_path = dir.join(METRICS_FILE);

        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path).map_err(|e| TraceError::io(e, &csv_path))?;
            writeln!(f, "epoch,train_loss").map_err(|e| TraceError::io(e, &csv_path))?;
        }

        Ok(Self { csv_path })
    }

    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .map_err(|e| TraceError::io(e, &self.csv_path))?;

        writeln!(f, "{},{:.6}", m.epoch, m.train_loss)
            .map_err(|e| TraceError::io(e, &self.csv_path))?;

        tracing::debug!("Logged epoch {} metrics: train_loss={:.4}", m.epoch, m.train_loss);
        Ok(())
    }

    pub fn log_all(&self, history: &[EpochMetrics]) -> Result<()> {
        history.iter().try_for_each(|m| self.log(m))
    }
}
