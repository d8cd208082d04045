//! Classification metrics and the metrics sink artifact.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::config::constants::METRICS_FILE;
use crate::error::{MlpipeError, Result};

/// Binary F1 score with class 1 as the positive label.
///
/// F1 = 2·TP / (2·TP + FP + FN). Returns 0.0 when there are neither true
/// nor predicted positives.
pub fn f1_score(y_true: &[u8], y_pred: &[u8]) -> Result<f64> {
    if y_true.len() != y_pred.len() {
        return Err(MlpipeError::model(format!(
            "y_true has {} labels but y_pred has {}",
            y_true.len(),
            y_pred.len()
        )));
    }

    let (mut tp, mut fp, mut fn_) = (0usize, 0usize, 0usize);
    for (&t, &p) in y_true.iter().zip(y_pred) {
        match (t == 1, p == 1) {
            (true, true) => tp += 1,
            (false, true) => fp += 1,
            (true, false) => fn_ += 1,
            (false, false) => {}
        }
    }

    let denominator = 2 * tp + fp + fn_;
    if denominator == 0 {
        return Ok(0.0);
    }
    Ok(2.0 * tp as f64 / denominator as f64)
}

/// Named scalar values logged by a step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    metrics: IndexMap<String, f64>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a metric; a repeated name replaces the earlier value
    pub fn log_metric(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        info!("metric {} = {}", name, value);
        self.metrics.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Write `metrics.json` into `dir`
    pub fn write_to(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;
        std::fs::write(dir.join(METRICS_FILE), serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn read_from(dir: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(dir.join(METRICS_FILE))?;
        Ok(serde_json::from_str(&content)?)
    }
}
