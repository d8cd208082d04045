//! Synthetic tabular dataset and its on-disk CSV layout.
//!
//! A dataset directory holds two files: `X.csv` with one header row of
//! column indices followed by one row per sample, and `y.csv` with the
//! header `0` followed by one 0/1 label per sample.

use csv::{ReaderBuilder, WriterBuilder};
use rand::Rng;
use std::path::Path;
use tracing::debug;

use crate::config::constants::{FEATURES_FILE, LABEL_THRESHOLD, LABELS_FILE};
use crate::error::{MlpipeError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub features: Vec<Vec<f64>>,
    pub labels: Vec<u8>,
}

impl Dataset {
    /// Draw `n_rows × n_features` uniform values in `[0, 1)` and label each
    /// row 1 when its sum exceeds the threshold.
    pub fn synthesize<R: Rng + ?Sized>(rng: &mut R, n_rows: usize, n_features: usize) -> Self {
        let features: Vec<Vec<f64>> = (0..n_rows)
            .map(|_| (0..n_features).map(|_| rng.gen_range(0.0..1.0)).collect())
            .collect();
        let labels = features
            .iter()
            .map(|row| u8::from(row.iter().sum::<f64>() > LABEL_THRESHOLD))
            .collect();

        Self { features, labels }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn n_features(&self) -> usize {
        self.features.first().map_or(0, Vec::len)
    }

    /// Write `X.csv` and `y.csv` into `dir`, creating it if needed
    pub fn write_to(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;

        let mut x = WriterBuilder::new().from_path(dir.join(FEATURES_FILE))?;
        x.write_record((0..self.n_features()).map(|i| i.to_string()))?;
        for row in &self.features {
            x.write_record(row.iter().map(|v| v.to_string()))?;
        }
        x.flush()?;

        let mut y = WriterBuilder::new().from_path(dir.join(LABELS_FILE))?;
        y.write_record(["0"])?;
        for label in &self.labels {
            y.write_record([label.to_string()])?;
        }
        y.flush()?;

        debug!(
            "Wrote dataset with {} rows and {} columns to {:?}",
            self.len(),
            self.n_features(),
            dir
        );
        Ok(())
    }

    /// Read a dataset previously written by [`Dataset::write_to`]
    pub fn read_from(dir: &Path) -> Result<Self> {
        let mut x = ReaderBuilder::new().from_path(dir.join(FEATURES_FILE))?;
        let mut features = Vec::new();
        for record in x.records() {
            let record = record?;
            let row = record
                .iter()
                .map(|field| parse_value(field, FEATURES_FILE))
                .collect::<Result<Vec<f64>>>()?;
            features.push(row);
        }

        let mut y = ReaderBuilder::new().from_path(dir.join(LABELS_FILE))?;
        let mut labels = Vec::new();
        for record in y.records() {
            let record = record?;
            let field = record
                .get(0)
                .ok_or_else(|| MlpipeError::parse(format!("empty row in {}", LABELS_FILE)))?;
            labels.push(parse_label(field)?);
        }

        debug!("Read dataset with {} rows from {:?}", features.len(), dir);
        Ok(Self { features, labels })
    }
}

fn parse_value(field: &str, file: &str) -> Result<f64> {
    field
        .trim()
        .parse::<f64>()
        .map_err(|e| MlpipeError::parse(format!("invalid number '{}' in {}: {}", field, file, e)))
}

fn parse_label(field: &str) -> Result<u8> {
    let value = parse_value(field, LABELS_FILE)?;
    if value == 0.0 {
        Ok(0)
    } else if value == 1.0 {
        Ok(1)
    } else {
        Err(MlpipeError::parse(format!(
            "label '{}' in {} is not binary",
            field, LABELS_FILE
        )))
    }
}
