//! Bagged ensemble of CART trees.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

use super::tree::{DecisionTree, TreeParams};
use crate::config::constants::MODEL_FILE;
use crate::error::{MlpipeError, Result};

/// Random forest for binary labels (0/1).
///
/// Each tree is grown on a bootstrap sample with `sqrt(n_features)` candidate
/// features per split. Predictions average the per-tree positive-class
/// probabilities and pick class 1 only when that average exceeds 0.5.
/// Training is fully determined by `seed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForestClassifier {
    n_estimators: usize,
    seed: u64,
    n_features: usize,
    trees: Vec<DecisionTree>,
}

impl RandomForestClassifier {
    /// Create an unfitted forest. `n_estimators` must be positive.
    pub fn new(n_estimators: i64, seed: i64) -> Result<Self> {
        let n_estimators = usize::try_from(n_estimators)
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                MlpipeError::invalid_config(format!(
                    "n_estimators must be positive, got {}",
                    n_estimators
                ))
            })?;

        Ok(Self {
            n_estimators,
            // Any integer is a valid seed; negative ones wrap.
            seed: seed as u64,
            n_features: 0,
            trees: Vec::new(),
        })
    }

    pub fn n_estimators(&self) -> usize {
        self.n_estimators
    }

    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }

    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    pub fn fit(mut self, x: &[Vec<f64>], y: &[u8]) -> Result<Self> {
        if x.is_empty() {
            return Err(MlpipeError::model("cannot fit on an empty feature matrix"));
        }
        if x.len() != y.len() {
            return Err(MlpipeError::model(format!(
                "feature matrix has {} rows but label vector has {}",
                x.len(),
                y.len()
            )));
        }
        let n_features = x[0].len();
        if n_features == 0 || x.iter().any(|row| row.len() != n_features) {
            return Err(MlpipeError::model("feature rows must share a non-zero width"));
        }
        if let Some(label) = y.iter().find(|label| **label > 1) {
            return Err(MlpipeError::model(format!("label {} is not binary", label)));
        }

        let params = TreeParams {
            max_features: ((n_features as f64).sqrt() as usize).max(1),
            min_samples_split: 2,
            max_depth: None,
        };
        debug!(
            "Fitting {} trees on {} rows, {} features, max_features {}",
            self.n_estimators,
            x.len(),
            n_features,
            params.max_features
        );

        let mut master = StdRng::seed_from_u64(self.seed);
        let n_rows = x.len();
        self.trees = (0..self.n_estimators)
            .map(|_| {
                let mut rng = StdRng::seed_from_u64(master.next_u64());
                let samples = (0..n_rows).map(|_| rng.gen_range(0..n_rows)).collect();
                DecisionTree::fit(x, y, samples, params, &mut rng)
            })
            .collect();
        self.n_features = n_features;

        info!(
            "Fitted random forest: {} trees, {} nodes total",
            self.trees.len(),
            self.trees.iter().map(DecisionTree::node_count).sum::<usize>()
        );
        Ok(self)
    }

    /// Mean positive-class probability across trees, per row
    pub fn predict_proba(&self, x: &[Vec<f64>]) -> Result<Vec<f64>> {
        if !self.is_fitted() {
            return Err(MlpipeError::model("model has not been fitted"));
        }
        if let Some(row) = x.iter().find(|row| row.len() != self.n_features) {
            return Err(MlpipeError::model(format!(
                "expected {} features per row, got {}",
                self.n_features,
                row.len()
            )));
        }

        let n_trees = self.trees.len() as f64;
        Ok(x.iter()
            .map(|row| {
                self.trees
                    .iter()
                    .map(|tree| tree.predict_proba(row))
                    .sum::<f64>()
                    / n_trees
            })
            .collect())
    }

    pub fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<u8>> {
        Ok(self
            .predict_proba(x)?
            .into_iter()
            .map(|p| u8::from(p > 0.5))
            .collect())
    }

    /// Persist the fitted forest as `rf.json` inside `dir`
    pub fn save(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(MODEL_FILE);
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        debug!("Saved model to {:?}", path);
        Ok(())
    }

    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(MODEL_FILE);
        let file = BufReader::new(File::open(&path)?);
        let model: Self = serde_json::from_reader(file)?;
        if !model.is_fitted() || !model.trees.iter().all(|t| t.is_well_formed(model.n_features)) {
            return Err(MlpipeError::model(format!(
                "{:?} does not hold a fitted forest",
                path
            )));
        }
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    fn sample_data(seed: u64, rows: usize) -> Dataset {
        let mut rng = StdRng::seed_from_u64(seed);
        Dataset::synthesize(&mut rng, rows, 8)
    }

    #[test]
    fn test_rejects_non_positive_estimators() {
        assert!(RandomForestClassifier::new(0, 42).is_err());
        assert!(RandomForestClassifier::new(-3, 42).is_err());
        assert!(RandomForestClassifier::new(1, -1).is_ok());
    }

    #[test]
    fn test_fit_predict_on_training_data() {
        let data = sample_data(1, 300);
        let forest = RandomForestClassifier::new(25, 42)
            .unwrap()
            .fit(&data.features, &data.labels)
            .unwrap();

        assert_eq!(forest.trees().len(), 25);
        let pred = forest.predict(&data.features).unwrap();
        let correct = pred.iter().zip(&data.labels).filter(|(p, y)| p == y).count();
        assert!(correct as f64 / data.len() as f64 > 0.95);
    }

    #[test]
    fn test_same_seed_same_forest() {
        let data = sample_data(2, 200);
        let a = RandomForestClassifier::new(10, 7)
            .unwrap()
            .fit(&data.features, &data.labels)
            .unwrap();
        let b = RandomForestClassifier::new(10, 7)
            .unwrap()
            .fit(&data.features, &data.labels)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fit_rejects_mismatched_rows() {
        let data = sample_data(3, 10);
        let err = RandomForestClassifier::new(2, 0)
            .unwrap()
            .fit(&data.features, &data.labels[..9])
            .unwrap_err();
        assert!(matches!(err, MlpipeError::Model(_)));
    }

    #[test]
    fn test_predict_requires_fit_and_width() {
        let forest = RandomForestClassifier::new(2, 0).unwrap();
        assert!(forest.predict(&[vec![0.0; 8]]).is_err());

        let data = sample_data(4, 50);
        let forest = forest.fit(&data.features, &data.labels).unwrap();
        assert!(forest.predict(&[vec![0.0; 3]]).is_err());
    }

    #[test]
    fn test_fit_on_extreme_feature_values() {
        let x = vec![vec![-1.5e308], vec![-1.4e308], vec![1.5e308]];
        let y = vec![0, 0, 1];
        let forest = RandomForestClassifier::new(4, 0)
            .unwrap()
            .fit(&x, &y)
            .unwrap();

        assert!(forest.trees().iter().all(|t| t.is_well_formed(1)));
        assert_eq!(forest.predict_proba(&x).unwrap().len(), 3);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let data = sample_data(5, 100);
        let forest = RandomForestClassifier::new(5, 42)
            .unwrap()
            .fit(&data.features, &data.labels)
            .unwrap();

        forest.save(&dir.path().join("model")).unwrap();
        let loaded = RandomForestClassifier::load(&dir.path().join("model")).unwrap();
        assert_eq!(
            loaded.predict(&data.features).unwrap(),
            forest.predict(&data.features).unwrap()
        );
    }

    #[test]
    fn test_load_rejects_unfitted() {
        let dir = tempfile::tempdir().unwrap();
        RandomForestClassifier::new(3, 1)
            .unwrap()
            .save(dir.path())
            .unwrap();
        assert!(RandomForestClassifier::load(dir.path()).is_err());
    }
}
