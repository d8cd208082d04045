//! Model trainer step.

use async_trait::async_trait;
use std::path::Path;
use tracing::info;

use crate::config::constants::{DEFAULT_N_ESTIMATORS, DEFAULT_SEED};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::model::RandomForestClassifier;
use crate::pipeline::{
    Artifact, ArtifactType, DATASET, MODEL, N_ESTIMATORS, PipeMap, PipeNode, Port, SEED, WORK_DIR,
};

pub const NAME: &str = "train";

pub const DATA_IN: Port = Port::artifact("data_in", DATASET, ArtifactType::Dataset);
pub const N_ESTIMATORS_IN: Port =
    Port::integer("n_estimators", N_ESTIMATORS, Some(DEFAULT_N_ESTIMATORS));
pub const SEED_IN: Port = Port::integer("seed", SEED, Some(DEFAULT_SEED));
pub const MODEL_OUT: Port = Port::artifact("model_out", MODEL, ArtifactType::Model);

/// Fit a forest on the dataset in `data_in` and persist it to `model_out`
pub fn train(
    data_in: &Path,
    model_out: &Path,
    n_estimators: i64,
    seed: i64,
) -> Result<RandomForestClassifier> {
    let dataset = Dataset::read_from(data_in)?;
    let forest =
        RandomForestClassifier::new(n_estimators, seed)?.fit(&dataset.features, &dataset.labels)?;
    forest.save(model_out)?;
    info!(
        "Trained {} trees (seed {}) into {:?}",
        forest.n_estimators(),
        seed,
        model_out
    );
    Ok(forest)
}

pub struct TrainNode;

#[async_trait]
impl PipeNode for TrainNode {
    fn name(&self) -> String {
        NAME.to_string()
    }

    fn inputs(&self) -> Vec<Port> {
        vec![DATA_IN, N_ESTIMATORS_IN, SEED_IN]
    }

    fn outputs(&self) -> Vec<Port> {
        vec![MODEL_OUT]
    }

    async fn process(&self, mut data: PipeMap) -> Result<PipeMap> {
        let data_in = data.require(DATASET)?;
        let n_estimators = *data.require(N_ESTIMATORS)?;
        let seed = *data.require(SEED)?;
        let work_dir = data.require(WORK_DIR)?;
        let model_out = Artifact::output_of(ArtifactType::Model, work_dir, NAME, MODEL_OUT.name);

        train(data_in.path(), model_out.path(), n_estimators, seed)?;

        data.insert_typed(MODEL, model_out);
        Ok(data)
    }
}
