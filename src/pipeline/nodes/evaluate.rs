//! Evaluator step.

use async_trait::async_trait;
use std::path::Path;

use crate::config::constants::F1_METRIC;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::metrics::{Metrics, f1_score};
use crate::model::RandomForestClassifier;
use crate::pipeline::{
    Artifact, ArtifactType, DATASET, F1, METRICS, MODEL, PipeMap, PipeNode, Port, WORK_DIR,
};

pub const NAME: &str = "evaluate";

pub const MODEL_IN: Port = Port::artifact("model_in", MODEL, ArtifactType::Model);
pub const DATA_IN: Port = Port::artifact("data_in", DATASET, ArtifactType::Dataset);
pub const METRICS_OUT: Port = Port::artifact("metrics_out", METRICS, ArtifactType::Metrics);

/// Score the model on the dataset it was trained on and log F1 to `metrics_out`.
/// Neither input directory is modified.
pub fn evaluate(model_in: &Path, data_in: &Path, metrics_out: &Path) -> Result<f64> {
    let dataset = Dataset::read_from(data_in)?;
    let forest = RandomForestClassifier::load(model_in)?;
    let pred = forest.predict(&dataset.features)?;
    let f1 = f1_score(&dataset.labels, &pred)?;

    let mut metrics = Metrics::new();
    metrics.log_metric(F1_METRIC, f1);
    metrics.write_to(metrics_out)?;
    Ok(f1)
}

pub struct EvaluateNode;

#[async_trait]
impl PipeNode for EvaluateNode {
    fn name(&self) -> String {
        NAME.to_string()
    }

    fn inputs(&self) -> Vec<Port> {
        vec![MODEL_IN, DATA_IN]
    }

    fn outputs(&self) -> Vec<Port> {
        vec![METRICS_OUT]
    }

    async fn process(&self, mut data: PipeMap) -> Result<PipeMap> {
        let model_in = data.require(MODEL)?;
        let data_in = data.require(DATASET)?;
        let work_dir = data.require(WORK_DIR)?;
        let metrics_out =
            Artifact::output_of(ArtifactType::Metrics, work_dir, NAME, METRICS_OUT.name);

        let f1 = evaluate(model_in.path(), data_in.path(), metrics_out.path())?;

        data.insert_typed(METRICS, metrics_out);
        data.insert_typed(F1, f1);
        Ok(data)
    }
}
