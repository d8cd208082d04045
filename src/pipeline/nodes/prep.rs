//! Dataset producer step.

use async_trait::async_trait;
use rand::Rng;
use std::path::Path;
use tracing::info;

use crate::config::constants::{N_FEATURES, N_ROWS};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::pipeline::{Artifact, ArtifactType, DATASET, PipeMap, PipeNode, Port, WORK_DIR};

pub const NAME: &str = "prep";

pub const DATA_OUT: Port = Port::artifact("data_out", DATASET, ArtifactType::Dataset);

/// Synthesize the fixed-shape dataset into `data_out`
pub fn prep(data_out: &Path) -> Result<Dataset> {
    prep_with_rng(data_out, &mut rand::thread_rng())
}

pub fn prep_with_rng<R: Rng + ?Sized>(data_out: &Path, rng: &mut R) -> Result<Dataset> {
    let dataset = Dataset::synthesize(rng, N_ROWS, N_FEATURES);
    dataset.write_to(data_out)?;
    info!(
        "Generated {} rows x {} features into {:?}",
        dataset.len(),
        dataset.n_features(),
        data_out
    );
    Ok(dataset)
}

pub struct PrepNode;

#[async_trait]
impl PipeNode for PrepNode {
    fn name(&self) -> String {
        NAME.to_string()
    }

    fn inputs(&self) -> Vec<Port> {
        vec![]
    }

    fn outputs(&self) -> Vec<Port> {
        vec![DATA_OUT]
    }

    async fn process(&self, mut data: PipeMap) -> Result<PipeMap> {
        let work_dir = data.require(WORK_DIR)?;
        let data_out = Artifact::output_of(ArtifactType::Dataset, work_dir, NAME, DATA_OUT.name);

        prep(data_out.path())?;

        data.insert_typed(DATASET, data_out);
        Ok(data)
    }
}
