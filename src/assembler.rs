//! The `prep → train → evaluate` pipeline definition.

use std::path::Path;
use std::sync::Arc;

use crate::config::constants::{BASE_IMAGE, DEFAULT_N_ESTIMATORS, DEFAULT_SEED, PIPELINE_NAME};
use crate::error::PipelineResult;
use crate::pipeline::{
    N_ESTIMATORS, NodeRegistry, PipeMap, Pipeline, PipelineBuilder, Port, SEED, WORK_DIR,
    register_nodes,
};

/// Values that vary between deployments of the same pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineParams {
    pub name: String,
    /// Default ensemble size recorded for the pipeline
    pub n_estimators: i64,
    /// Default training seed recorded for the pipeline
    pub seed: i64,
    /// Container image the executors run in
    pub image: String,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            name: PIPELINE_NAME.to_string(),
            n_estimators: DEFAULT_N_ESTIMATORS,
            seed: DEFAULT_SEED,
            image: BASE_IMAGE.to_string(),
        }
    }
}

impl PipelineParams {
    /// Pipeline-level parameters; they only feed the trainer
    pub fn parameters(&self) -> Vec<Port> {
        vec![
            Port::integer("n_estimators", N_ESTIMATORS, Some(self.n_estimators)),
            Port::integer("seed", SEED, Some(self.seed)),
        ]
    }

    /// Initial data for a local run rooted at `work_dir`
    pub fn initial_data(&self, work_dir: &Path) -> PipeMap {
        let mut data = PipeMap::new();
        data.insert_typed(N_ESTIMATORS, self.n_estimators);
        data.insert_typed(SEED, self.seed);
        data.insert_typed(WORK_DIR, work_dir.to_path_buf());
        data
    }
}

/// Declare the fixed three-step chain, in the order the steps are registered
pub fn assemble(params: &PipelineParams) -> PipelineResult<Pipeline> {
    let mut registry = NodeRegistry::new();
    register_nodes(&mut registry);
    let steps = registry.steps();

    PipelineBuilder::new(params.name.clone(), Arc::new(registry))
        .with_parameters(params.parameters())
        .add_nodes(steps)?
        .build()
}
