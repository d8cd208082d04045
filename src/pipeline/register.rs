// Node registration for the pipeline steps
use super::nodes::{EvaluateNode, PrepNode, TrainNode, evaluate, prep, train};
use super::registry::NodeRegistry;

/// Register all pipeline steps under their task names
pub fn register_nodes(registry: &mut NodeRegistry) {
    registry.register(prep::NAME, || Box::new(PrepNode));
    registry.register(train::NAME, || Box::new(TrainNode));
    registry.register(evaluate::NAME, || Box::new(EvaluateNode));
}
