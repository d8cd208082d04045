// Step registry: task name -> factory, kept in run order
use super::core::PipeNode;
use indexmap::IndexMap;

pub type NodeFactory = Box<dyn Fn() -> Box<dyn PipeNode> + Send + Sync>;

/// Pipeline steps by task name.
///
/// Registration order is the order the steps run in, so a registry filled by
/// [`register_nodes`](super::register_nodes) doubles as the chain definition.
#[derive(Default)]
pub struct NodeRegistry {
    steps: IndexMap<String, NodeFactory>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a step. Re-registering a name swaps the factory in place.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn PipeNode> + Send + Sync + 'static,
    {
        self.steps.insert(name.into(), Box::new(factory));
    }

    pub fn create(&self, name: &str) -> Option<Box<dyn PipeNode>> {
        self.steps.get(name).map(|factory| factory())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.steps.contains_key(name)
    }

    /// Task names in run order
    pub fn steps(&self) -> Vec<String> {
        self.steps.keys().cloned().collect()
    }
}
