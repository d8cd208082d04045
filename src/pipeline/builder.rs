// Pipeline builder for fluent pipeline construction
use super::artifact::Port;
use super::core::Pipeline;
use super::registry::NodeRegistry;
use crate::error::{PipelineError, PipelineResult};
use std::sync::Arc;

/// Builder for constructing pipelines with registered nodes
pub struct PipelineBuilder {
    name: String,
    registry: Arc<NodeRegistry>,
    node_names: Vec<String>,
    parameters: Vec<Port>,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new(name: impl Into<String>, registry: Arc<NodeRegistry>) -> Self {
        Self {
            name: name.into(),
            registry,
            node_names: Vec::new(),
            parameters: Vec::new(),
        }
    }

    /// Set pipeline parameters
    pub fn with_parameters(mut self, parameters: Vec<Port>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Add a node by name
    pub fn add_node(mut self, name: impl Into<String>) -> PipelineResult<Self> {
        let node_name = name.into();
        if !self.registry.contains(&node_name) {
            return Err(PipelineError::config(format!(
                "Node '{}' not found in registry",
                node_name
            )));
        }
        self.node_names.push(node_name);
        Ok(self)
    }

    /// Add multiple nodes by names
    pub fn add_nodes<I, S>(mut self, names: I) -> PipelineResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self = self.add_node(name)?;
        }
        Ok(self)
    }

    /// Build the pipeline, checking that every node's inputs are wired
    pub fn build(self) -> PipelineResult<Pipeline> {
        let mut pipeline = Pipeline::new(self.name).with_parameters(self.parameters);

        for name in &self.node_names {
            let node = self
                .registry
                .create(name)
                .ok_or_else(|| PipelineError::config(format!("Node '{}' not found", name)))?;
            pipeline = pipeline.add_node(node)?;
        }

        Ok(pipeline)
    }
}
