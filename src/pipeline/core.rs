// Pipeline core - step declaration, wiring and local execution

use super::artifact::Port;
use super::keys::TypedKey;
use crate::error::{PipelineError, PipelineResult, Result};
use async_trait::async_trait;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Pipeline data map for passing data between nodes
#[derive(Clone)]
pub struct PipeMap {
    data: HashMap<String, Arc<dyn Any + Send + Sync>>,
}

impl PipeMap {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    /// Insert a value with a typed key (compile-time type checking)
    pub fn insert_typed<T: Any + Send + Sync>(&mut self, key: TypedKey<T>, value: T) {
        self.data.insert(key.name().to_string(), Arc::new(value));
    }

    /// Get a value with a typed key (compile-time type checking)
    pub fn get_typed<T: Any + Send + Sync>(&self, key: TypedKey<T>) -> Option<&T> {
        self.data
            .get(key.name())
            .and_then(|v| v.downcast_ref::<T>())
    }

    /// Get a value or fail with a missing input error
    pub fn require<T: Any + Send + Sync>(&self, key: TypedKey<T>) -> Result<&T> {
        self.get_typed(key)
            .ok_or_else(|| crate::error::MlpipeError::missing_input(key.name()))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }
}

// Values are type-erased; only the channel names are shown
impl fmt::Debug for PipeMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.data.keys().collect();
        keys.sort();
        f.debug_set().entries(keys).finish()
    }
}

impl Default for PipeMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Pipeline node trait
#[async_trait]
pub trait PipeNode: Send + Sync {
    /// Task name, unique within a pipeline
    fn name(&self) -> String;

    fn inputs(&self) -> Vec<Port>;

    fn outputs(&self) -> Vec<Port>;

    async fn process(&self, data: PipeMap) -> Result<PipeMap>;

    fn input(&self) -> Vec<String> {
        self.inputs().iter().map(|p| p.channel.to_string()).collect()
    }

    fn output(&self) -> Vec<String> {
        self.outputs().iter().map(|p| p.channel.to_string()).collect()
    }

    fn validate_input(&self, data: &PipeMap) -> PipelineResult<()> {
        for input in self.input() {
            if !data.contains_key(&input) {
                return Err(PipelineError::MissingInput {
                    node: self.name(),
                    required: input,
                });
            }
        }
        Ok(())
    }

    fn validate_output(&self, data: &PipeMap) -> PipelineResult<()> {
        for output in self.output() {
            if !data.contains_key(&output) {
                return Err(PipelineError::MissingOutput {
                    node: self.name(),
                    required: output,
                });
            }
        }
        Ok(())
    }
}

/// Where a node input comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Output port of an earlier task
    Task { task: String, output: &'static str },
    /// Pipeline-level parameter
    Parameter(&'static str),
}

/// A node input resolved against the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub input: Port,
    pub source: Source,
}

/// Data dependency of one task on the tasks feeding it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: Vec<String>,
    pub to: String,
}

/// Pipeline - declares and orchestrates nodes
pub struct Pipeline {
    name: String,
    nodes: Vec<Box<dyn PipeNode>>,
    parameters: Vec<Port>,
}

impl Pipeline {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
            parameters: Vec::new(),
        }
    }

    /// Set the pipeline parameters, provided via the initial PipeMap
    pub fn with_parameters(mut self, parameters: Vec<Port>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn parameters(&self) -> &[Port] {
        &self.parameters
    }

    pub fn nodes(&self) -> &[Box<dyn PipeNode>] {
        &self.nodes
    }

    pub fn add_node(mut self, node: Box<dyn PipeNode>) -> PipelineResult<Self> {
        let name = node.name();
        if self.nodes.iter().any(|n| n.name() == name) {
            return Err(PipelineError::config(format!(
                "Node '{}' is already part of pipeline '{}'",
                name, self.name
            )));
        }

        let mut available_sources: Vec<String> = self
            .parameters
            .iter()
            .map(|p| p.channel.to_string())
            .collect();
        for existing_node in &self.nodes {
            available_sources.extend(existing_node.output());
        }

        let missing_inputs: Vec<String> = node
            .input()
            .into_iter()
            .filter(|input| !available_sources.contains(input))
            .collect();

        if !missing_inputs.is_empty() {
            return Err(PipelineError::config(format!(
                "Node '{}' requires inputs {:?} that are not available.\n\
                 Available sources (previous node outputs + parameters): {:?}",
                name, missing_inputs, available_sources
            )));
        }

        debug!(
            "Adding node '{}' to pipeline '{}'. Inputs: {:?}, Available sources: {:?}",
            name,
            self.name,
            node.input(),
            available_sources
        );

        self.nodes.push(node);
        Ok(self)
    }

    /// Resolve each input of the node at `index` to the task or parameter feeding it.
    /// The latest earlier producer of a channel wins over a parameter of the same name.
    pub fn bindings(&self, index: usize) -> Vec<Binding> {
        let Some(node) = self.nodes.get(index) else {
            return Vec::new();
        };

        node.inputs()
            .into_iter()
            .filter_map(|input| {
                let producer = self.nodes[..index].iter().rev().find_map(|earlier| {
                    earlier
                        .outputs()
                        .into_iter()
                        .find(|out| out.channel == input.channel)
                        .map(|out| Source::Task {
                            task: earlier.name(),
                            output: out.name,
                        })
                });
                let source = producer.or_else(|| {
                    self.parameters
                        .iter()
                        .find(|p| p.channel == input.channel)
                        .map(|p| Source::Parameter(p.name))
                })?;
                Some(Binding { input, source })
            })
            .collect()
    }

    /// Tasks the node at `index` must wait for, in first-use order
    pub fn dependencies(&self, index: usize) -> Vec<String> {
        let mut tasks: Vec<String> = Vec::new();
        for binding in self.bindings(index) {
            if let Source::Task { task, .. } = binding.source {
                if !tasks.contains(&task) {
                    tasks.push(task);
                }
            }
        }
        tasks
    }

    /// One edge per task that consumes another task's output
    pub fn edges(&self) -> Vec<Edge> {
        (0..self.nodes.len())
            .filter_map(|index| {
                let from = self.dependencies(index);
                (!from.is_empty()).then(|| Edge {
                    from,
                    to: self.nodes[index].name(),
                })
            })
            .collect()
    }

    pub async fn execute(&self, mut data: PipeMap) -> PipelineResult<PipeMap> {
        debug!(
            "Executing pipeline '{}' with {} nodes",
            self.name,
            self.nodes.len()
        );

        for (index, node) in self.nodes.iter().enumerate() {
            debug!("Processing node {}: '{}'", index + 1, node.name());

            node.validate_input(&data)?;

            data = node
                .process(data)
                .await
                .map_err(|e| PipelineError::node(node.name(), e))?;

            node.validate_output(&data)?;

            debug!("Node '{}' processed successfully", node.name());
        }

        debug!("Pipeline '{}' executed successfully", self.name);
        Ok(data)
    }
}
