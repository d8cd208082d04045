//! Turns a declared [`Pipeline`] into a static graph document.

pub mod spec;

use indexmap::IndexMap;
use std::path::Path;
use tracing::{debug, info};

use crate::config::constants::{EXECUTOR_COMMAND, SCHEMA_VERSION, SDK_VERSION};
use crate::error::Result;
use crate::pipeline::{PipeNode, Pipeline, Port, PortType, Source};

pub use spec::*;

/// Pipeline compiler
pub struct Compiler {
    image: String,
}

impl Compiler {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
        }
    }

    /// Build the graph document for `pipeline`
    pub fn to_spec(&self, pipeline: &Pipeline) -> PipelineSpec {
        let mut tasks = IndexMap::new();
        let mut components = IndexMap::new();
        let mut executors = IndexMap::new();

        for (index, node) in pipeline.nodes().iter().enumerate() {
            let task = node.name();
            let component = format!("comp-{}", task);
            let executor = format!("exec-{}", task);

            let mut inputs = TaskInputs::default();
            for binding in pipeline.bindings(index) {
                match binding.source {
                    Source::Task { task, output } => {
                        inputs.artifacts.insert(
                            binding.input.name.to_string(),
                            ArtifactInput {
                                task_output_artifact: TaskOutputArtifact {
                                    producer_task: task,
                                    output_artifact_key: output.to_string(),
                                },
                            },
                        );
                    }
                    Source::Parameter(parameter) => {
                        inputs.parameters.insert(
                            binding.input.name.to_string(),
                            ParameterInput {
                                component_input_parameter: parameter.to_string(),
                            },
                        );
                    }
                }
            }

            tasks.insert(
                task.clone(),
                TaskSpec {
                    task_info: TaskInfo { name: task.clone() },
                    component_ref: ComponentRef {
                        name: component.clone(),
                    },
                    dependent_tasks: pipeline.dependencies(index),
                    inputs,
                },
            );

            components.insert(
                component,
                ComponentSpec {
                    executor_label: executor.clone(),
                    input_definitions: definitions(&node.inputs()),
                    output_definitions: definitions(&node.outputs()),
                },
            );

            executors.insert(
                executor,
                ExecutorSpec {
                    container: ContainerSpec {
                        image: self.image.clone(),
                        command: vec![EXECUTOR_COMMAND.to_string()],
                        args: executor_args(node.as_ref()),
                    },
                },
            );
        }

        PipelineSpec {
            pipeline_info: PipelineInfo {
                name: pipeline.name().to_string(),
            },
            schema_version: SCHEMA_VERSION.to_string(),
            sdk_version: SDK_VERSION.to_string(),
            root: RootSpec {
                input_definitions: definitions(pipeline.parameters()),
                dag: Dag { tasks },
            },
            components,
            deployment_spec: DeploymentSpec { executors },
        }
    }

    /// Write the graph document to `package_path`, replacing any existing file
    pub fn compile(&self, pipeline: &Pipeline, package_path: &Path) -> Result<PipelineSpec> {
        let spec = self.to_spec(pipeline);
        debug!(
            "Compiled pipeline '{}': {} tasks, {} edges",
            pipeline.name(),
            spec.root.dag.tasks.len(),
            spec.root.dag.edges().len()
        );

        if let Some(parent) = package_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(package_path, serde_json::to_string_pretty(&spec)?)?;

        info!("Compiled pipeline '{}' to {:?}", pipeline.name(), package_path);
        Ok(spec)
    }
}

fn definitions(ports: &[Port]) -> Definitions {
    let mut defs = Definitions::default();
    for port in ports {
        match port.ty {
            PortType::Artifact(kind) => {
                defs.artifacts.insert(
                    port.name.to_string(),
                    ArtifactSpec {
                        artifact_type: ArtifactTypeSchema {
                            schema_title: kind.schema_title().to_string(),
                            schema_version: kind.schema_version().to_string(),
                        },
                    },
                );
            }
            PortType::Integer { default } => {
                defs.parameters.insert(
                    port.name.to_string(),
                    ParameterSpec {
                        parameter_type: "NUMBER_INTEGER".to_string(),
                        default_value: default,
                        is_optional: default.is_some(),
                    },
                );
            }
        }
    }
    defs
}

/// Step subcommand followed by one `--flag placeholder` pair per port
fn executor_args(node: &dyn PipeNode) -> Vec<String> {
    let mut args = vec![node.name()];
    for port in node.inputs() {
        args.push(flag(&port));
        args.push(match port.ty {
            PortType::Artifact(_) => format!("{{{{$.inputs.artifacts['{}'].path}}}}", port.name),
            PortType::Integer { .. } => format!("{{{{$.inputs.parameters['{}']}}}}", port.name),
        });
    }
    for port in node.outputs() {
        args.push(flag(&port));
        args.push(format!("{{{{$.outputs.artifacts['{}'].path}}}}", port.name));
    }
    args
}

fn flag(port: &Port) -> String {
    format!("--{}", port.name.replace('_', "-"))
}
