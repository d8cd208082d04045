//! Artifacts and ports: what flows between pipeline steps.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::keys::TypedKey;

/// Kind of a directory-backed artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArtifactType {
    Dataset,
    Model,
    Metrics,
}

impl ArtifactType {
    /// Schema title recorded in the compiled graph
    pub fn schema_title(&self) -> &'static str {
        match self {
            Self::Dataset => "system.Dataset",
            Self::Model => "system.Model",
            Self::Metrics => "system.Metrics",
        }
    }

    pub fn schema_version(&self) -> &'static str {
        "0.0.1"
    }
}

/// A named handle to a directory holding one step's output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactType,
    pub path: PathBuf,
}

impl Artifact {
    pub fn new(kind: ArtifactType, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }

    /// Location a local run assigns to `task`'s output `port`
    pub fn output_of(kind: ArtifactType, root: &Path, task: &str, port: &str) -> Self {
        Self::new(kind, root.join(task).join(port))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Value type carried by a port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortType {
    Artifact(ArtifactType),
    Integer { default: Option<i64> },
}

/// A named input or output of a step, bound to a PipeMap channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Port {
    /// Name of the port on the step, e.g. `data_in`
    pub name: &'static str,
    /// PipeMap key the port reads from or writes to
    pub channel: &'static str,
    pub ty: PortType,
}

impl Port {
    pub const fn artifact(name: &'static str, key: TypedKey<Artifact>, kind: ArtifactType) -> Self {
        Self {
            name,
            channel: key.name(),
            ty: PortType::Artifact(kind),
        }
    }

    pub const fn integer(name: &'static str, key: TypedKey<i64>, default: Option<i64>) -> Self {
        Self {
            name,
            channel: key.name(),
            ty: PortType::Integer { default },
        }
    }
}
