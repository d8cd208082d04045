/// Pipeline framework error types
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Missing required input '{required}' for node '{node}'")]
    MissingInput { node: String, required: String },

    #[error("Missing required output '{required}' for node '{node}'")]
    MissingOutput { node: String, required: String },

    #[error("Pipeline configuration error: {message}")]
    ConfigError { message: String },

    #[error("Node '{node}' failed: {source}")]
    NodeError {
        node: String,
        #[source]
        source: Box<crate::error::MlpipeError>,
    },
}

impl PipelineError {
    /// Create a new ConfigError
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Wrap a step failure with the name of the node that raised it
    pub fn node(node: impl Into<String>, source: crate::error::MlpipeError) -> Self {
        Self::NodeError {
            node: node.into(),
            source: Box::new(source),
        }
    }
}

/// Result type alias for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
