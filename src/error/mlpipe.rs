/// Unified error type for mlpipe
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MlpipeError {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Dataset files
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // Parsing errors
    #[error("Parse error: {0}")]
    Parse(String),

    // Model fitting / prediction errors
    #[error("Model error: {0}")]
    Model(String),

    // Pipeline errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] crate::error::PipelineError),

    // Configuration errors
    #[error("Missing required input: {0}")]
    MissingInput(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias using MlpipeError
pub type Result<T> = std::result::Result<T, MlpipeError>;

impl MlpipeError {
    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a model error
    pub fn model(msg: impl Into<String>) -> Self {
        Self::Model(msg.into())
    }

    /// Create a missing input error
    pub fn missing_input(name: impl Into<String>) -> Self {
        Self::MissingInput(name.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for MlpipeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
