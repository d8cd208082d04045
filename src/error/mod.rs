/// Centralized error handling for mlpipe
pub mod mlpipe;
pub mod pipeline;

pub use mlpipe::{MlpipeError, Result};
pub use pipeline::{PipelineError, PipelineResult};
