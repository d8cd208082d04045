pub mod assembler;
pub mod cli;
pub mod commands;
pub mod compiler;
pub mod config;
pub mod dataset;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod pipeline;

pub use assembler::{PipelineParams, assemble};
pub use compiler::{Compiler, PipelineSpec};
pub use error::{MlpipeError, Result};
