use std::path::Path;
use tracing::info;

use crate::assembler::{PipelineParams, assemble};
use crate::cli::Commands;
use crate::compiler::{Compiler, PipelineSpec};
use crate::error::Result;
use crate::pipeline::nodes::{evaluate, prep, train};

/// Assemble the pipeline and write its graph to `package_path`
pub fn compile_command(params: &PipelineParams, package_path: &Path) -> Result<PipelineSpec> {
    let pipeline = assemble(params)?;
    let spec = Compiler::new(params.image.clone()).compile(&pipeline, package_path)?;
    println!("Wrote {}", package_path.display());
    Ok(spec)
}

/// Run the single step a compiled executor asks for
pub fn step_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Prep { data_out } => {
            prep(&data_out)?;
        }
        Commands::Train {
            data_in,
            n_estimators,
            seed,
            model_out,
        } => {
            train(&data_in, &model_out, n_estimators, seed)?;
        }
        Commands::Evaluate {
            model_in,
            data_in,
            metrics_out,
        } => {
            let f1 = evaluate(&model_in, &data_in, &metrics_out)?;
            info!("Evaluation finished, f1 = {:.4}", f1);
        }
    }
    Ok(())
}
