use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::constants::{DEFAULT_N_ESTIMATORS, DEFAULT_SEED, PACKAGE_PATH};

/// Step executors invoked by the compiled graph, one step per call
#[derive(Subcommand)]
pub enum Commands {
    /// Synthesize the dataset
    Prep {
        /// Output dataset directory
        #[clap(long)]
        data_out: PathBuf,
    },

    /// Train the random forest
    Train {
        /// Input dataset directory
        #[clap(long)]
        data_in: PathBuf,
        /// Number of trees
        #[clap(long, default_value_t = DEFAULT_N_ESTIMATORS)]
        n_estimators: i64,
        /// Training seed
        #[clap(long, default_value_t = DEFAULT_SEED, allow_negative_numbers = true)]
        seed: i64,
        /// Output model directory
        #[clap(long)]
        model_out: PathBuf,
    },

    /// Score the model and log F1
    Evaluate {
        /// Input model directory
        #[clap(long)]
        model_in: PathBuf,
        /// Input dataset directory
        #[clap(long)]
        data_in: PathBuf,
        /// Output metrics directory
        #[clap(long)]
        metrics_out: PathBuf,
    },
}

/// mlpipe Command
#[derive(Parser)]
#[command(version, about = "Declare and compile the prep -> train -> evaluate pipeline")]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Compile the pipeline to pipeline.json
    #[clap(long)]
    pub compile: bool,
    /// Where the compiled pipeline is written
    #[clap(long, default_value = PACKAGE_PATH)]
    pub package_path: PathBuf,
    #[command(subcommand)]
    pub cmd: Option<Commands>,
}
