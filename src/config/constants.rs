//! Constants for mlpipe

/// Name of the declared pipeline
pub const PIPELINE_NAME: &str = "minimal-kfp-pipeline";

/// Default package path written by `--compile`
pub const PACKAGE_PATH: &str = "pipeline.json";

/// Default number of trees in the forest
pub const DEFAULT_N_ESTIMATORS: i64 = 200;

/// Default training seed
pub const DEFAULT_SEED: i64 = 42;

/// Container image recorded for every executor
pub const BASE_IMAGE: &str = "rust:1.85-slim";

/// Command the executors invoke inside the container
pub const EXECUTOR_COMMAND: &str = "mlpipe";

/// Shape of the synthetic dataset
pub const N_ROWS: usize = 1000;
pub const N_FEATURES: usize = 8;

/// Row sums strictly above this are labelled positive
pub const LABEL_THRESHOLD: f64 = 4.0;

/// Dataset artifact file names
pub const FEATURES_FILE: &str = "X.csv";
pub const LABELS_FILE: &str = "y.csv";

/// Model artifact file name
pub const MODEL_FILE: &str = "rf.json";

/// Metrics artifact file name
pub const METRICS_FILE: &str = "metrics.json";

/// Metric name the evaluator logs under
pub const F1_METRIC: &str = "f1";

/// Graph document versions
pub const SCHEMA_VERSION: &str = "2.1.0";
pub const SDK_VERSION: &str = concat!("mlpipe-", env!("CARGO_PKG_VERSION"));
