/// Type-safe keys for PipeMap
use std::marker::PhantomData;
use std::path::PathBuf;

use super::artifact::Artifact;

/// A type-safe key for PipeMap that enforces compile-time type checking
pub struct TypedKey<T> {
    name: &'static str,
    _phantom: PhantomData<T>,
}

impl<T> TypedKey<T> {
    /// Create a new typed key with a static name
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _phantom: PhantomData,
        }
    }

    /// Get the key name
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for TypedKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedKey<T> {}

/// Synthetic dataset produced by `prep`
pub const DATASET: TypedKey<Artifact> = TypedKey::new("dataset");

/// Fitted forest produced by `train`
pub const MODEL: TypedKey<Artifact> = TypedKey::new("model");

/// Metrics sink written by `evaluate`
pub const METRICS: TypedKey<Artifact> = TypedKey::new("metrics");

/// Pipeline parameter: number of trees
pub const N_ESTIMATORS: TypedKey<i64> = TypedKey::new("n_estimators");

/// Pipeline parameter: training seed
pub const SEED: TypedKey<i64> = TypedKey::new("seed");

/// F1 score computed by `evaluate`
pub const F1: TypedKey<f64> = TypedKey::new("f1");

/// Root directory under which local runs place task outputs
pub const WORK_DIR: TypedKey<PathBuf> = TypedKey::new("work_dir");
