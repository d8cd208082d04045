pub mod forest;
pub mod tree;

pub use forest::RandomForestClassifier;
pub use tree::{DecisionTree, TreeParams};
