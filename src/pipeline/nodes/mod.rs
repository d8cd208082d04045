pub mod evaluate;
pub mod prep;
pub mod train;

pub use evaluate::{EvaluateNode, evaluate};
pub use prep::{PrepNode, prep};
pub use train::{TrainNode, train};
