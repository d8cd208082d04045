// Pipeline module - step framework, node registry and the three pipeline steps

pub mod artifact;
pub mod builder;
pub mod core;
pub mod keys;
pub mod nodes;
pub mod register;
pub mod registry;

// Re-export core types
pub use artifact::*;
pub use builder::*;
pub use self::core::*;
pub use keys::*;
pub use register::register_nodes;
pub use registry::*;
