//! Goal files → landscapes.
//!
//! Parses goal descriptions, builds each node's algorithm from its
//! descriptor, and places the nodes on a [`glass_kernel::Landscape`].

pub mod assembler;
pub mod builder;
pub mod error;
#[cfg(feature = "inline-rhai")]
pub mod inline;
pub mod registry;
pub mod spec;

pub use assembler::GoalAssembler;
pub use builder::build_algorithm;
pub use error::GoalError;
#[cfg(feature = "inline-rhai")]
pub use inline::InlineAlgorithm;
pub use registry::{AlgorithmFactory, AlgorithmRegistry};
pub use spec::{AlgoSpec, GoalSpec, NodeSpec};
