//! # Glass Kernel
//!
//! Nodes on a staggered grid exchange JSON mappings with their diagonal
//! neighbours and recompute a measurement through a pluggable algorithm.
//!
//! This crate is **algorithm-agnostic**: it does not prescribe what a node
//! computes. It only prescribes the order in which nodes compute and how
//! their results flow between them.
//!
//! ## Architecture
//!
//! ```text
//! Algorithm          ← Pluggable belief → measurement computation
//!     │
//! Pojar              ← Per-node bundle: metadata, tags, target, algo, run flag
//!     │
//! Node               ← Position, tags, belief (json1), measurement (json2)
//!     │
//! loops              ← Loop1 (Belief → Measure), Loop2 (Influence → Measure)
//!     │
//! Landscape          ← Grid, diagonal neighbours, propagation, run cycle
//! ```

pub mod algorithm;
pub mod error;
pub mod kind;
pub mod landscape;
pub mod loops;
pub mod node;
pub mod pojar;
pub mod position;
pub mod state;

pub use algorithm::{Algorithm, MergeData, Passthrough};
pub use error::{AlgorithmError, LandscapeError};
pub use kind::{CausalType, ControllingType, NodeKind, NodeKinds, PlanningType};
pub use landscape::Landscape;
pub use loops::{run_loop1, run_loop2};
pub use node::Node;
pub use pojar::Pojar;
pub use position::Position;
pub use state::{Mapping, merge};
