//! Turn an [`AlgoSpec`] into a runnable algorithm.

use crate::error::GoalError;
use crate::registry::AlgorithmRegistry;
use crate::spec::AlgoSpec;
use glass_kernel::{Algorithm, MergeData, Passthrough};

pub fn build_algorithm(
    spec: &AlgoSpec,
    registry: &AlgorithmRegistry,
) -> Result<Box<dyn Algorithm>, GoalError> {
    match spec {
        AlgoSpec::Passthrough => Ok(Box::new(Passthrough)),
        AlgoSpec::Merge { data } => Ok(Box::new(MergeData::new(data.clone()))),
        AlgoSpec::Inline { code } => build_inline(code),
        AlgoSpec::Registered { name } => registry.resolve(name),
    }
}

#[cfg(feature = "inline-rhai")]
fn build_inline(code: &str) -> Result<Box<dyn Algorithm>, GoalError> {
    Ok(Box::new(crate::inline::InlineAlgorithm::compile(code)?))
}

#[cfg(not(feature = "inline-rhai"))]
fn build_inline(_code: &str) -> Result<Box<dyn Algorithm>, GoalError> {
    Err(GoalError::InlineUnavailable)
}
