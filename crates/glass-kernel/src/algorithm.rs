//! The computation slot of a node.
//!
//! An algorithm turns a belief mapping into a measurement mapping. The
//! kernel treats it as an opaque synchronous call: it is invoked once per
//! measurement step, on a single thread, and any error it returns aborts
//! the current run cycle.
//!
//! Two algorithms ship with the kernel ([`Passthrough`] and [`MergeData`]).
//! Plain closures of the right shape implement [`Algorithm`] as well, which
//! is how tests and embedders inject custom behaviour.

use crate::error::AlgorithmError;
use crate::state::{Mapping, merge};

/// A pluggable `mapping → mapping` computation.
pub trait Algorithm {
    /// Name of this algorithm (for diagnostics).
    fn name(&self) -> &str;

    /// Produce a measurement from the given belief.
    fn measure(&self, belief: &Mapping) -> Result<Mapping, AlgorithmError>;
}

impl<F> Algorithm for F
where
    F: Fn(&Mapping) -> Result<Mapping, AlgorithmError>,
{
    fn name(&self) -> &str {
        "closure"
    }

    fn measure(&self, belief: &Mapping) -> Result<Mapping, AlgorithmError> {
        self(belief)
    }
}

/// Identity: the measurement is an independent copy of the belief.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Algorithm for Passthrough {
    fn name(&self) -> &str {
        "passthrough"
    }

    fn measure(&self, belief: &Mapping) -> Result<Mapping, AlgorithmError> {
        Ok(belief.clone())
    }
}

/// Fixed injection: the measurement is the belief with `data` merged over it.
#[derive(Debug, Clone, Default)]
pub struct MergeData {
    data: Mapping,
}

impl MergeData {
    pub fn new(data: Mapping) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &Mapping {
        &self.data
    }
}

impl Algorithm for MergeData {
    fn name(&self) -> &str {
        "merge"
    }

    fn measure(&self, belief: &Mapping) -> Result<Mapping, AlgorithmError> {
        Ok(merge(belief, &self.data))
    }
}
