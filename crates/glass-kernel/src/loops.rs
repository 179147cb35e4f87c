//! Loop1 (Belief → Measure) and Loop2 (Influence → Measure).
//!
//! Free-function entry points to the node's own measurement loops, for
//! callers that drive single nodes outside a full [`Landscape::run`].
//!
//! [`Landscape::run`]: crate::landscape::Landscape::run

use crate::error::LandscapeError;
use crate::node::Node;
use crate::state::Mapping;

/// Belief → Measure: the node measures its current belief.
pub fn run_loop1(node: &mut Node) -> Result<&Mapping, LandscapeError> {
    node.loop1()
}

/// Influence → Measure: the node pushes its measurement into each
/// neighbour's belief, then re-measures itself.
pub fn run_loop2<'n, 'a>(
    node: &'n mut Node,
    neighbours: impl IntoIterator<Item = &'a mut Node>,
) -> Result<&'n Mapping, LandscapeError> {
    node.loop2(neighbours)
}
