//! Build a populated [`Landscape`] from a [`GoalSpec`].
//!
//! Node descriptors are assigned to the valid grid positions in ascending
//! `(row, col)` order. Descriptors beyond the last valid position are
//! ignored; positions beyond the last descriptor get a default node
//! (navigator/controller/causal, passthrough algorithm, running).

use crate::builder::build_algorithm;
use crate::error::GoalError;
use crate::registry::AlgorithmRegistry;
use crate::spec::{GoalSpec, NodeSpec};
use glass_kernel::{Landscape, Node, Pojar, Position, merge};

#[derive(Debug, Default)]
pub struct GoalAssembler {
    registry: AlgorithmRegistry,
}

impl GoalAssembler {
    /// An assembler resolving registered algorithms against the built-ins.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: AlgorithmRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &AlgorithmRegistry {
        &self.registry
    }

    pub fn assemble(&self, goal: &GoalSpec) -> Result<Landscape, GoalError> {
        let mut landscape = Landscape::new(goal.rows(), goal.cols());
        let positions: Vec<Position> = landscape.valid_positions().collect();
        let default_spec = NodeSpec::default();

        for (index, position) in positions.iter().enumerate() {
            let spec = goal.required_node_types.get(index).unwrap_or(&default_spec);
            let node = self
                .build_node(goal, spec, *position)
                .map_err(|source| GoalError::Descriptor {
                    index,
                    source: Box::new(source),
                })?;
            landscape.add_node(node)?;
        }

        let surplus = goal.required_node_types.len().saturating_sub(positions.len());
        if surplus > 0 {
            tracing::debug!(surplus, "node descriptors beyond the last valid position ignored");
        }
        tracing::debug!(
            rows = goal.rows(),
            cols = goal.cols(),
            nodes = landscape.len(),
            "landscape assembled"
        );
        Ok(landscape)
    }

    fn build_node(
        &self,
        goal: &GoalSpec,
        spec: &NodeSpec,
        position: Position,
    ) -> Result<Node, GoalError> {
        let algo = build_algorithm(&spec.algo, &self.registry)?;
        let pojar = Pojar::from_boxed(algo)
            .with_problem_story(spec.problem_story.clone())
            .with_onto(spec.onto.clone())
            .with_json_target(spec.json_target.clone())
            .with_run(spec.run);
        let belief = merge(&goal.base_belief(), &spec.belief);
        Ok(Node::new(position, spec.kinds(), pojar).with_belief(belief))
    }
}
