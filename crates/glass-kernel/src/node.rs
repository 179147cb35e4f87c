//! Nodes: the cells of a landscape.
//!
//! A node holds two mappings:
//! - **belief** (`json1`): its current input, rewritten by propagation and
//!   by neighbour influence;
//! - **measurement** (`json2`): the last output of its algorithm, empty
//!   until the node is first measured.
//!
//! Three operations recompute the measurement from the belief:
//!
//! | operation | respects run flag | pushes influence first |
//! |-----------|-------------------|------------------------|
//! | [`Node::execute`] | yes | no |
//! | [`Node::loop1`]   | no  | no |
//! | [`Node::loop2`]   | no  | yes |

use crate::error::LandscapeError;
use crate::kind::NodeKinds;
use crate::pojar::Pojar;
use crate::position::Position;
use crate::state::{Mapping, merge};

#[derive(Debug)]
pub struct Node {
    position: Position,
    kinds: NodeKinds,
    pojar: Pojar,
    belief: Mapping,
    measurement: Mapping,
}

impl Node {
    pub fn new(position: impl Into<Position>, kinds: NodeKinds, pojar: Pojar) -> Self {
        Self {
            position: position.into(),
            kinds,
            pojar,
            belief: Mapping::new(),
            measurement: Mapping::new(),
        }
    }

    /// Set the initial belief.
    pub fn with_belief(mut self, belief: Mapping) -> Self {
        self.belief = belief;
        self
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn row(&self) -> i64 {
        self.position.row
    }

    pub fn col(&self) -> i64 {
        self.position.col
    }

    pub fn kinds(&self) -> NodeKinds {
        self.kinds
    }

    pub fn pojar(&self) -> &Pojar {
        &self.pojar
    }

    /// Current belief (`json1`).
    pub fn belief(&self) -> &Mapping {
        &self.belief
    }

    /// Last measurement (`json2`).
    pub fn measurement(&self) -> &Mapping {
        &self.measurement
    }

    /// Replace the belief outright.
    pub fn set_belief(&mut self, belief: Mapping) {
        self.belief = belief;
    }

    /// Merge `incoming` over the current belief (right-biased).
    pub fn absorb(&mut self, incoming: &Mapping) {
        self.belief = merge(&self.belief, incoming);
    }

    /// `Node(row,col)[planning/controlling/causal]`
    pub fn label(&self) -> String {
        format!("Node({},{})[{}]", self.row(), self.col(), self.kinds)
    }

    /// Measure with the algorithm if the run flag is set; otherwise leave
    /// the measurement untouched.
    pub fn execute(&mut self) -> Result<(), LandscapeError> {
        if !self.pojar.run() {
            tracing::trace!(node = %self.position, "execute skipped: run disabled");
            return Ok(());
        }
        self.remeasure()?;
        Ok(())
    }

    /// Belief → Measure: recompute the measurement from the current belief,
    /// regardless of the run flag.
    pub fn loop1(&mut self) -> Result<&Mapping, LandscapeError> {
        self.remeasure()
    }

    /// Influence → Measure: merge the current measurement into every
    /// neighbour's belief, in iteration order, then recompute this node's
    /// own measurement from its own belief.
    pub fn loop2<'a>(
        &mut self,
        neighbours: impl IntoIterator<Item = &'a mut Node>,
    ) -> Result<&Mapping, LandscapeError> {
        let influence = self.measurement.clone();
        for neighbour in neighbours {
            tracing::trace!(
                from = %self.position,
                to = %neighbour.position,
                keys = influence.len(),
                "influence"
            );
            neighbour.absorb(&influence);
        }
        self.remeasure()
    }

    fn remeasure(&mut self) -> Result<&Mapping, LandscapeError> {
        let measurement = self.pojar.algo().measure(&self.belief).map_err(|source| {
            LandscapeError::Computation {
                position: self.position,
                source,
            }
        })?;
        self.measurement = measurement;
        Ok(&self.measurement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::{MergeData, Passthrough};
    use crate::error::AlgorithmError;
    use crate::state::as_mapping;
    use serde_json::{Value, json};
    use std::cell::Cell;
    use std::rc::Rc;

    fn mapping(value: Value) -> Mapping {
        as_mapping(value).unwrap()
    }

    fn node(row: i64, col: i64, pojar: Pojar) -> Node {
        Node::new((row, col), NodeKinds::default(), pojar)
    }

    #[test]
    fn new_node_has_empty_measurement() {
        let n = node(0, 0, Pojar::default()).with_belief(mapping(json!({"goal": "g"})));
        assert!(n.measurement().is_empty());
        assert_eq!(n.belief()["goal"], json!("g"));
    }

    #[test]
    fn label_names_position_and_tags() {
        let n = node(2, 4, Pojar::default());
        assert_eq!(n.label(), "Node(2,4)[navigator/controller/causal]");
    }

    #[test]
    fn execute_respects_run_flag() {
        let mut off = node(0, 0, Pojar::new(Passthrough).with_run(false))
            .with_belief(mapping(json!({"a": 1})));
        off.execute().unwrap();
        assert!(off.measurement().is_empty());

        let mut on = node(0, 0, Pojar::new(Passthrough)).with_belief(mapping(json!({"a": 1})));
        on.execute().unwrap();
        assert_eq!(on.measurement(), on.belief());
    }

    #[test]
    fn loop1_ignores_run_flag() {
        let pojar = Pojar::new(MergeData::new(mapping(json!({"m": true})))).with_run(false);
        let mut off = node(0, 0, pojar).with_belief(mapping(json!({"a": 1})));
        let measured = off.loop1().unwrap().clone();
        assert_eq!(Value::Object(measured), json!({"a": 1, "m": true}));
    }

    #[test]
    fn loop2_pushes_influence_then_remeasures_self() {
        let mut pusher = node(1, 1, Pojar::new(MergeData::new(mapping(json!({"k": "p"})))))
            .with_belief(mapping(json!({"own": 1})));
        pusher.loop1().unwrap();

        let mut a = node(0, 0, Pojar::default()).with_belief(mapping(json!({"k": "a", "x": 0})));
        let mut b = node(2, 2, Pojar::default());

        let measured = pusher.loop2([&mut a, &mut b]).unwrap().clone();

        assert_eq!(Value::Object(a.belief().clone()), json!({"k": "p", "own": 1, "x": 0}));
        assert_eq!(Value::Object(b.belief().clone()), json!({"k": "p", "own": 1}));
        // own belief is not affected by its own influence
        assert_eq!(Value::Object(pusher.belief().clone()), json!({"own": 1}));
        assert_eq!(Value::Object(measured), json!({"own": 1, "k": "p"}));
    }

    #[test]
    fn every_measurement_step_invokes_the_algorithm() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let counting = move |belief: &Mapping| -> Result<Mapping, AlgorithmError> {
            counter.set(counter.get() + 1);
            Ok(belief.clone())
        };
        let mut n = node(0, 0, Pojar::new(counting));
        n.execute().unwrap();
        n.loop1().unwrap();
        n.loop2(std::iter::empty()).unwrap();
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn failing_algorithm_reports_position_and_keeps_measurement() {
        let failing = |_: &Mapping| -> Result<Mapping, AlgorithmError> {
            Err(AlgorithmError::Failed("no".into()))
        };
        let mut n = node(3, 1, Pojar::new(failing));
        let err = n.loop1().unwrap_err();
        assert_eq!(
            err,
            LandscapeError::Computation {
                position: Position::new(3, 1),
                source: AlgorithmError::Failed("no".into()),
            }
        );
        assert!(n.measurement().is_empty());
    }
}
