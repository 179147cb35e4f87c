//! The landscape: a staggered grid of nodes and its run cycle.
//!
//! Valid positions satisfy `(row + col) % 2 == 0`, the dark squares of a
//! checkerboard whose top-left square is dark. Every node therefore has up
//! to four diagonal neighbours and no orthogonal ones.
//!
//! ## Run cycle
//!
//! ```text
//! propagate_down   measurements flow into the beliefs of (row+1, col±1)
//!     │
//! execute          run-enabled nodes measure their belief
//!     │
//! loop1            every node measures its belief again
//!     │
//! loop2            every node pushes its measurement to its diagonal
//!     │            neighbours, then re-measures itself
//! propagate_up     measurements flow into the beliefs of (row-1, col±1)
//! ```
//!
//! Every sweep visits nodes in ascending `(row, col)` order except
//! `propagate_up`, which visits them in descending order. Sweeps are single
//! passes, not fixed-point iterations: a belief rewritten early in a sweep
//! is seen by later steps of the same sweep. The order is part of the
//! observable behaviour.
//!
//! A failing algorithm aborts the cycle immediately. Nothing is rolled
//! back: nodes visited before the failure keep their new state.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use crate::error::LandscapeError;
use crate::loops::{run_loop1, run_loop2};
use crate::node::Node;
use crate::position::{CHILD_OFFSETS, DIAGONAL_OFFSETS, PARENT_OFFSETS, Position, extent};

#[derive(Debug)]
pub struct Landscape {
    rows: usize,
    cols: usize,
    grid: BTreeMap<Position, Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sweep {
    Ascending,
    Descending,
}

impl Landscape {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            grid: BTreeMap::new(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of occupied positions.
    pub fn len(&self) -> usize {
        self.grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    // ─── Grid management ────────────────────────────────────────────────

    /// Parity check only; bounds are checked separately by [`add_node`].
    ///
    /// [`add_node`]: Self::add_node
    pub fn is_valid_position(row: i64, col: i64) -> bool {
        Position::new(row, col).is_valid()
    }

    /// Every valid in-bounds position, in ascending `(row, col)` order.
    pub fn valid_positions(&self) -> impl Iterator<Item = Position> + '_ {
        let cols = extent(self.cols);
        (0..extent(self.rows))
            .flat_map(move |row| (0..cols).map(move |col| Position::new(row, col)))
            .filter(|pos| pos.is_valid())
    }

    /// Place a node at its own position.
    ///
    /// Fails if the position is off the staggered grid or out of bounds.
    /// A node already at that position is replaced and returned.
    pub fn add_node(&mut self, node: Node) -> Result<Option<Node>, LandscapeError> {
        let position = node.position();
        if !position.is_valid() {
            return Err(LandscapeError::InvalidPosition { position });
        }
        if !position.in_bounds(self.rows, self.cols) {
            return Err(LandscapeError::OutOfBounds {
                position,
                rows: self.rows,
                cols: self.cols,
            });
        }
        let replaced = self.grid.insert(position, node);
        if let Some(previous) = &replaced {
            tracing::warn!(
                %position,
                replaced = %previous.label(),
                "position already occupied; previous node replaced"
            );
        }
        Ok(replaced)
    }

    pub fn get_node(&self, row: i64, col: i64) -> Option<&Node> {
        self.grid.get(&Position::new(row, col))
    }

    pub fn get_node_mut(&mut self, row: i64, col: i64) -> Option<&mut Node> {
        self.grid.get_mut(&Position::new(row, col))
    }

    /// All nodes, in ascending `(row, col)` order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.grid.values()
    }

    /// Snapshot of all nodes, in ascending `(row, col)` order.
    pub fn all_nodes(&self) -> Vec<&Node> {
        self.nodes().collect()
    }

    /// Existing diagonal neighbours of `node`: up to four, in the order
    /// (−1,−1), (−1,+1), (+1,−1), (+1,+1). Empty cells are skipped.
    pub fn get_neighbours(&self, node: &Node) -> Vec<&Node> {
        DIAGONAL_OFFSETS
            .iter()
            .filter_map(|&offset| node.position().offset(offset))
            .filter_map(|target| self.grid.get(&target))
            .collect()
    }

    // ─── Propagation ────────────────────────────────────────────────────

    /// Ascending sweep: merge each node's measurement into the beliefs of
    /// its children at `(row+1, col−1)` and `(row+1, col+1)`.
    pub fn propagate_down(&mut self) {
        let _span = tracing::debug_span!("propagate_down").entered();
        self.propagate(Sweep::Ascending, &CHILD_OFFSETS);
    }

    /// Descending sweep: merge each node's measurement into the beliefs of
    /// its parents at `(row−1, col−1)` and `(row−1, col+1)`.
    pub fn propagate_up(&mut self) {
        let _span = tracing::debug_span!("propagate_up").entered();
        self.propagate(Sweep::Descending, &PARENT_OFFSETS);
    }

    fn propagate(&mut self, sweep: Sweep, offsets: &[(i64, i64)]) {
        for position in self.order(sweep) {
            let Some(source) = self.grid.get(&position) else {
                continue;
            };
            let influence = source.measurement().clone();
            for neighbour in offsets.iter().filter_map(|&offset| position.offset(offset)) {
                if let Some(target) = self.grid.get_mut(&neighbour) {
                    tracing::trace!(from = %position, to = %target.position(), "propagate");
                    target.absorb(&influence);
                }
            }
        }
    }

    fn order(&self, sweep: Sweep) -> Vec<Position> {
        let mut order: Vec<Position> = self.grid.keys().copied().collect();
        if sweep == Sweep::Descending {
            order.reverse();
        }
        order
    }

    // ─── Execution ──────────────────────────────────────────────────────

    /// One full run cycle. See the module documentation for the phases.
    pub fn run(&mut self) -> Result<(), LandscapeError> {
        let _span = tracing::debug_span!(
            "run",
            rows = self.rows,
            cols = self.cols,
            nodes = self.grid.len()
        )
        .entered();

        self.propagate_down();

        tracing::debug!("execute phase");
        for node in self.grid.values_mut() {
            node.execute()?;
        }

        tracing::debug!("loop1 phase");
        for node in self.grid.values_mut() {
            run_loop1(node)?;
        }

        tracing::debug!("loop2 phase");
        self.influence_phase()?;

        self.propagate_up();
        Ok(())
    }

    fn influence_phase(&mut self) -> Result<(), LandscapeError> {
        for position in self.order(Sweep::Ascending) {
            let Some(mut node) = self.grid.remove(&position) else {
                continue;
            };
            let targets: Vec<Position> = DIAGONAL_OFFSETS
                .iter()
                .filter_map(|&offset| position.offset(offset))
                .collect();
            // The diagonal offsets are already in ascending order, so walking
            // the surrounding key range yields neighbours in direction order.
            let neighbours = self
                .grid
                .range_mut(surrounding(position))
                .filter(|(pos, _)| targets.contains(pos))
                .map(|(_, neighbour)| neighbour);
            let outcome = run_loop2(&mut node, neighbours).map(|_| ());
            self.grid.insert(position, node);
            outcome?;
        }
        Ok(())
    }
}

/// Key range spanning all four diagonal neighbours of `position`, clamped
/// at the edges of the coordinate space.
fn surrounding(position: Position) -> RangeInclusive<Position> {
    let low = Position::new(
        position.row.saturating_sub(1),
        position.col.saturating_sub(1),
    );
    let high = Position::new(
        position.row.saturating_add(1),
        position.col.saturating_add(1),
    );
    low..=high
}

impl std::fmt::Display for Landscape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Landscape({}×{}, {} nodes)",
            self.rows,
            self.cols,
            self.grid.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::{MergeData, Passthrough};
    use crate::kind::NodeKinds;
    use crate::pojar::Pojar;
    use crate::state::{Mapping, as_mapping};
    use serde_json::{Value, json};

    fn mapping(value: Value) -> Mapping {
        as_mapping(value).unwrap()
    }

    fn node(row: i64, col: i64) -> Node {
        Node::new((row, col), NodeKinds::default(), Pojar::new(Passthrough))
    }

    fn node_with(row: i64, col: i64, data: Value) -> Node {
        Node::new(
            (row, col),
            NodeKinds::default(),
            Pojar::new(MergeData::new(mapping(data))),
        )
    }

    #[test]
    fn rejects_odd_parity() {
        let mut landscape = Landscape::new(4, 4);
        let err = landscape.add_node(node(0, 1)).unwrap_err();
        assert_eq!(
            err,
            LandscapeError::InvalidPosition {
                position: Position::new(0, 1)
            }
        );
        assert!(err.is_placement());
        assert!(landscape.is_empty());
    }

    #[test]
    fn rejects_out_of_bounds() {
        let mut landscape = Landscape::new(2, 2);
        let err = landscape.add_node(node(2, 2)).unwrap_err();
        assert!(matches!(err, LandscapeError::OutOfBounds { rows: 2, cols: 2, .. }));
        let err = landscape.add_node(node(-1, 1)).unwrap_err();
        assert!(matches!(err, LandscapeError::OutOfBounds { .. }));
    }

    #[test]
    fn extreme_coordinates_fail_placement_cleanly() {
        assert!(!Landscape::is_valid_position(i64::MAX, 1));
        assert!(Landscape::is_valid_position(i64::MIN, i64::MAX - 1));

        let mut landscape = Landscape::new(4, 4);
        let err = landscape.add_node(node(i64::MAX, 1)).unwrap_err();
        assert!(matches!(err, LandscapeError::InvalidPosition { .. }));
        let err = landscape.add_node(node(i64::MAX, i64::MAX)).unwrap_err();
        assert!(matches!(err, LandscapeError::OutOfBounds { .. }));
        let err = landscape.add_node(node(i64::MIN, i64::MIN)).unwrap_err();
        assert!(matches!(err, LandscapeError::OutOfBounds { .. }));
        assert!(landscape.is_empty());

        assert!(landscape.get_neighbours(&node(i64::MAX, i64::MAX)).is_empty());
        assert!(landscape.get_neighbours(&node(i64::MIN, i64::MIN)).is_empty());
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn run_at_the_edge_of_the_coordinate_space() {
        let mut landscape = Landscape::new(usize::MAX, usize::MAX);
        let edge = i64::MAX;
        landscape.add_node(node_with(edge, edge, json!({"edge": true}))).unwrap();
        landscape.add_node(node(edge - 1, edge - 1)).unwrap();

        let corner = landscape.get_node(edge, edge).unwrap();
        assert_eq!(landscape.get_neighbours(corner).len(), 1);

        landscape.run().unwrap();

        let inner = landscape.get_node(edge - 1, edge - 1).unwrap();
        assert_eq!(inner.belief()["edge"], json!(true));
    }

    #[test]
    fn duplicate_position_replaces_occupant() {
        let mut landscape = Landscape::new(2, 2);
        assert!(landscape.add_node(node(0, 0)).unwrap().is_none());
        let replaced = landscape
            .add_node(node(0, 0).with_belief(mapping(json!({"second": true}))))
            .unwrap();
        assert!(replaced.is_some_and(|n| n.belief().is_empty()));
        assert_eq!(landscape.len(), 1);
        assert_eq!(
            landscape.get_node(0, 0).unwrap().belief()["second"],
            json!(true)
        );
    }

    #[test]
    fn valid_positions_are_row_major() {
        let landscape = Landscape::new(3, 3);
        let positions: Vec<(i64, i64)> = landscape
            .valid_positions()
            .map(|p| (p.row, p.col))
            .collect();
        assert_eq!(positions, vec![(0, 0), (0, 2), (1, 1), (2, 0), (2, 2)]);
    }

    #[test]
    fn valid_positions_saturate_huge_extents() {
        let landscape = Landscape::new(usize::MAX, 3);
        let first: Vec<Position> = landscape.valid_positions().take(3).collect();
        assert_eq!(
            first,
            vec![Position::new(0, 0), Position::new(0, 2), Position::new(1, 1)]
        );
    }

    #[test]
    fn neighbours_in_direction_order() {
        let mut landscape = Landscape::new(3, 3);
        for pos in [(0, 0), (0, 2), (1, 1), (2, 0), (2, 2)] {
            landscape.add_node(node(pos.0, pos.1)).unwrap();
        }
        let centre = landscape.get_node(1, 1).unwrap();
        let around: Vec<Position> = landscape
            .get_neighbours(centre)
            .iter()
            .map(|n| n.position())
            .collect();
        assert_eq!(
            around,
            vec![
                Position::new(0, 0),
                Position::new(0, 2),
                Position::new(2, 0),
                Position::new(2, 2),
            ]
        );

        let corner = landscape.get_node(0, 0).unwrap();
        assert_eq!(landscape.get_neighbours(corner).len(), 1);
    }

    #[test]
    fn propagate_down_cascades_belief_only() {
        // column of nodes: (0,0) → (1,1) → (2,0)
        let mut landscape = Landscape::new(3, 2);
        landscape.add_node(node_with(0, 0, json!({"top": 1}))).unwrap();
        landscape.add_node(node(1, 1)).unwrap();
        landscape.add_node(node(2, 0)).unwrap();
        landscape.get_node_mut(0, 0).unwrap().loop1().unwrap();

        landscape.propagate_down();

        // (1,1) received the top measurement ...
        assert_eq!(landscape.get_node(1, 1).unwrap().belief()["top"], json!(1));
        // ... but its measurement was not recomputed, so (2,0) got nothing.
        assert!(landscape.get_node(1, 1).unwrap().measurement().is_empty());
        assert!(landscape.get_node(2, 0).unwrap().belief().is_empty());
    }

    #[test]
    fn propagate_up_visits_descending() {
        let mut landscape = Landscape::new(3, 3);
        landscape.add_node(node(0, 0)).unwrap();
        landscape.add_node(node_with(1, 1, json!({"from": "middle"}))).unwrap();
        landscape.add_node(node_with(2, 2, json!({"from": "bottom"}))).unwrap();
        for (row, col) in [(1, 1), (2, 2)] {
            landscape.get_node_mut(row, col).unwrap().loop1().unwrap();
        }

        landscape.propagate_up();

        // (2,2) writes into (1,1) first; (1,1) then pushes its own, unchanged
        // measurement into (0,0).
        assert_eq!(
            landscape.get_node(1, 1).unwrap().belief()["from"],
            json!("bottom")
        );
        assert_eq!(
            landscape.get_node(0, 0).unwrap().belief()["from"],
            json!("middle")
        );
    }

    #[test]
    fn loop2_last_writer_wins_in_direction_order() {
        // (1,1) is influenced by (0,0) and then by (0,2) in the loop2 sweep;
        // (0,2) is visited later, so its value survives.
        let mut landscape = Landscape::new(2, 3);
        landscape.add_node(node_with(0, 0, json!({"k": "left"}))).unwrap();
        landscape.add_node(node_with(0, 2, json!({"k": "right"}))).unwrap();
        landscape.add_node(node(1, 1)).unwrap();

        landscape.run().unwrap();

        let centre = landscape.get_node(1, 1).unwrap();
        assert_eq!(centre.belief()["k"], json!("right"));
    }

    #[test]
    fn display_summarises() {
        let mut landscape = Landscape::new(4, 4);
        landscape.add_node(node(0, 0)).unwrap();
        assert_eq!(landscape.to_string(), "Landscape(4×4, 1 nodes)");
    }
}
