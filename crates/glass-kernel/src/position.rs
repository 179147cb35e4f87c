//! Grid coordinates.
//!
//! Positions are ordered row-major, so a `BTreeMap<Position, _>` iterates
//! in ascending `(row, col)` order. The propagation sweeps depend on this.

use serde::{Deserialize, Serialize};

/// Offsets of the four diagonal neighbours, in the fixed visiting order.
pub const DIAGONAL_OFFSETS: [(i64, i64); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Offsets of the two children reached by a downward pass.
pub const CHILD_OFFSETS: [(i64, i64); 2] = [(1, -1), (1, 1)];

/// Offsets of the two parents reached by an upward pass.
pub const PARENT_OFFSETS: [(i64, i64); 2] = [(-1, -1), (-1, 1)];

/// A `(row, col)` pair on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i64,
    pub col: i64,
}

impl Position {
    pub fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    /// Whether this position lies on the staggered grid (one colour of a
    /// checkerboard whose top-left square is included).
    pub fn is_valid(self) -> bool {
        (self.row ^ self.col) & 1 == 0
    }

    /// Whether this position lies inside a `rows × cols` grid.
    pub fn in_bounds(self, rows: usize, cols: usize) -> bool {
        fits(self.row, rows) && fits(self.col, cols)
    }

    /// The position shifted by `(dr, dc)`, or `None` if either coordinate
    /// would overflow.
    pub fn offset(self, (dr, dc): (i64, i64)) -> Option<Self> {
        Some(Self::new(
            self.row.checked_add(dr)?,
            self.col.checked_add(dc)?,
        ))
    }
}

/// A grid extent as a coordinate bound, saturating at `i64::MAX`.
pub fn extent(size: usize) -> i64 {
    i64::try_from(size).unwrap_or(i64::MAX)
}

fn fits(coord: i64, extent: usize) -> bool {
    usize::try_from(coord).is_ok_and(|c| c < extent)
}

impl From<(i64, i64)> for Position {
    fn from((row, col): (i64, i64)) -> Self {
        Self::new(row, col)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
