//! Grid cell coordinates and the [`CellSet`] alias.

use indexmap::IndexSet;
use std::fmt;

/// One grid position.
///
/// `x` is the column and `y` the row: a cell is in bounds on a
/// `rows × cols` grid when `0 <= x < cols` and `0 <= y < rows`.
/// Identity is value-based, so `Cell` is used directly as a set and map key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// Column index.
    pub x: i32,
    /// Row index.
    pub y: i32,
}

impl Cell {
    /// Create a cell at column `x`, row `y`.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset this cell by `(dx, dy)`. The result may be out of bounds.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Manhattan (L1) distance to `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use evac_core::Cell;
    ///
    /// assert_eq!(Cell::new(0, 0).manhattan(Cell::new(4, 4)), 8);
    /// assert_eq!(Cell::new(3, 1).manhattan(Cell::new(1, 2)), 3);
    /// ```
    pub fn manhattan(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An insertion-ordered set of cells.
///
/// Insertion order makes iteration (and therefore hazard spread and
/// trace annotation) deterministic for a given sequence of edits.
pub type CellSet = IndexSet<Cell>;
