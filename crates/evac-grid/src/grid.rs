//! [`GridIndex`]: wall, exit and hazard membership on a rectangular grid.

use evac_core::{Cell, CellSet};
use smallvec::SmallVec;

use crate::error::GridError;

/// The four orthogonal step offsets `(dx, dy)`: up, down, left, right.
///
/// Every neighbour enumeration in Evac (search expansion, hazard spread)
/// walks this table in this order.
pub const ORTHOGONAL: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Classification of a single in-bounds cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Walkable, not an exit, not burning.
    Open,
    /// Impassable for agents and a firebreak for the hazard.
    Wall,
    /// A goal cell; also a firebreak.
    Exit,
    /// Currently on fire.
    Hazard,
}

/// Index of wall, exit and hazard cells on a `rows × cols` grid.
///
/// # Invariant
///
/// A cell belongs to at most one of {wall, exit, hazard}. Every mutator
/// enforces this: an `add_*` call that would violate it, or that names an
/// out-of-bounds cell, is rejected and returns `false` without touching
/// any set. Mutators never fail partially.
///
/// # Examples
///
/// ```
/// use evac_core::Cell;
/// use evac_grid::GridIndex;
///
/// let mut grid = GridIndex::new(5, 5).unwrap();
/// assert!(grid.add_wall(Cell::new(1, 0)));
/// // A wall cell can never catch fire.
/// assert!(!grid.add_hazard(Cell::new(1, 0)));
/// assert!(grid.is_wall(Cell::new(1, 0)));
/// assert!(!grid.is_hazard(Cell::new(1, 0)));
/// ```
#[derive(Clone, Debug)]
pub struct GridIndex {
    rows: u32,
    cols: u32,
    walls: CellSet,
    exits: CellSet,
    hazard: CellSet,
}

impl GridIndex {
    /// Maximum dimension size: coordinates use `i32`, so each axis must fit.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Create an empty grid (no walls, exits or hazard).
    ///
    /// Returns `Err(GridError::EmptyGrid)` if either dimension is 0, or
    /// `Err(GridError::DimensionTooLarge)` if either exceeds `i32::MAX`.
    pub fn new(rows: u32, cols: u32) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyGrid);
        }
        if rows > Self::MAX_DIM {
            return Err(GridError::DimensionTooLarge {
                name: "rows",
                value: rows,
                max: Self::MAX_DIM,
            });
        }
        if cols > Self::MAX_DIM {
            return Err(GridError::DimensionTooLarge {
                name: "cols",
                value: cols,
                max: Self::MAX_DIM,
            });
        }
        Ok(Self {
            rows,
            cols,
            walls: CellSet::new(),
            exits: CellSet::new(),
            hazard: CellSet::new(),
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        (self.rows as usize) * (self.cols as usize)
    }

    /// The centre cell `(cols / 2, rows / 2)`.
    pub fn center(&self) -> Cell {
        Cell::new((self.cols / 2) as i32, (self.rows / 2) as i32)
    }

    /// Whether `cell` lies on the grid.
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < self.cols && (cell.y as u32) < self.rows
    }

    /// Row-major flat index of `cell`, or `None` if out of bounds.
    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        if self.in_bounds(cell) {
            Some(cell.y as usize * self.cols as usize + cell.x as usize)
        } else {
            None
        }
    }

    /// Inverse of [`index_of`](Self::index_of).
    pub fn cell_at(&self, index: usize) -> Cell {
        let cols = self.cols as usize;
        Cell::new((index % cols) as i32, (index / cols) as i32)
    }

    /// Whether `cell` is a wall.
    pub fn is_wall(&self, cell: Cell) -> bool {
        self.walls.contains(&cell)
    }

    /// Whether `cell` is an exit.
    pub fn is_exit(&self, cell: Cell) -> bool {
        self.exits.contains(&cell)
    }

    /// Whether `cell` is currently on fire.
    pub fn is_hazard(&self, cell: Cell) -> bool {
        self.hazard.contains(&cell)
    }

    /// Classify an in-bounds cell. Out-of-bounds cells report `None`.
    pub fn kind(&self, cell: Cell) -> Option<CellKind> {
        if !self.in_bounds(cell) {
            return None;
        }
        Some(if self.is_wall(cell) {
            CellKind::Wall
        } else if self.is_exit(cell) {
            CellKind::Exit
        } else if self.is_hazard(cell) {
            CellKind::Hazard
        } else {
            CellKind::Open
        })
    }

    /// Whether `cell` is in bounds and in none of the three sets.
    pub fn is_open(&self, cell: Cell) -> bool {
        self.kind(cell) == Some(CellKind::Open)
    }

    /// All wall cells, in insertion order.
    pub fn walls(&self) -> &CellSet {
        &self.walls
    }

    /// All exit cells, in insertion order.
    pub fn exits(&self) -> &CellSet {
        &self.exits
    }

    /// All hazard cells, in insertion order.
    pub fn hazard(&self) -> &CellSet {
        &self.hazard
    }

    /// Mark `cell` as a wall. Rejected if out of bounds, an exit, or on fire.
    pub fn add_wall(&mut self, cell: Cell) -> bool {
        if !self.in_bounds(cell) || self.is_exit(cell) || self.is_hazard(cell) {
            return false;
        }
        self.walls.insert(cell)
    }

    /// Remove a wall. Returns `false` if `cell` was not a wall.
    pub fn remove_wall(&mut self, cell: Cell) -> bool {
        self.walls.shift_remove(&cell)
    }

    /// Mark `cell` as an exit. Rejected if out of bounds, a wall, or on fire.
    pub fn add_exit(&mut self, cell: Cell) -> bool {
        if !self.in_bounds(cell) || self.is_wall(cell) || self.is_hazard(cell) {
            return false;
        }
        self.exits.insert(cell)
    }

    /// Remove an exit. Returns `false` if `cell` was not an exit.
    pub fn remove_exit(&mut self, cell: Cell) -> bool {
        self.exits.shift_remove(&cell)
    }

    /// Set `cell` on fire. Rejected if out of bounds, a wall, or an exit.
    pub fn add_hazard(&mut self, cell: Cell) -> bool {
        if !self.in_bounds(cell) || self.is_wall(cell) || self.is_exit(cell) {
            return false;
        }
        self.hazard.insert(cell)
    }

    /// Extinguish `cell`. Returns `false` if it was not on fire.
    pub fn remove_hazard(&mut self, cell: Cell) -> bool {
        self.hazard.shift_remove(&cell)
    }

    /// Remove every wall.
    pub fn clear_walls(&mut self) {
        self.walls.clear();
    }

    /// Remove every exit.
    pub fn clear_exits(&mut self) {
        self.exits.clear();
    }

    /// Extinguish every hazard cell.
    pub fn clear_hazard(&mut self) {
        self.hazard.clear();
    }

    /// In-bounds orthogonal neighbours of `cell`, in [`ORTHOGONAL`] order,
    /// without any filtering by cell kind.
    pub fn neighbours(&self, cell: Cell) -> SmallVec<[Cell; 4]> {
        ORTHOGONAL
            .iter()
            .map(|&(dx, dy)| cell.offset(dx, dy))
            .filter(|&n| self.in_bounds(n))
            .collect()
    }

    /// Neighbours an agent may plan through: in bounds and not a wall.
    ///
    /// Hazard cells are deliberately *not* filtered. Routes are planned
    /// against walls only and may cross fire.
    pub fn passable_neighbours(&self, cell: Cell) -> SmallVec<[Cell; 4]> {
        ORTHOGONAL
            .iter()
            .map(|&(dx, dy)| cell.offset(dx, dy))
            .filter(|&n| self.in_bounds(n) && !self.is_wall(n))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn c(x: i32, y: i32) -> Cell {
        Cell::new(x, y)
    }

    // ── Constructor tests ───────────────────────────────────────

    #[test]
    fn new_zero_rows_returns_error() {
        assert_eq!(GridIndex::new(0, 5).unwrap_err(), GridError::EmptyGrid);
        assert_eq!(GridIndex::new(5, 0).unwrap_err(), GridError::EmptyGrid);
    }

    #[test]
    fn new_rejects_dims_exceeding_i32_max() {
        let big = i32::MAX as u32 + 1;
        assert!(matches!(
            GridIndex::new(big, 5),
            Err(GridError::DimensionTooLarge { name: "rows", .. })
        ));
        assert!(matches!(
            GridIndex::new(5, big),
            Err(GridError::DimensionTooLarge { name: "cols", .. })
        ));
    }

    // ── Bounds and indexing ─────────────────────────────────────

    #[test]
    fn in_bounds_uses_x_for_cols_and_y_for_rows() {
        let g = GridIndex::new(3, 5).unwrap();
        assert!(g.in_bounds(c(4, 2)));
        assert!(!g.in_bounds(c(2, 4)));
        assert!(!g.in_bounds(c(-1, 0)));
        assert!(!g.in_bounds(c(0, 3)));
    }

    #[test]
    fn index_round_trips_every_cell() {
        let g = GridIndex::new(4, 6).unwrap();
        for i in 0..g.cell_count() {
            let cell = g.cell_at(i);
            assert_eq!(g.index_of(cell), Some(i));
        }
        assert_eq!(g.index_of(c(6, 0)), None);
    }

    #[test]
    fn center_of_even_grid() {
        let g = GridIndex::new(20, 20).unwrap();
        assert_eq!(g.center(), c(10, 10));
    }

    // ── Invariant enforcement ───────────────────────────────────

    #[test]
    fn hazard_rejected_on_wall_and_exit() {
        let mut g = GridIndex::new(5, 5).unwrap();
        assert!(g.add_wall(c(1, 1)));
        assert!(g.add_exit(c(2, 2)));
        assert!(!g.add_hazard(c(1, 1)));
        assert!(!g.add_hazard(c(2, 2)));
        assert!(g.hazard().is_empty());
    }

    #[test]
    fn wall_rejected_on_exit_and_hazard() {
        let mut g = GridIndex::new(5, 5).unwrap();
        assert!(g.add_exit(c(0, 0)));
        assert!(g.add_hazard(c(1, 0)));
        assert!(!g.add_wall(c(0, 0)));
        assert!(!g.add_wall(c(1, 0)));
        assert!(g.walls().is_empty());
    }

    #[test]
    fn exit_rejected_on_wall_and_hazard() {
        let mut g = GridIndex::new(5, 5).unwrap();
        assert!(g.add_wall(c(0, 0)));
        assert!(g.add_hazard(c(1, 0)));
        assert!(!g.add_exit(c(0, 0)));
        assert!(!g.add_exit(c(1, 0)));
        assert!(g.exits().is_empty());
    }

    #[test]
    fn out_of_bounds_mutations_are_no_ops() {
        let mut g = GridIndex::new(2, 2).unwrap();
        assert!(!g.add_wall(c(2, 0)));
        assert!(!g.add_exit(c(0, -1)));
        assert!(!g.add_hazard(c(5, 5)));
        assert!(g.walls().is_empty() && g.exits().is_empty() && g.hazard().is_empty());
    }

    #[test]
    fn duplicate_add_and_missing_remove_report_false() {
        let mut g = GridIndex::new(3, 3).unwrap();
        assert!(g.add_wall(c(1, 1)));
        assert!(!g.add_wall(c(1, 1)));
        assert!(g.remove_wall(c(1, 1)));
        assert!(!g.remove_wall(c(1, 1)));
        assert!(!g.remove_exit(c(0, 0)));
        assert!(!g.remove_hazard(c(0, 0)));
    }

    #[test]
    fn removal_frees_cell_for_other_kinds() {
        let mut g = GridIndex::new(3, 3).unwrap();
        g.add_wall(c(1, 1));
        g.remove_wall(c(1, 1));
        assert!(g.add_hazard(c(1, 1)));
        assert_eq!(g.kind(c(1, 1)), Some(CellKind::Hazard));
    }

    #[test]
    fn kind_classifies_cells() {
        let mut g = GridIndex::new(3, 3).unwrap();
        g.add_wall(c(0, 0));
        g.add_exit(c(1, 0));
        g.add_hazard(c(2, 0));
        assert_eq!(g.kind(c(0, 0)), Some(CellKind::Wall));
        assert_eq!(g.kind(c(1, 0)), Some(CellKind::Exit));
        assert_eq!(g.kind(c(2, 0)), Some(CellKind::Hazard));
        assert_eq!(g.kind(c(1, 1)), Some(CellKind::Open));
        assert_eq!(g.kind(c(3, 3)), None);
        assert!(g.is_open(c(1, 1)));
    }

    #[test]
    fn clear_sets_independently() {
        let mut g = GridIndex::new(3, 3).unwrap();
        g.add_wall(c(0, 0));
        g.add_exit(c(1, 0));
        g.add_hazard(c(2, 0));
        g.clear_hazard();
        g.clear_exits();
        assert_eq!(g.walls().len(), 1);
        assert!(g.exits().is_empty());
        assert!(g.hazard().is_empty());
        g.clear_walls();
        assert!(g.walls().is_empty());
    }

    // ── Neighbour tests ─────────────────────────────────────────

    #[test]
    fn neighbours_interior_in_fixed_order() {
        let g = GridIndex::new(5, 5).unwrap();
        let n = g.neighbours(c(2, 2));
        assert_eq!(n.as_slice(), &[c(2, 1), c(2, 3), c(1, 2), c(3, 2)]);
    }

    #[test]
    fn neighbours_corner() {
        let g = GridIndex::new(5, 5).unwrap();
        let n = g.neighbours(c(0, 0));
        assert_eq!(n.as_slice(), &[c(0, 1), c(1, 0)]);
    }

    #[test]
    fn passable_neighbours_skip_walls_but_keep_hazard() {
        let mut g = GridIndex::new(3, 3).unwrap();
        g.add_wall(c(1, 0));
        g.add_hazard(c(1, 2));
        let n = g.passable_neighbours(c(1, 1));
        assert!(!n.contains(&c(1, 0)));
        assert!(n.contains(&c(1, 2)));
        assert_eq!(n.len(), 3);
    }

    #[test]
    fn single_cell_has_no_neighbours() {
        let g = GridIndex::new(1, 1).unwrap();
        assert!(g.neighbours(c(0, 0)).is_empty());
    }

    // ── Property tests ──────────────────────────────────────────

    #[derive(Clone, Debug)]
    enum Edit {
        AddWall(i32, i32),
        AddExit(i32, i32),
        AddHazard(i32, i32),
        RemoveWall(i32, i32),
        RemoveExit(i32, i32),
        RemoveHazard(i32, i32),
    }

    fn arb_edit() -> impl Strategy<Value = Edit> {
        let xy = (-1i32..7, -1i32..7);
        prop_oneof![
            xy.clone().prop_map(|(x, y)| Edit::AddWall(x, y)),
            xy.clone().prop_map(|(x, y)| Edit::AddExit(x, y)),
            xy.clone().prop_map(|(x, y)| Edit::AddHazard(x, y)),
            xy.clone().prop_map(|(x, y)| Edit::RemoveWall(x, y)),
            xy.clone().prop_map(|(x, y)| Edit::RemoveExit(x, y)),
            xy.prop_map(|(x, y)| Edit::RemoveHazard(x, y)),
        ]
    }

    proptest! {
        #[test]
        fn sets_stay_disjoint_and_in_bounds(edits in prop::collection::vec(arb_edit(), 0..200)) {
            let mut g = GridIndex::new(6, 6).unwrap();
            for edit in edits {
                match edit {
                    Edit::AddWall(x, y) => { g.add_wall(c(x, y)); }
                    Edit::AddExit(x, y) => { g.add_exit(c(x, y)); }
                    Edit::AddHazard(x, y) => { g.add_hazard(c(x, y)); }
                    Edit::RemoveWall(x, y) => { g.remove_wall(c(x, y)); }
                    Edit::RemoveExit(x, y) => { g.remove_exit(c(x, y)); }
                    Edit::RemoveHazard(x, y) => { g.remove_hazard(c(x, y)); }
                }
            }
            for &w in g.walls() {
                prop_assert!(g.in_bounds(w));
                prop_assert!(!g.is_exit(w) && !g.is_hazard(w));
            }
            for &e in g.exits() {
                prop_assert!(g.in_bounds(e));
                prop_assert!(!g.is_hazard(e));
            }
            for &h in g.hazard() {
                prop_assert!(g.in_bounds(h));
            }
        }

        #[test]
        fn neighbours_symmetric(
            rows in 1u32..10,
            cols in 1u32..10,
            x in 0i32..10, y in 0i32..10,
        ) {
            let g = GridIndex::new(rows, cols).unwrap();
            let cell = c(x % cols as i32, y % rows as i32);
            for nb in g.neighbours(cell) {
                prop_assert_eq!(cell.manhattan(nb), 1);
                prop_assert!(g.neighbours(nb).contains(&cell));
            }
        }
    }
}
