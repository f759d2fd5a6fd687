//! The [`Route`] value produced by every search strategy.

use evac_core::Cell;

/// An ordered list of cells from a start cell (exclusive) to a goal cell
/// (inclusive), one orthogonal step per element.
///
/// Routes are immutable once produced. An empty route means the agent
/// has nowhere to go: either its start cell was already a goal, or the
/// caller substituted it for an unreachable result.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Route {
    steps: Vec<Cell>,
}

impl Route {
    /// Wrap an already-ordered list of steps.
    pub fn new(steps: Vec<Cell>) -> Self {
        Self { steps }
    }

    /// A route with no steps.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of steps (equal to the number of ticks needed to walk it).
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the route has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The step taken on tick `i` (0-based).
    pub fn get(&self, i: usize) -> Option<Cell> {
        self.steps.get(i).copied()
    }

    /// The goal cell, if the route has any steps.
    pub fn goal(&self) -> Option<Cell> {
        self.steps.last().copied()
    }

    /// All steps as a slice.
    pub fn steps(&self) -> &[Cell] {
        &self.steps
    }

    /// Iterate over the steps in walking order.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.steps.iter()
    }

    /// Whether consecutive cells (starting from `start`) are all exactly
    /// one orthogonal step apart.
    pub fn is_contiguous_from(&self, start: Cell) -> bool {
        let mut prev = start;
        for &step in &self.steps {
            if prev.manhattan(step) != 1 {
                return false;
            }
            prev = step;
        }
        true
    }
}

impl<'a> IntoIterator for &'a Route {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl From<Vec<Cell>> for Route {
    fn from(steps: Vec<Cell>) -> Self {
        Self::new(steps)
    }
}
