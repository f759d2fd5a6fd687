//! Test fixtures for Evac development.
//!
//! Grids are easiest to reason about when drawn. [`parse_grid`] turns an
//! ASCII picture into a [`GridIndex`] plus the agent start cells marked
//! on it:
//!
//! | Glyph | Meaning |
//! |-------|---------|
//! | `.`   | open cell |
//! | `#`   | wall |
//! | `E`   | exit |
//! | `F`   | hazard (fire) |
//! | `A`   | open cell with an agent start |
//!
//! Leading/trailing whitespace on each line is ignored, as are blank lines.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use evac_core::Cell;
use evac_grid::GridIndex;

/// A parsed ASCII grid.
#[derive(Clone, Debug)]
pub struct GridFixture {
    pub grid: GridIndex,
    /// Agent start cells in reading order (top-to-bottom, left-to-right).
    pub starts: Vec<Cell>,
}

impl GridFixture {
    /// The single agent start. Panics unless exactly one `A` was drawn.
    pub fn start(&self) -> Cell {
        assert_eq!(
            self.starts.len(),
            1,
            "fixture has {} agent starts, expected exactly one",
            self.starts.len()
        );
        self.starts[0]
    }
}

/// Parse an ASCII grid picture. Panics on ragged rows or unknown glyphs.
///
/// ```
/// use evac_test_utils::parse_grid;
///
/// let fx = parse_grid("
///     A.#
///     ..E
/// ");
/// assert_eq!(fx.grid.rows(), 2);
/// assert_eq!(fx.grid.cols(), 3);
/// assert_eq!(fx.grid.exits().len(), 1);
/// ```
pub fn parse_grid(picture: &str) -> GridFixture {
    let lines: Vec<&str> = picture
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    assert!(!lines.is_empty(), "grid picture is empty");
    let cols = lines[0].chars().count();
    for (y, line) in lines.iter().enumerate() {
        assert_eq!(
            line.chars().count(),
            cols,
            "row {y} has {} cells, expected {cols}",
            line.chars().count()
        );
    }

    let mut grid = GridIndex::new(lines.len() as u32, cols as u32)
        .unwrap_or_else(|e| panic!("invalid fixture grid: {e}"));
    let mut starts = Vec::new();
    for (y, line) in lines.iter().enumerate() {
        for (x, glyph) in line.chars().enumerate() {
            let cell = Cell::new(x as i32, y as i32);
            match glyph {
                '.' => {}
                '#' => {
                    grid.add_wall(cell);
                }
                'E' => {
                    grid.add_exit(cell);
                }
                'F' => {
                    grid.add_hazard(cell);
                }
                'A' => starts.push(cell),
                other => panic!("unknown glyph {other:?} at {cell}"),
            }
        }
    }
    GridFixture { grid, starts }
}

/// An empty `rows × cols` grid with the given exits.
pub fn open_grid(rows: u32, cols: u32, exits: &[Cell]) -> GridIndex {
    let mut grid =
        GridIndex::new(rows, cols).unwrap_or_else(|e| panic!("invalid fixture grid: {e}"));
    for &exit in exits {
        assert!(grid.add_exit(exit), "exit {exit} rejected");
    }
    grid
}

/// Render a grid back to the fixture notation, marking `path` cells
/// with `*`. Handy in assertion messages.
pub fn render(grid: &GridIndex, path: &[Cell]) -> String {
    let mut out = String::new();
    for y in 0..grid.rows() as i32 {
        for x in 0..grid.cols() as i32 {
            let cell = Cell::new(x, y);
            let glyph = if grid.is_wall(cell) {
                '#'
            } else if grid.is_exit(cell) {
                'E'
            } else if path.contains(&cell) {
                '*'
            } else if grid.is_hazard(cell) {
                'F'
            } else {
                '.'
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_glyph() {
        let fx = parse_grid(
            "
            A#E
            F..
            ",
        );
        assert_eq!(fx.start(), Cell::new(0, 0));
        assert!(fx.grid.is_wall(Cell::new(1, 0)));
        assert!(fx.grid.is_exit(Cell::new(2, 0)));
        assert!(fx.grid.is_hazard(Cell::new(0, 1)));
    }

    #[test]
    #[should_panic(expected = "expected 3")]
    fn ragged_rows_panic() {
        parse_grid("...\n..");
    }

    #[test]
    fn render_marks_path() {
        let grid = open_grid(1, 3, &[Cell::new(2, 0)]);
        assert_eq!(render(&grid, &[Cell::new(1, 0)]), ".*E\n");
    }
}
