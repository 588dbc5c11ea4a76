use crate::error::GridError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell on the grid, addressed as (row, col)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Cell { row, col }
    }

    /// Axis-aligned neighbours in the order up, down, left, right.
    /// Neighbours past row/col zero are skipped; the upper bound is the grid's job.
    pub fn neighbors_4(&self) -> impl Iterator<Item = Cell> {
        let up = self.row.checked_sub(1).map(|r| Cell::new(r, self.col));
        let down = Some(Cell::new(self.row + 1, self.col));
        let left = self.col.checked_sub(1).map(|c| Cell::new(self.row, c));
        let right = Some(Cell::new(self.row, self.col + 1));
        [up, down, left, right].into_iter().flatten()
    }

    /// 1-based row-major label, as printed in route reports
    pub fn cell_number(&self, cols: usize) -> usize {
        self.row * cols + self.col + 1
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Classification of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CellKind {
    #[default]
    Free,
    Blocked,
    Start,
    Goal,
}

impl CellKind {
    pub fn symbol(self) -> char {
        match self {
            CellKind::Free => '.',
            CellKind::Blocked => '#',
            CellKind::Start => 'S',
            CellKind::Goal => 'G',
        }
    }

    fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            '.' | '□' | '0' | ' ' => Some(CellKind::Free),
            '#' | '■' | '1' => Some(CellKind::Blocked),
            'S' | 's' => Some(CellKind::Start),
            'G' | 'g' => Some(CellKind::Goal),
            _ => None,
        }
    }
}

/// Reference maze the planner ships with
const CLASSIC_MAZE: &str = "\
########################
#........#.............#
#.S......#.......#####.#
#........#.......#...#.#
#........#...#####...#.#
#........#...##..#...#.#
#.########...#...#...#.#
#........#...#.#.#...#.#
#........#...###.#...#.#
#.###............#...#.#
#...#.####.......#.....#
########################
";

/// Occupancy grid with classified cells, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<CellKind>,
}

impl Grid {
    /// Create a new grid with all cells free
    pub fn new(rows: usize, cols: usize) -> Self {
        Grid {
            rows,
            cols,
            cells: vec![CellKind::Free; rows * cols],
        }
    }

    /// Create a grid with specific blocked cells; out-of-bounds entries are ignored
    pub fn with_blocked(rows: usize, cols: usize, blocked: &[Cell]) -> Self {
        let mut grid = Self::new(rows, cols);
        for &cell in blocked {
            grid.set_kind(cell, CellKind::Blocked);
        }
        grid
    }

    /// The 12x24 maze with its start at (2,2) and no goals placed
    pub fn classic_maze() -> Self {
        // The constant is known to be rectangular and uses only layout symbols.
        Self::from_layout(CLASSIC_MAZE).unwrap_or_else(|_| Self::new(12, 24))
    }

    /// Parse a text layout, one line per row
    ///
    /// `#`/`■`/`1` are walls, `.`/`□`/`0`/space are free, `S` is the start and `G` a goal.
    /// Blank lines are skipped.
    pub fn from_layout(text: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty())
            .collect();

        let first = lines.first().ok_or(GridError::Empty)?;
        let cols = first.chars().count();
        let mut cells = Vec::with_capacity(lines.len() * cols);

        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(GridError::RaggedRow {
                    row,
                    expected: cols,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let kind =
                    CellKind::from_symbol(ch).ok_or(GridError::UnknownSymbol { ch, row, col })?;
                cells.push(kind);
            }
        }

        Ok(Grid {
            rows: lines.len(),
            cols,
            cells,
        })
    }

    /// Write the grid back out in the layout format accepted by `from_layout`
    pub fn to_layout(&self) -> String {
        let mut result = String::with_capacity(self.rows * (self.cols + 1));
        for row in 0..self.rows {
            for col in 0..self.cols {
                result.push(self.kind(Cell::new(row, col)).symbol());
            }
            result.push('\n');
        }
        result
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Convert a cell to its row-major index
    pub fn get_id(&self, cell: Cell) -> usize {
        cell.row * self.cols + cell.col
    }

    /// Convert a row-major index back to a cell
    pub fn get_coords(&self, id: usize) -> Cell {
        Cell::new(id / self.cols, id % self.cols)
    }

    /// Cell classification; out of bounds reads as blocked
    pub fn kind(&self, cell: Cell) -> CellKind {
        if !self.in_bounds(cell) {
            return CellKind::Blocked;
        }
        self.cells[self.get_id(cell)]
    }

    pub fn set_kind(&mut self, cell: Cell, kind: CellKind) {
        if self.in_bounds(cell) {
            let id = self.get_id(cell);
            self.cells[id] = kind;
        }
    }

    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.kind(cell) == CellKind::Blocked
    }

    pub fn is_walkable(&self, cell: Cell) -> bool {
        !self.is_blocked(cell)
    }

    /// First start cell in row-major order
    pub fn start(&self) -> Option<Cell> {
        self.cells
            .iter()
            .position(|&kind| kind == CellKind::Start)
            .map(|id| self.get_coords(id))
    }

    /// Goal cells in row-major order
    pub fn goals(&self) -> Vec<Cell> {
        self.cells_of(CellKind::Goal)
    }

    pub fn free_cells(&self) -> Vec<Cell> {
        self.cells_of(CellKind::Free)
    }

    /// Turn every goal back into a free cell
    pub fn clear_goals(&mut self) {
        for kind in self.cells.iter_mut() {
            if *kind == CellKind::Goal {
                *kind = CellKind::Free;
            }
        }
    }

    /// Move the start marker to `cell`, freeing the previous start
    pub fn move_start(&mut self, cell: Cell) {
        if !self.in_bounds(cell) {
            return;
        }
        if let Some(previous) = self.start() {
            self.set_kind(previous, CellKind::Free);
        }
        self.set_kind(cell, CellKind::Start);
    }

    fn cells_of(&self, wanted: CellKind) -> Vec<Cell> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, kind)| **kind == wanted)
            .map(|(id, _)| self.get_coords(id))
            .collect()
    }
}

/// Display copy of a grid with a route drawn on it
///
/// The source grid is never touched; only free cells along the route are marked.
#[derive(Debug, Clone)]
pub struct PathOverlay {
    grid: Grid,
    marked: Vec<bool>,
}

impl PathOverlay {
    pub fn new(grid: &Grid, path: &[Cell]) -> Self {
        let mut overlay = PathOverlay {
            grid: grid.clone(),
            marked: vec![false; grid.cells.len()],
        };
        for &cell in path {
            overlay.mark(cell);
        }
        overlay
    }

    /// Mark one more cell; used when animating a route step by step
    pub fn mark(&mut self, cell: Cell) {
        if self.grid.kind(cell) == CellKind::Free {
            let id = self.grid.get_id(cell);
            self.marked[id] = true;
        }
    }

    pub fn is_marked(&self, cell: Cell) -> bool {
        self.grid.in_bounds(cell) && self.marked[self.grid.get_id(cell)]
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn render_ascii(&self) -> String {
        let mut result = String::new();
        for row in 0..self.grid.rows {
            for col in 0..self.grid.cols {
                let cell = Cell::new(row, col);
                let symbol = if self.is_marked(cell) {
                    '*'
                } else {
                    self.grid.kind(cell).symbol()
                };
                result.push(symbol);
            }
            result.push('\n');
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_maze_has_start_and_no_goals() {
        let grid = Grid::classic_maze();
        assert_eq!((grid.rows, grid.cols), (12, 24));
        assert_eq!(grid.start(), Some(Cell::new(2, 2)));
        assert!(grid.goals().is_empty());
        assert!(grid.is_blocked(Cell::new(0, 0)));
        assert!(grid.is_walkable(Cell::new(1, 1)));
    }

    #[test]
    fn layout_round_trips_through_text() {
        let grid = Grid::classic_maze();
        assert_eq!(grid.to_layout(), CLASSIC_MAZE);
    }

    #[test]
    fn ragged_layout_is_rejected() {
        let err = Grid::from_layout("###\n##\n").unwrap_err();
        assert_eq!(
            err,
            GridError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn unknown_symbol_is_rejected() {
        let err = Grid::from_layout("#.x\n").unwrap_err();
        assert_eq!(
            err,
            GridError::UnknownSymbol {
                ch: 'x',
                row: 0,
                col: 2
            }
        );
    }

    #[test]
    fn neighbours_skip_underflow() {
        let corner: Vec<Cell> = Cell::new(0, 0).neighbors_4().collect();
        assert_eq!(corner, vec![Cell::new(1, 0), Cell::new(0, 1)]);
    }

    #[test]
    fn overlay_leaves_source_untouched() {
        let grid = Grid::from_layout("S..\n.#G\n").unwrap();
        let path = [Cell::new(0, 1), Cell::new(0, 2), Cell::new(1, 2)];
        let overlay = PathOverlay::new(&grid, &path);

        assert_eq!(overlay.render_ascii(), "S**\n.#G\n");
        assert_eq!(grid.to_layout(), "S..\n.#G\n");
        assert!(!overlay.is_marked(Cell::new(1, 2)));
    }
}
