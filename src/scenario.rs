use crate::error::PlanError;
use crate::grid::{Cell, CellKind, Grid};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Saved planning problem: walls, start and goals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub rows: usize,
    pub cols: usize,
    /// Blocked cells in row-major order
    pub blocked: Vec<Cell>,
    pub start: Cell,
    pub goals: Vec<Cell>,
}

impl Scenario {
    /// Capture a grid; fails if it has no start cell
    pub fn from_grid(grid: &Grid) -> Result<Self, PlanError> {
        let start = grid.start().ok_or(PlanError::NoStart)?;
        let blocked = (0..grid.cells.len())
            .map(|id| grid.get_coords(id))
            .filter(|&cell| grid.is_blocked(cell))
            .collect();

        Ok(Scenario {
            rows: grid.rows,
            cols: grid.cols,
            blocked,
            start,
            goals: grid.goals(),
        })
    }

    /// Rebuild the grid with start and goal markers applied
    pub fn to_grid(&self) -> Grid {
        let mut grid = Grid::with_blocked(self.rows, self.cols, &self.blocked);
        grid.set_kind(self.start, CellKind::Start);
        for &goal in &self.goals {
            grid.set_kind(goal, CellKind::Goal);
        }
        grid
    }

    /// Save to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), PlanError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, PlanError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_without_start_is_rejected() {
        let grid = Grid::new(2, 2);
        assert!(matches!(Scenario::from_grid(&grid), Err(PlanError::NoStart)));
    }

    #[test]
    fn captures_markers() {
        let grid = Grid::from_layout("S#\n.G\n").unwrap();
        let scenario = Scenario::from_grid(&grid).unwrap();
        assert_eq!(scenario.blocked, vec![Cell::new(0, 1)]);
        assert_eq!(scenario.start, Cell::new(0, 0));
        assert_eq!(scenario.goals, vec![Cell::new(1, 1)]);
        assert_eq!(scenario.to_grid(), grid);
    }

    #[test]
    fn saves_and_loads_json() {
        let grid = Grid::from_layout("S..\n#.G\n").unwrap();
        let scenario = Scenario::from_grid(&grid).unwrap();
        let path = std::env::temp_dir().join(format!("waypoint_scenario_{}.json", std::process::id()));

        scenario.save_to_file(&path).unwrap();
        let loaded = Scenario::load_from_file(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, scenario);
    }
}
