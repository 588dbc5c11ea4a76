use crate::error::PlanError;
use crate::grid::Cell;
use crate::route::RoutePlan;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Summary of a planning run, as written to the text and JSON outputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteReport {
    pub start: Cell,
    /// Goals in visiting order; `None` when no route exists
    pub order: Option<Vec<Cell>>,
    pub total_cost: usize,
    /// Full route including the start
    pub path: Vec<Cell>,
    pub cell_numbers: Vec<usize>,
    pub nodes_expanded: usize,
    pub orderings_evaluated: usize,
    pub computation_secs: f64,
    pub target_count: usize,
}

impl RouteReport {
    pub fn new(plan: &RoutePlan, start: Cell, cols: usize, target_count: usize, elapsed: Duration) -> Self {
        RouteReport {
            start,
            order: plan.order.clone(),
            total_cost: plan.total_cost,
            path: plan.full_path(start),
            cell_numbers: plan.cell_numbers(start, cols),
            nodes_expanded: plan.nodes_expanded,
            orderings_evaluated: plan.orderings_evaluated,
            computation_secs: elapsed.as_secs_f64(),
            target_count,
        }
    }

    pub fn is_feasible(&self) -> bool {
        self.order.is_some()
    }

    /// Console summary
    pub fn summary(&self) -> String {
        let route = match &self.order {
            Some(order) => format!(
                "Target order: {}\nTotal path length: {}\nOptimal path: {}\nOptimal path cell numbers: {:?}\n",
                format_cells(order),
                self.total_cost,
                format_cells(&self.path),
                self.cell_numbers
            ),
            None => "Target order: none (no feasible route)\n".to_string(),
        };

        format!(
            "--- Path Planner Information ---\n\
             Start: {}\n\
             {}\
             Nodes expanded: {}\n\
             Orderings evaluated: {}\n\
             Computation time: {:.4} s\n\
             Number of targets: {}\n",
            format_cell(self.start),
            route,
            self.nodes_expanded,
            self.orderings_evaluated,
            self.computation_secs,
            self.target_count
        )
    }

    /// Text file layout for `optimal_path.txt`
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("Optimal Path (coordinates):\n");
        out.push_str(&format!("{}\n\n", format_cells(&self.path)));
        out.push_str("Optimal Path (cell numbers):\n");
        out.push_str(&format!("{:?}\n\n", self.cell_numbers));
        out.push_str(&format!("Time Taken: {:.4} s \n\n", self.computation_secs));
        out.push_str(&format!("Nodes expanded: {} \n\n", self.nodes_expanded));
        out.push_str(&format!("Computation time: {:.4} s \n\n", self.computation_secs));
        out.push_str(&format!("Number of targets: {} \n\n", self.target_count));
        out
    }

    pub fn write_text<P: AsRef<Path>>(&self, path: P) -> Result<(), PlanError> {
        fs::write(path, self.to_text())?;
        Ok(())
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<(), PlanError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self, PlanError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

pub fn format_cell(cell: Cell) -> String {
    format!("({}, {})", cell.row, cell.col)
}

pub fn format_cells(cells: &[Cell]) -> String {
    let inner: Vec<String> = cells.iter().map(|&cell| format_cell(cell)).collect();
    format!("[{}]", inner.join(", "))
}
