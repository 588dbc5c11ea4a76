use crate::error::PlanError;
use crate::grid::{Cell, Grid};
use crate::heuristic::manhattan;
use log::{debug, trace};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Outcome of a single start-to-goal search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResult {
    /// Cells from start to goal, start excluded. Empty when no path exists.
    pub path: Vec<Cell>,
    /// Cells closed before the search stopped
    pub nodes_expanded: usize,
    /// Whether the goal was reached; distinguishes "already there" from "unreachable"
    pub found: bool,
}

impl PathResult {
    /// Number of moves along the path
    pub fn cost(&self) -> usize {
        self.path.len()
    }
}

/// One discovered search state, owned by the arena of a single search
#[derive(Debug, Clone)]
pub struct SearchNode {
    pub cell: Cell,
    pub g: usize,
    pub h: usize,
    /// Arena index of the node this one was reached from
    pub parent: Option<usize>,
}

impl SearchNode {
    pub fn f(&self) -> usize {
        self.g + self.h
    }
}

/// Frontier entry pointing into the node arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrontierEntry {
    f: usize,
    node: usize,
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .f
            .cmp(&self.f)
            // Tie-breaker: arena index is insertion order, so equal f pops first-in-first-out
            .then_with(|| other.node.cmp(&self.node))
    }
}

/// Reject start/goal cells the search cannot stand on
pub fn validate_endpoint(grid: &Grid, cell: Cell) -> Result<(), PlanError> {
    if !grid.in_bounds(cell) {
        return Err(PlanError::OutOfBounds {
            cell,
            rows: grid.rows,
            cols: grid.cols,
        });
    }
    if grid.is_blocked(cell) {
        return Err(PlanError::Blocked(cell));
    }
    Ok(())
}

/// A* search from `start` to `goal` over 4-connected unit-cost moves
///
/// The grid is only read. An unreachable goal is not an error: the result comes back
/// with an empty path and the number of cells expanded before the frontier ran dry.
pub fn find_path(grid: &Grid, start: Cell, goal: Cell) -> Result<PathResult, PlanError> {
    validate_endpoint(grid, start)?;
    validate_endpoint(grid, goal)?;

    trace!(
        "[find_path] ({},{}) -> ({},{})",
        start.row,
        start.col,
        goal.row,
        goal.col
    );

    let mut nodes: Vec<SearchNode> = Vec::new();
    let mut frontier: BinaryHeap<FrontierEntry> = BinaryHeap::new();
    let mut closed = vec![false; grid.cells.len()];
    let mut best_g = vec![usize::MAX; grid.cells.len()];
    let mut nodes_expanded = 0;

    let h = manhattan(start, goal);
    nodes.push(SearchNode {
        cell: start,
        g: 0,
        h,
        parent: None,
    });
    best_g[grid.get_id(start)] = 0;
    frontier.push(FrontierEntry { f: h, node: 0 });

    while let Some(entry) = frontier.pop() {
        let current = nodes[entry.node].clone();
        let id = grid.get_id(current.cell);

        // Stale duplicate of a cell that has already been finalised
        if closed[id] {
            continue;
        }
        closed[id] = true;
        nodes_expanded += 1;

        if current.cell == goal {
            let path = reconstruct_path(&nodes, entry.node);
            debug!(
                "[find_path] reached ({},{}) in {} moves, {} expanded",
                goal.row,
                goal.col,
                path.len(),
                nodes_expanded
            );
            return Ok(PathResult {
                path,
                nodes_expanded,
                found: true,
            });
        }

        for next in current.cell.neighbors_4() {
            if !grid.in_bounds(next) || grid.is_blocked(next) {
                continue;
            }
            let next_id = grid.get_id(next);
            if closed[next_id] {
                continue;
            }

            // Only enqueue if this is a better route to the cell
            let g = current.g + 1;
            if g >= best_g[next_id] {
                continue;
            }
            best_g[next_id] = g;

            let h = manhattan(next, goal);
            nodes.push(SearchNode {
                cell: next,
                g,
                h,
                parent: Some(entry.node),
            });
            frontier.push(FrontierEntry {
                f: g + h,
                node: nodes.len() - 1,
            });
        }
    }

    debug!(
        "[find_path] ({},{}) unreachable from ({},{}) after {} expanded",
        goal.row,
        goal.col,
        start.row,
        start.col,
        nodes_expanded
    );
    Ok(PathResult {
        path: Vec::new(),
        nodes_expanded,
        found: false,
    })
}

/// Walk parent links back from `goal_index` and return the cells in travel order.
/// The root node (the start) is left out.
pub fn reconstruct_path(nodes: &[SearchNode], goal_index: usize) -> Vec<Cell> {
    let mut path = Vec::new();
    let mut current = goal_index;
    while let Some(parent) = nodes[current].parent {
        path.push(nodes[current].cell);
        current = parent;
    }
    path.reverse();
    path
}

/// Format path for display
pub fn format_path(path: &[Cell]) -> String {
    if path.is_empty() {
        return "No path".to_string();
    }

    path.iter()
        .map(|cell| format!("({},{})", cell.row, cell.col))
        .collect::<Vec<_>>()
        .join(" -> ")
}
