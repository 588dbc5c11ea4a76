#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use waypoint_planner::{Cell, Grid};

/// Breadth-first distances from `start` to every reachable cell
pub fn bfs_distances(grid: &Grid, start: Cell) -> HashMap<Cell, usize> {
    let mut distances = HashMap::new();
    let mut queue = VecDeque::new();
    distances.insert(start, 0);
    queue.push_back(start);

    while let Some(cell) = queue.pop_front() {
        let d = distances[&cell];
        for next in cell.neighbors_4() {
            if grid.in_bounds(next) && grid.is_walkable(next) && !distances.contains_key(&next) {
                distances.insert(next, d + 1);
                queue.push_back(next);
            }
        }
    }
    distances
}

pub fn bfs_distance(grid: &Grid, from: Cell, to: Cell) -> Option<usize> {
    bfs_distances(grid, from).get(&to).copied()
}

/// Panics unless `path` walks from `start` in unit moves over walkable cells
pub fn assert_walkable_path(grid: &Grid, start: Cell, path: &[Cell]) {
    let mut previous = start;
    for (step, &cell) in path.iter().enumerate() {
        assert!(grid.is_walkable(cell), "step {} lands on a wall at {:?}", step, cell);
        let distance = previous.row.abs_diff(cell.row) + previous.col.abs_diff(cell.col);
        assert_eq!(distance, 1, "step {} jumps from {:?} to {:?}", step, previous, cell);
        previous = cell;
    }
}

/// Cheapest visiting order cost computed from BFS distances alone
pub fn brute_force_route_cost(grid: &Grid, start: Cell, goals: &[Cell]) -> Option<usize> {
    fn visit(
        grid: &Grid,
        current: Cell,
        remaining: &mut Vec<Cell>,
        spent: usize,
        best: &mut Option<usize>,
    ) {
        if remaining.is_empty() {
            if best.map_or(true, |b| spent < b) {
                *best = Some(spent);
            }
            return;
        }
        let distances = bfs_distances(grid, current);
        for i in 0..remaining.len() {
            let next = remaining.remove(i);
            if let Some(&d) = distances.get(&next) {
                visit(grid, next, remaining, spent + d, best);
            }
            remaining.insert(i, next);
        }
    }

    let mut best = None;
    visit(grid, start, &mut goals.to_vec(), 0, &mut best);
    best
}

/// 12x24 open grid with one wall block over rows 0-9, columns 10-12
pub fn single_block_grid() -> Grid {
    let mut blocked = Vec::new();
    for row in 0..=9 {
        for col in 10..=12 {
            blocked.push(Cell::new(row, col));
        }
    }
    Grid::with_blocked(12, 24, &blocked)
}

/// 5x5 open grid whose centre cell is walled in on all four sides
pub fn enclosed_centre_grid() -> Grid {
    Grid::from_layout(
        "\
.....
..#..
.#.#.
..#..
.....
",
    )
    .expect("fixture layout is valid")
}

pub fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("waypoint_planner_{}_{}", std::process::id(), name))
}
