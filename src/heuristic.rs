use crate::grid::Cell;

/// Manhattan distance between two cells.
///
/// Admissible and consistent for 4-connected grids with unit move cost, so the first
/// time A* dequeues the goal its cost is optimal.
pub fn manhattan(a: Cell, b: Cell) -> usize {
    a.row.abs_diff(b.row) + a.col.abs_diff(b.col)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetric_and_zero_on_self() {
        let a = Cell::new(2, 2);
        let b = Cell::new(7, 14);
        assert_eq!(manhattan(a, b), 17);
        assert_eq!(manhattan(b, a), 17);
        assert_eq!(manhattan(a, a), 0);
    }

    #[test]
    fn consistent_across_single_moves() {
        let goal = Cell::new(5, 5);
        for row in 0..10 {
            for col in 0..10 {
                let cell = Cell::new(row, col);
                for next in cell.neighbors_4() {
                    assert!(manhattan(cell, goal) <= 1 + manhattan(next, goal));
                }
            }
        }
    }
}
