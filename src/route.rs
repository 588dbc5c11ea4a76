//! Multi-goal route optimisation.
//!
//! The planner chains single-pair A* searches from the start through every goal and keeps
//! the cheapest complete visiting order. Two exact strategies are available:
//!
//! - **Exhaustive** (default): every ordering of the goals, `O(k!)` orderings each costing
//!   up to `k` searches. Practical up to roughly 8-10 goals; larger sets are refused with
//!   [`PlanError::TooManyGoals`] instead of being truncated.
//! - **Held-Karp**: one search per ordered pair of waypoints followed by a subset dynamic
//!   programme, `O(k^2)` searches plus `O(2^k k^2)` table work.
//!
//! "No feasible route" is a normal result ([`RoutePlan::empty`]), not an error.

use crate::config::{PlannerConfig, Strategy};
use crate::error::PlanError;
use crate::grid::{Cell, Grid};
use crate::pathfinding::{find_path, validate_endpoint, PathResult};
use crate::permutations::{factorial, nth_permutation, Permutations};
use log::{debug, info};
use rayon::prelude::*;

/// Hard ceiling for the Held-Karp table (2^k * k entries)
pub const HELD_KARP_MAX_GOALS: usize = 16;

/// Orderings handed to a worker at a time when searching in parallel
const PARALLEL_CHUNK: usize = 64;

/// Best route found by the planner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePlan {
    /// Concatenated legs, start excluded
    pub path: Vec<Cell>,
    /// Goals in visiting order; `None` when no ordering could be completed
    pub order: Option<Vec<Cell>>,
    /// Number of moves along `path`
    pub total_cost: usize,
    /// Cells expanded by the searches behind this route
    pub nodes_expanded: usize,
    /// Candidate orderings considered
    pub orderings_evaluated: usize,
}

impl RoutePlan {
    /// Result for a goal set no ordering can complete
    pub fn empty() -> Self {
        RoutePlan {
            path: Vec::new(),
            order: None,
            total_cost: 0,
            nodes_expanded: 0,
            orderings_evaluated: 0,
        }
    }

    /// Route for an empty goal set: nothing to visit, nothing to pay
    pub fn trivial() -> Self {
        RoutePlan {
            order: Some(Vec::new()),
            orderings_evaluated: 1,
            ..Self::empty()
        }
    }

    pub fn is_feasible(&self) -> bool {
        self.order.is_some()
    }

    /// Route including the start cell
    pub fn full_path(&self, start: Cell) -> Vec<Cell> {
        std::iter::once(start).chain(self.path.iter().copied()).collect()
    }

    /// 1-based row-major labels of the full route
    pub fn cell_numbers(&self, start: Cell, cols: usize) -> Vec<usize> {
        self.full_path(start)
            .iter()
            .map(|cell| cell.cell_number(cols))
            .collect()
    }
}

/// Multi-goal route optimiser over a read-only grid
pub struct RoutePlanner<'a> {
    grid: &'a Grid,
    config: PlannerConfig,
}

impl<'a> RoutePlanner<'a> {
    pub fn new(grid: &'a Grid, config: PlannerConfig) -> Self {
        Self { grid, config }
    }

    /// Create with default configuration
    pub fn with_defaults(grid: &'a Grid) -> Self {
        Self::new(grid, PlannerConfig::default())
    }

    /// Find the cheapest route from `start` through every goal
    pub fn plan(&self, start: Cell, goals: &[Cell]) -> Result<RoutePlan, PlanError> {
        validate_endpoint(self.grid, start)?;
        for &goal in goals {
            validate_endpoint(self.grid, goal)?;
        }

        if goals.is_empty() {
            return Ok(RoutePlan::trivial());
        }

        let plan = match self.config.strategy {
            Strategy::Exhaustive => {
                self.check_goal_limit(goals.len(), self.config.max_goals)?;
                if self.config.parallel {
                    self.plan_exhaustive_parallel(start, goals)?
                } else {
                    self.plan_exhaustive(start, goals)?
                }
            }
            Strategy::HeldKarp => {
                self.check_goal_limit(goals.len(), HELD_KARP_MAX_GOALS)?;
                self.plan_held_karp(start, goals)?
            }
        };

        if plan.is_feasible() {
            info!(
                "[plan] {} goals via {}: cost {}, {} expanded, {} orderings",
                goals.len(),
                self.config.strategy.name(),
                plan.total_cost,
                plan.nodes_expanded,
                plan.orderings_evaluated
            );
            debug!("[plan] order {:?}", plan.order);
        } else {
            info!(
                "[plan] no feasible route through {} goals ({} orderings tried)",
                goals.len(),
                plan.orderings_evaluated
            );
        }

        Ok(plan)
    }

    fn check_goal_limit(&self, count: usize, limit: usize) -> Result<(), PlanError> {
        if count > limit {
            return Err(PlanError::TooManyGoals {
                count,
                limit,
                strategy: self.config.strategy.name(),
            });
        }
        Ok(())
    }

    /// Walk every ordering in lexicographic order; the first strictly cheapest one wins
    fn plan_exhaustive(&self, start: Cell, goals: &[Cell]) -> Result<RoutePlan, PlanError> {
        let mut best: Option<RoutePlan> = None;
        let mut evaluated = 0;

        for ordering in Permutations::new(goals.len()) {
            evaluated += 1;
            if let Some(candidate) = self.evaluate_ordering(start, goals, &ordering)? {
                if best
                    .as_ref()
                    .map_or(true, |incumbent| candidate.total_cost < incumbent.total_cost)
                {
                    best = Some(candidate);
                }
            }
        }

        Ok(finish(best, evaluated))
    }

    /// Same result as `plan_exhaustive`, with orderings spread over the rayon pool.
    /// Ties are settled by the lowest ordering index, so scheduling never changes the answer.
    fn plan_exhaustive_parallel(
        &self,
        start: Cell,
        goals: &[Cell],
    ) -> Result<RoutePlan, PlanError> {
        let k = goals.len();
        let total = factorial(k).ok_or(PlanError::TooManyGoals {
            count: k,
            limit: self.config.max_goals,
            strategy: self.config.strategy.name(),
        })?;
        let chunk_count = total.div_ceil(PARALLEL_CHUNK);

        let chunk_bests = (0..chunk_count)
            .into_par_iter()
            .map(|chunk| -> Result<Option<(usize, RoutePlan)>, PlanError> {
                let first = chunk * PARALLEL_CHUNK;
                let len = PARALLEL_CHUNK.min(total - first);
                let orderings = Permutations::starting_at(nth_permutation(k, first)).take(len);

                let mut best: Option<(usize, RoutePlan)> = None;
                for (offset, ordering) in orderings.enumerate() {
                    if let Some(candidate) = self.evaluate_ordering(start, goals, &ordering)? {
                        if best
                            .as_ref()
                            .map_or(true, |(_, incumbent)| candidate.total_cost < incumbent.total_cost)
                        {
                            best = Some((first + offset, candidate));
                        }
                    }
                }
                Ok(best)
            })
            .collect::<Result<Vec<_>, PlanError>>()?;

        let best = chunk_bests
            .into_iter()
            .flatten()
            .min_by_key(|(index, plan)| (plan.total_cost, *index))
            .map(|(_, plan)| plan);

        Ok(finish(best, total))
    }

    /// Chain searches start -> goals[ordering[0]] -> ...; `None` as soon as a leg fails
    fn evaluate_ordering(
        &self,
        start: Cell,
        goals: &[Cell],
        ordering: &[usize],
    ) -> Result<Option<RoutePlan>, PlanError> {
        let mut current = start;
        let mut path = Vec::new();
        let mut nodes_expanded = 0;

        for &index in ordering {
            let goal = goals[index];
            let leg = find_path(self.grid, current, goal)?;
            if !leg.found {
                debug!(
                    "[plan] ordering {:?} abandoned: ({},{}) -> ({},{}) unreachable",
                    ordering, current.row, current.col, goal.row, goal.col
                );
                return Ok(None);
            }
            nodes_expanded += leg.nodes_expanded;
            path.extend(leg.path);
            current = goal;
        }

        Ok(Some(RoutePlan {
            total_cost: path.len(),
            path,
            order: Some(ordering.iter().map(|&index| goals[index]).collect()),
            nodes_expanded,
            orderings_evaluated: 0,
        }))
    }

    /// Exact open-path ordering via the Held-Karp subset recurrence
    ///
    /// Waypoint 0 is the start, waypoint `i + 1` is `goals[i]`. `nodes_expanded` counts every
    /// pairwise search, since all of them are needed to prove the order optimal.
    fn plan_held_karp(&self, start: Cell, goals: &[Cell]) -> Result<RoutePlan, PlanError> {
        let k = goals.len();
        let waypoints: Vec<Cell> = std::iter::once(start).chain(goals.iter().copied()).collect();

        let mut nodes_expanded = 0;
        let mut legs: Vec<Vec<Option<PathResult>>> = vec![vec![None; k + 1]; k + 1];
        for from in 0..=k {
            for to in 1..=k {
                if from == to {
                    continue;
                }
                let leg = find_path(self.grid, waypoints[from], waypoints[to])?;
                nodes_expanded += leg.nodes_expanded;
                if leg.found {
                    legs[from][to] = Some(leg);
                }
            }
        }
        let leg_cost = |from: usize, to: usize| legs[from][to].as_ref().map(PathResult::cost);

        // cost[mask][last]: cheapest walk from the start covering `mask`, ending at goal `last`
        let full = (1usize << k) - 1;
        let mut cost: Vec<Vec<Option<usize>>> = vec![vec![None; k]; full + 1];
        let mut parent: Vec<Vec<Option<usize>>> = vec![vec![None; k]; full + 1];

        for goal in 0..k {
            cost[1 << goal][goal] = leg_cost(0, goal + 1);
        }
        for mask in 1..=full {
            for last in 0..k {
                let Some(base) = cost[mask][last] else {
                    continue;
                };
                for next in 0..k {
                    if mask & (1 << next) != 0 {
                        continue;
                    }
                    let Some(step) = leg_cost(last + 1, next + 1) else {
                        continue;
                    };
                    let grown = mask | (1 << next);
                    let candidate = base + step;
                    if cost[grown][next].map_or(true, |known| candidate < known) {
                        cost[grown][next] = Some(candidate);
                        parent[grown][next] = Some(last);
                    }
                }
            }
        }

        let Some((mut last, _)) = (0..k)
            .filter_map(|last| cost[full][last].map(|total| (last, total)))
            .min_by_key(|&(last, total)| (total, last))
        else {
            return Ok(RoutePlan {
                nodes_expanded,
                ..finish(None, 1)
            });
        };

        // Walk the parent table back to recover the visiting order
        let mut ordering = Vec::with_capacity(k);
        let mut mask = full;
        loop {
            ordering.push(last);
            let previous = parent[mask][last];
            mask &= !(1 << last);
            match previous {
                Some(p) => last = p,
                None => break,
            }
        }
        ordering.reverse();

        let mut path = Vec::new();
        let mut from = 0;
        for &goal in &ordering {
            if let Some(leg) = &legs[from][goal + 1] {
                path.extend(leg.path.iter().copied());
            }
            from = goal + 1;
        }

        Ok(RoutePlan {
            total_cost: path.len(),
            path,
            order: Some(ordering.iter().map(|&index| goals[index]).collect()),
            nodes_expanded,
            orderings_evaluated: 1,
        })
    }
}

fn finish(best: Option<RoutePlan>, evaluated: usize) -> RoutePlan {
    let mut plan = best.unwrap_or_else(RoutePlan::empty);
    plan.orderings_evaluated = evaluated;
    plan
}

/// Plan with the default exhaustive configuration
pub fn plan_route(grid: &Grid, start: Cell, goals: &[Cell]) -> Result<RoutePlan, PlanError> {
    RoutePlanner::with_defaults(grid).plan(start, goals)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> Grid {
        Grid::new(1, 9)
    }

    #[test]
    fn trivial_route_for_no_goals() {
        let grid = corridor();
        let plan = plan_route(&grid, Cell::new(0, 0), &[]).unwrap();
        assert!(plan.is_feasible());
        assert_eq!(plan.total_cost, 0);
        assert!(plan.path.is_empty());
        assert_eq!(plan.full_path(Cell::new(0, 0)), vec![Cell::new(0, 0)]);
    }

    #[test]
    fn goal_on_start_is_a_zero_length_leg() {
        let grid = corridor();
        let start = Cell::new(0, 2);
        let plan = plan_route(&grid, start, &[start, Cell::new(0, 4)]).unwrap();
        assert!(plan.is_feasible());
        assert_eq!(plan.total_cost, 2);
    }

    #[test]
    fn cell_numbers_are_one_based() {
        let grid = corridor();
        let plan = plan_route(&grid, Cell::new(0, 0), &[Cell::new(0, 2)]).unwrap();
        assert_eq!(plan.cell_numbers(Cell::new(0, 0), grid.cols), vec![1, 2, 3]);
    }

    #[test]
    fn orderings_counted() {
        let grid = corridor();
        let goals = [Cell::new(0, 1), Cell::new(0, 5), Cell::new(0, 8)];
        let plan = plan_route(&grid, Cell::new(0, 0), &goals).unwrap();
        assert_eq!(plan.orderings_evaluated, 6);
        assert_eq!(plan.total_cost, 8);
        assert_eq!(plan.order, Some(goals.to_vec()));
    }

    #[test]
    fn too_many_goals_is_refused() {
        let grid = Grid::new(4, 4);
        let goals: Vec<Cell> = (0..4).flat_map(|r| (0..3).map(move |c| Cell::new(r, c))).collect();
        let err = plan_route(&grid, Cell::new(0, 3), &goals).unwrap_err();
        assert!(matches!(
            err,
            PlanError::TooManyGoals { count: 12, limit: 10, .. }
        ));
    }
}
