use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use waypoint_planner::config::{PlannerConfig, Strategy, TargetsConfig};
use waypoint_planner::targets::place_random_targets;
use waypoint_planner::{plan_route, Cell, Grid, RoutePlanner};

// Group and case IDs stay stable so results remain comparable across runs.

const START: Cell = Cell { row: 2, col: 2 };

/// Classic maze with `count` goals placed from a fixed seed
fn seeded_goals(count: usize, seed: u64) -> (Grid, Vec<Cell>) {
    let mut grid = Grid::classic_maze();
    let targets = TargetsConfig {
        min: count,
        max: count,
        seed,
        randomize: false,
    };
    let goals = match place_random_targets(&mut grid, &targets) {
        Ok(goals) => goals,
        Err(e) => panic!("classic maze has room for {} goals: {}", count, e),
    };
    (grid, goals)
}

fn planner_config(strategy: Strategy, parallel: bool) -> PlannerConfig {
    PlannerConfig {
        strategy,
        parallel,
        ..PlannerConfig::default()
    }
}

fn benches_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan.strategy");

    for count in [4usize, 6] {
        let (grid, goals) = seeded_goals(count, 168);
        for (case_id, config) in [
            ("exhaustive", planner_config(Strategy::Exhaustive, false)),
            ("parallel", planner_config(Strategy::Exhaustive, true)),
            ("held_karp", planner_config(Strategy::HeldKarp, false)),
        ] {
            let planner = RoutePlanner::new(&grid, config);
            group.throughput(Throughput::Elements(count as u64));
            group.bench_function(format!("{}/{}_goals", case_id, count), |b| {
                b.iter(|| {
                    let plan = planner.plan(black_box(START), black_box(&goals));
                    black_box(plan.map(|plan| plan.total_cost))
                })
            });
        }
    }

    group.finish();
}

/// Twenty seeded runs of the default planner, one target set per run
fn benches_repeated_runs(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan.runs");
    let scenarios: Vec<(Grid, Vec<Cell>)> = (1..=20u64)
        .map(|seed| seeded_goals(2 + (seed as usize % 3), seed))
        .collect();

    group.throughput(Throughput::Elements(scenarios.len() as u64));
    group.bench_function("twenty_seeded", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for (grid, goals) in &scenarios {
                if let Ok(plan) = plan_route(black_box(grid), START, black_box(goals)) {
                    total += plan.total_cost;
                }
            }
            black_box(total)
        })
    });

    group.finish();
}

criterion_group!(benches, benches_strategies, benches_repeated_runs);
criterion_main!(benches);
