use crate::config::TargetsConfig;
use crate::error::PlanError;
use crate::grid::{Cell, CellKind, Grid};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Scatter between `config.min` and `config.max` goals over the free cells of `grid`
///
/// Existing goals are cleared first. With a seed the placement is reproducible.
pub fn place_random_targets(grid: &mut Grid, config: &TargetsConfig) -> Result<Vec<Cell>, PlanError> {
    let mut rng = match config.effective_seed() {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    place_targets_with(grid, config.min, config.max, &mut rng)
}

/// Placement with a caller-supplied random source
pub fn place_targets_with<R: Rng>(
    grid: &mut Grid,
    min: usize,
    max: usize,
    rng: &mut R,
) -> Result<Vec<Cell>, PlanError> {
    if min > max {
        return Err(PlanError::Targets(format!(
            "minimum {} is larger than maximum {}",
            min, max
        )));
    }

    // Current goals become free again once cleared, so they count as room
    let room = grid.free_cells().len() + grid.goals().len();
    let count = rng.random_range(min..=max);
    if count > room {
        return Err(PlanError::Targets(format!(
            "{} targets requested but only {} free cells",
            count, room
        )));
    }

    grid.clear_goals();
    let mut free = grid.free_cells();

    free.shuffle(rng);
    let mut targets: Vec<Cell> = free.into_iter().take(count).collect();
    for &cell in &targets {
        grid.set_kind(cell, CellKind::Goal);
    }
    targets.sort();

    debug!("[targets] placed {} goals: {:?}", targets.len(), targets);
    Ok(targets)
}
