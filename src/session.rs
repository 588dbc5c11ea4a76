//! Glue shared by the viewer and the command-line planner.

use crate::config::{Config, LoggingConfig, MazeConfig, PlannerConfig};
use crate::error::PlanError;
use crate::grid::Grid;
use crate::report::RouteReport;
use crate::route::{RoutePlan, RoutePlanner};
use crate::targets::place_random_targets;
use log::info;
use std::fs;
use std::time::Instant;

/// Initialise env_logger; RUST_LOG wins over the configured level
pub fn init_logging(config: &LoggingConfig) {
    let env = env_logger::Env::default().default_filter_or(config.level.as_str());
    // A second init (e.g. the viewer reloading) is harmless
    let _ = env_logger::Builder::from_env(env).format_timestamp_millis().try_init();
}

/// Grid from the configured layout file, or the classic maze
pub fn load_grid(config: &MazeConfig) -> Result<Grid, PlanError> {
    if config.layout_path.is_empty() {
        return Ok(Grid::classic_maze());
    }
    let text = fs::read_to_string(&config.layout_path)?;
    let grid = Grid::from_layout(&text)?;
    info!(
        "Loaded {}x{} layout from {}",
        grid.rows, grid.cols, config.layout_path
    );
    Ok(grid)
}

/// Grid with targets placed as configured, unless the layout already carries goals
pub fn prepare_grid(config: &Config) -> Result<Grid, PlanError> {
    let mut grid = load_grid(&config.maze)?;
    if grid.goals().is_empty() {
        place_random_targets(&mut grid, &config.targets)?;
    }
    Ok(grid)
}

/// Plan from the grid's own start and goal markers and time the search
pub fn plan_grid(grid: &Grid, config: &PlannerConfig) -> Result<(RoutePlan, RouteReport), PlanError> {
    let start = grid.start().ok_or(PlanError::NoStart)?;
    let goals = grid.goals();

    let started = Instant::now();
    let plan = RoutePlanner::new(grid, config.clone()).plan(start, &goals)?;
    let elapsed = started.elapsed();

    let report = RouteReport::new(&plan, start, grid.cols, goals.len(), elapsed);
    Ok((plan, report))
}

/// Write the text and (if configured) JSON reports
pub fn write_outputs(report: &RouteReport, config: &Config) -> Result<(), PlanError> {
    if !config.output.text_path.is_empty() {
        report.write_text(&config.output.text_path)?;
        info!("Path saved to {}", config.output.text_path);
    }
    if !config.output.json_path.is_empty() {
        report.write_json(&config.output.json_path)?;
        info!("Report saved to {}", config.output.json_path);
    }
    Ok(())
}
