//! Headless route planner
//!
//! Loads the configured maze (or a saved scenario), places targets, plans the best
//! visiting order and writes the text/JSON reports.

use std::env;
use std::path::Path;
use std::process;

use log::error;
use waypoint_planner::config::{Config, DEFAULT_CONFIG_PATH};
use waypoint_planner::session::{init_logging, plan_grid, prepare_grid, write_outputs};
use waypoint_planner::{PathOverlay, PlanError, Scenario};

struct Args {
    config_path: String,
    scenario: Option<String>,
    save_scenario: Option<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        config_path: DEFAULT_CONFIG_PATH.to_string(),
        scenario: None,
        save_scenario: None,
    };

    let mut iter = env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--scenario" => {
                args.scenario = Some(iter.next().ok_or("--scenario needs a path")?);
            }
            "--save-scenario" => {
                args.save_scenario = Some(iter.next().ok_or("--save-scenario needs a path")?);
            }
            "-h" | "--help" => return Err(String::new()),
            other if other.starts_with("--") => return Err(format!("unknown option {}", other)),
            other => args.config_path = other.to_string(),
        }
    }
    Ok(args)
}

fn run(args: &Args, config: &Config) -> Result<bool, PlanError> {
    let grid = match &args.scenario {
        Some(path) => Scenario::load_from_file(path)?.to_grid(),
        None => prepare_grid(config)?,
    };

    if let Some(path) = &args.save_scenario {
        Scenario::from_grid(&grid)?.save_to_file(path)?;
    }

    let (plan, report) = plan_grid(&grid, &config.planner)?;

    println!("{}", report.summary());
    println!("Maze with final path (*):");
    println!("{}", PathOverlay::new(&grid, &plan.path).render_ascii());

    write_outputs(&report, config)?;
    Ok(report.is_feasible())
}

fn main() {
    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            if !message.is_empty() {
                eprintln!("{}", message);
            }
            eprintln!("Usage: plan_route [config.toml] [--scenario <file.json>] [--save-scenario <file.json>]");
            process::exit(2);
        }
    };

    let (config, source) = Config::read(&args.config_path);
    init_logging(&config.logging);
    source.report(Path::new(&args.config_path));

    match run(&args, &config) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            error!("{}", e);
            process::exit(2);
        }
    }
}
