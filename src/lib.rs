pub mod config;
pub mod error;
pub mod grid;
pub mod heuristic;
pub mod pathfinding;
pub mod permutations;
pub mod report;
pub mod route;
pub mod scenario;
pub mod session;
pub mod targets;

pub use config::{Config, PlannerConfig, Strategy};
pub use error::{GridError, PlanError};
pub use grid::{Cell, CellKind, Grid, PathOverlay};
pub use heuristic::manhattan;
pub use pathfinding::{find_path, PathResult};
pub use report::RouteReport;
pub use route::{plan_route, RoutePlan, RoutePlanner};
pub use scenario::Scenario;
