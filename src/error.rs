use crate::grid::Cell;
use thiserror::Error;

/// Errors raised while reading a text maze layout
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("layout contains no grid rows")]
    Empty,

    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown layout character {ch:?} at ({row},{col})")]
    UnknownSymbol { ch: char, row: usize, col: usize },
}

/// Errors raised by the planner for input it cannot search
///
/// An unreachable goal is not an error: searches report it as an empty result.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("cell {cell} is outside the {rows}x{cols} grid")]
    OutOfBounds { cell: Cell, rows: usize, cols: usize },

    #[error("cell {0} is a wall")]
    Blocked(Cell),

    #[error("grid has no start cell")]
    NoStart,

    #[error("{count} goals exceeds the limit of {limit} for the {strategy} strategy")]
    TooManyGoals {
        count: usize,
        limit: usize,
        strategy: &'static str,
    },

    #[error("cannot place targets: {0}")]
    Targets(String),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}
