use crate::error::PlanError;
use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub maze: MazeConfig,
    #[serde(default)]
    pub targets: TargetsConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MazeConfig {
    /// Text layout file; empty means the built-in classic maze
    #[serde(default)]
    pub layout_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TargetsConfig {
    #[serde(default = "default_min_targets")]
    pub min: usize,
    #[serde(default = "default_max_targets")]
    pub max: usize,
    /// Fixed seed for reproducible placement
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Ignore `seed` and draw from OS entropy
    #[serde(default)]
    pub randomize: bool,
}

impl TargetsConfig {
    pub fn effective_seed(&self) -> Option<u64> {
        if self.randomize {
            None
        } else {
            Some(self.seed)
        }
    }
}

/// How the optimizer searches goal orderings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Try every ordering; exact, O(k!) orderings
    #[default]
    Exhaustive,
    /// Subset dynamic programme over pairwise leg costs; exact, O(2^k k^2)
    HeldKarp,
}

impl Strategy {
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Exhaustive => "exhaustive",
            Strategy::HeldKarp => "held_karp",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub strategy: Strategy,
    /// Largest goal count accepted by the exhaustive strategy
    #[serde(default = "default_max_goals")]
    pub max_goals: usize,
    /// Spread exhaustive orderings over the rayon thread pool
    #[serde(default)]
    pub parallel: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_text_path")]
    pub text_path: String,
    /// Empty disables the JSON report
    #[serde(default = "default_json_path")]
    pub json_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
    /// Delay between animation steps
    #[serde(default = "default_step_interval_ms")]
    pub step_interval_ms: u64,
    #[serde(default = "default_show_cell_numbers")]
    pub show_cell_numbers: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// env_logger filter used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default values
fn default_min_targets() -> usize { 2 }
fn default_max_targets() -> usize { 4 }
fn default_seed() -> u64 { 168 }
fn default_max_goals() -> usize { 10 }
fn default_text_path() -> String { "optimal_path.txt".to_string() }
fn default_json_path() -> String { "optimal_path.json".to_string() }
fn default_window_title() -> String { "Waypoint Planner".to_string() }
fn default_cell_size() -> f32 { 36.0 }
fn default_step_interval_ms() -> u64 { 120 }
fn default_show_cell_numbers() -> bool { true }
fn default_log_level() -> String { "info".to_string() }

impl Default for TargetsConfig {
    fn default() -> Self {
        Self {
            min: default_min_targets(),
            max: default_max_targets(),
            seed: default_seed(),
            randomize: false,
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            max_goals: default_max_goals(),
            parallel: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            text_path: default_text_path(),
            json_path: default_json_path(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            cell_size: default_cell_size(),
            step_interval_ms: default_step_interval_ms(),
            show_cell_numbers: default_show_cell_numbers(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// How a configuration file was obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Loaded,
    Missing,
    /// Parse error message; defaults were used instead
    Invalid(String),
}

impl Config {
    /// Load `config.toml` from the working directory
    pub fn load() -> Self {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from file, or use defaults if it is missing or invalid
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let (config, source) = Self::read(&path);
        source.report(path.as_ref());
        config
    }

    /// Like `load_from`, but leaves the diagnostics to the caller.
    /// Binaries use this so the outcome is logged once the logger exists.
    pub fn read<P: AsRef<Path>>(path: P) -> (Self, ConfigSource) {
        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(config) => (config, ConfigSource::Loaded),
                Err(e) => (Config::default(), ConfigSource::Invalid(e.to_string())),
            },
            Err(_) => (Config::default(), ConfigSource::Missing),
        }
    }

    pub fn parse(contents: &str) -> Result<Self, PlanError> {
        Ok(toml::from_str(contents)?)
    }
}

impl ConfigSource {
    /// Log the outcome of `Config::read`
    pub fn report(&self, path: &Path) {
        match self {
            ConfigSource::Loaded => info!("Loaded configuration from {}", path.display()),
            ConfigSource::Missing => {
                info!("No {} found, using default configuration", path.display())
            }
            ConfigSource::Invalid(message) => {
                warn!("Failed to parse {}: {}", path.display(), message);
                warn!("Using default configuration");
            }
        }
    }
}
