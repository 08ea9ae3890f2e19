//! Configuration types for the scheduling system.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::logging::VERBOSITY_SILENT;

/// How the scheduler picks between the critical path method and simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Critical path method when there is a worker for every task, otherwise simulate.
    #[default]
    Auto,
    /// Always run the worker-constrained simulation.
    Simulation,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Auto => "auto",
            Strategy::Simulation => "simulation",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Strategy::Auto),
            "simulation" | "simulate" => Ok(Strategy::Simulation),
            other => Err(format!(
                "unknown scheduling strategy '{other}' (expected \"auto\" or \"simulation\")"
            )),
        }
    }
}

/// Configuration for algorithm selection and logging.
///
/// Read from the `[scheduler]` table of a job file; every field is optional.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchedulingConfig {
    pub strategy: Strategy,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    pub verbosity: u8,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Auto,
            verbosity: VERBOSITY_SILENT,
        }
    }
}

impl SchedulingConfig {
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }
}
