//! Simulation configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::fit_algorithm::FitPolicy;
use crate::generator::GeneratorConfig;
use crate::queue_ordering::QueueOrdering;
use crate::retry::DEFAULT_MAX_ATTEMPTS;

/// Holds raw simulation config parsed from YAML file.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Default)]
struct RawSimulationConfig {
    pub node_count: Option<u32>,
    pub node_cores: Option<u32>,
    pub node_memory: Option<u64>,
    pub max_attempts: Option<u32>,
    pub max_rounds: Option<u64>,
    pub skip_unplaceable_jobs: Option<bool>,
    pub reset_pool_between_runs: Option<bool>,
    pub workload: Option<GeneratorConfig>,
    pub runs: Option<Vec<RawRunConfig>>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
struct RawRunConfig {
    pub queue: String,
    pub fit: String,
}

/// Policies used in a single simulation run.
#[derive(Debug, PartialEq, Eq, Serialize, Clone, Copy)]
pub struct RunConfig {
    pub queue: QueueOrdering,
    pub fit: FitPolicy,
}

impl RunConfig {
    pub fn new(queue: QueueOrdering, fit: FitPolicy) -> Self {
        Self { queue, fit }
    }

    /// Parses policy selectors, failing on unknown names.
    pub fn parse(queue: &str, fit: &str) -> Result<Self> {
        Ok(Self {
            queue: queue.parse()?,
            fit: fit.parse()?,
        })
    }
}

/// Represents simulation configuration.
#[derive(Debug, PartialEq, Serialize, Clone)]
pub struct SimulationConfig {
    /// Number of worker nodes.
    pub node_count: u32,
    /// CPU cores of each node.
    pub node_cores: u32,
    /// Memory of each node.
    pub node_memory: u64,
    /// Number of placement attempts per job per round.
    pub max_attempts: u32,
    /// Maximum number of rounds in a single run.
    pub max_rounds: u64,
    /// Whether to drop jobs exceeding node capacity at intake instead of failing.
    pub skip_unplaceable_jobs: bool,
    /// Whether each run starts on empty nodes with a fresh copy of the workload.
    /// Otherwise allocations are kept between runs and the workload is submitted only once.
    pub reset_pool_between_runs: bool,
    /// Generated workload.
    pub workload: GeneratorConfig,
    /// Runs performed one after another.
    pub runs: Vec<RunConfig>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            node_count: 128,
            node_cores: 24,
            node_memory: 64,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            max_rounds: 10000,
            skip_unplaceable_jobs: false,
            reset_pool_between_runs: true,
            workload: GeneratorConfig::default(),
            runs: default_runs(),
        }
    }
}

impl SimulationConfig {
    /// Creates simulation config by reading parameter values from YAML file
    /// (uses default values if some parameters are absent).
    pub fn from_file<P: AsRef<Path>>(file_name: P) -> Result<Self> {
        Self::from_yaml(&std::fs::read_to_string(file_name)?)
    }

    /// Creates simulation config from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let raw: RawSimulationConfig = if yaml.trim().is_empty() {
            RawSimulationConfig::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawSimulationConfig) -> Result<Self> {
        let runs = match raw.runs {
            Some(runs) => runs
                .iter()
                .map(|run| RunConfig::parse(&run.queue, &run.fit))
                .collect::<Result<Vec<_>>>()?,
            None => default_runs(),
        };
        let default = Self::default();
        let config = Self {
            node_count: raw.node_count.unwrap_or(default.node_count),
            node_cores: raw.node_cores.unwrap_or(default.node_cores),
            node_memory: raw.node_memory.unwrap_or(default.node_memory),
            max_attempts: raw.max_attempts.unwrap_or(default.max_attempts),
            max_rounds: raw.max_rounds.unwrap_or(default.max_rounds),
            skip_unplaceable_jobs: raw.skip_unplaceable_jobs.unwrap_or(default.skip_unplaceable_jobs),
            reset_pool_between_runs: raw.reset_pool_between_runs.unwrap_or(default.reset_pool_between_runs),
            workload: raw.workload.unwrap_or(default.workload),
            runs,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks parameter values.
    pub fn validate(&self) -> Result<()> {
        if self.node_count == 0 {
            return Err(Error::InvalidConfig("node_count must be positive".to_string()));
        }
        if self.node_cores == 0 || self.node_memory == 0 {
            return Err(Error::InvalidConfig("node capacity must be positive".to_string()));
        }
        if self.max_attempts == 0 {
            return Err(Error::InvalidConfig("max_attempts must be positive".to_string()));
        }
        if self.max_rounds == 0 {
            return Err(Error::InvalidConfig("max_rounds must be positive".to_string()));
        }
        self.workload.validate()
    }
}

/// The three runs compared by default: FCFS + first fit, smallest + best fit, duration + worst fit.
pub fn default_runs() -> Vec<RunConfig> {
    vec![
        RunConfig::new(QueueOrdering::Fcfs, FitPolicy::FirstFit),
        RunConfig::new(QueueOrdering::SmallestJobFirst, FitPolicy::BestFit),
        RunConfig::new(QueueOrdering::ShortestDurationFirst, FitPolicy::WorstFit),
    ]
}
