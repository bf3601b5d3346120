//! Tool for comparing policy combinations on a generated workload.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::config::{RunConfig, SimulationConfig};
use crate::error::Result;
use crate::generator::JobGenerator;
use crate::log_error;
use crate::monitoring::{write_utilization_csv, UtilizationSample};
use crate::placement::{write_placements_csv, Placement};
use crate::scheduler::{BatchScheduler, RunResult};

/// Contains result of one run.
#[derive(Serialize, Debug)]
pub struct RunOutcome {
    pub run: RunConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<RunResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Contains results of all runs and the utilization series covering all of them.
#[derive(Serialize, Debug)]
pub struct ExperimentResults {
    pub runs: Vec<RunOutcome>,
    /// Placements of all runs, including the ones made before a run failed.
    #[serde(skip)]
    pub placements: Vec<Placement>,
    #[serde(skip)]
    pub utilization: Vec<UtilizationSample>,
}

impl ExperimentResults {
    pub fn failed_runs(&self) -> usize {
        self.runs.iter().filter(|run| run.error.is_some()).count()
    }

    pub fn save_utilization<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_utilization_csv(&self.utilization, File::create(path)?)
    }

    pub fn save_placements<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_placements_csv(&self.placements, File::create(path)?)
    }

    /// Saves run results as JSON.
    pub fn save_summary<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        File::create(path)?.write_all(serde_json::to_string_pretty(&self)?.as_bytes())?;
        Ok(())
    }
}

/// Performs the configured runs one after another using a single scheduler.
pub struct Experiment {
    config: SimulationConfig,
}

impl Experiment {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Loads config from a YAML file.
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        Ok(Self::new(SimulationConfig::from_file(config_path)?))
    }

    /// Overrides the workload generation seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.workload.seed = seed;
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Generates the workload and performs all runs.
    ///
    /// A failed run is recorded in the results and does not stop the experiment,
    /// while a rejected workload fails the whole experiment.
    pub fn run(&self) -> Result<ExperimentResults> {
        let jobs = JobGenerator::new(self.config.workload.clone())?.generate();
        let mut scheduler = BatchScheduler::from_config(&self.config);
        let mut runs = Vec::with_capacity(self.config.runs.len());

        for (i, run) in self.config.runs.iter().enumerate() {
            if self.config.reset_pool_between_runs {
                scheduler.reset_pool();
                scheduler.clear_pending();
                scheduler.intake(jobs.clone())?;
            } else if i == 0 {
                scheduler.intake(jobs.clone())?;
            }

            let outcome = match scheduler.run(run.queue, run.fit) {
                Ok(result) => RunOutcome {
                    run: *run,
                    result: Some(result),
                    error: None,
                },
                Err(e) => {
                    log_error!(scheduler.context(), "run {}/{} failed: {}", run.queue, run.fit, e);
                    RunOutcome {
                        run: *run,
                        result: None,
                        error: Some(e.to_string()),
                    }
                }
            };
            runs.push(outcome);
        }

        Ok(ExperimentResults {
            runs,
            placements: scheduler.placements().to_vec(),
            utilization: scheduler.recorder().samples().to_vec(),
        })
    }
}
