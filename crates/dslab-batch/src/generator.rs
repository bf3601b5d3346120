//! Synthetic workload generator.

use std::fmt::Display;

use rand::distributions::uniform::SampleUniform;
use rand::distributions::Uniform;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::job::Job;

/// Inclusive range of integer values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRange<T> {
    pub min: T,
    pub max: T,
}

impl<T> ValueRange<T> {
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: PartialOrd + Display> ValueRange<T> {
    fn validate(&self, name: &str) -> Result<()> {
        if self.min > self.max {
            return Err(Error::InvalidConfig(format!(
                "{} range is empty: min {} > max {}",
                name, self.min, self.max
            )));
        }
        Ok(())
    }
}

impl<T: SampleUniform + Copy> ValueRange<T> {
    fn distribution(&self) -> Uniform<T> {
        Uniform::new_inclusive(self.min, self.max)
    }
}

/// Parameters of generated workload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of generated jobs.
    pub job_count: u32,
    /// Seed of the random number generator.
    pub seed: u64,
    /// Job arrival time in hours.
    pub arrival_time: ValueRange<u32>,
    pub cores: ValueRange<u32>,
    pub memory: ValueRange<u64>,
    /// Job execution time in hours.
    pub execution_time: ValueRange<u32>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            job_count: 150,
            seed: 123,
            arrival_time: ValueRange::new(0, 10),
            cores: ValueRange::new(1, 24),
            memory: ValueRange::new(1, 20),
            execution_time: ValueRange::new(1, 5),
        }
    }
}

impl GeneratorConfig {
    /// Checks that all ranges are non-empty and job demands and durations are positive.
    pub fn validate(&self) -> Result<()> {
        self.arrival_time.validate("arrival_time")?;
        self.cores.validate("cores")?;
        self.memory.validate("memory")?;
        self.execution_time.validate("execution_time")?;
        if self.cores.min == 0 || self.memory.min == 0 || self.execution_time.min == 0 {
            return Err(Error::InvalidConfig(
                "job cores, memory and execution time must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Generates jobs with parameters drawn uniformly from the configured ranges.
/// Job IDs are assigned sequentially starting from 0.
pub struct JobGenerator {
    config: GeneratorConfig,
    rng: Pcg64,
}

impl JobGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        let rng = Pcg64::seed_from_u64(config.seed);
        Ok(Self { config, rng })
    }

    pub fn generate(&mut self) -> Vec<Job> {
        let arrival_time = self.config.arrival_time.distribution();
        let cores = self.config.cores.distribution();
        let memory = self.config.memory.distribution();
        let execution_time = self.config.execution_time.distribution();

        (0..self.config.job_count)
            .map(|id| {
                Job::new(
                    id,
                    self.rng.sample(&arrival_time),
                    self.rng.sample(&cores),
                    self.rng.sample(&memory),
                    self.rng.sample(&execution_time),
                )
            })
            .collect()
    }
}
