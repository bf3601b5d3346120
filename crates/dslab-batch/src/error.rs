//! Simulation errors.

use thiserror::Error;

/// Errors returned by configuration loading, job intake and simulation runs.
///
/// A failed placement attempt is not an error: the job just stays pending until the next round.
#[derive(Debug, Error)]
pub enum Error {
    /// Job demand exceeds the total capacity of every node in the pool, so it can never be placed.
    #[error(
        "job {job_id} requires {cores} cores and {memory} memory, which no node can provide \
         (largest node capacity: {max_cores} cores, {max_memory} memory)"
    )]
    UnplaceableJob {
        job_id: u32,
        cores: u32,
        memory: u64,
        max_cores: u32,
        max_memory: u64,
    },

    #[error("unknown {kind} policy: {value:?}")]
    InvalidPolicySelector { kind: &'static str, value: String },

    /// A round has finished without placing any job while some jobs are still pending.
    /// Pool state changes only on placement, so all subsequent rounds would have the same outcome.
    #[error("run stalled at round {round}: no job was placed, {pending} jobs are still pending")]
    StalledRun { round: u64, pending: usize },

    #[error("run reached the limit of {limit} rounds, {pending} jobs are still pending")]
    RoundLimitExceeded { limit: u64, pending: usize },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
