//! Batch job.

use serde::{Deserialize, Serialize};

/// Number of hours in a day, used to split arrival time into day and hour.
pub const HOURS_PER_DAY: u32 = 24;

/// Immutable description of a job: arrival time and duration in hours, plus resource demand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: u32,
    pub arrival_time: u32,
    pub cores: u32,
    pub memory: u64,
    pub execution_time: u32,
}

impl Job {
    pub fn new(id: u32, arrival_time: u32, cores: u32, memory: u64, execution_time: u32) -> Self {
        Self {
            id,
            arrival_time,
            cores,
            memory,
            execution_time,
        }
    }

    /// Resource-time footprint of the job: cores * memory * execution time.
    /// Saturates at `u64::MAX` for huge demands.
    pub fn weight(&self) -> u64 {
        (self.cores as u64)
            .saturating_mul(self.memory)
            .saturating_mul(self.execution_time as u64)
    }

    pub fn arrival_day(&self) -> u32 {
        self.arrival_time / HOURS_PER_DAY
    }

    pub fn arrival_hour(&self) -> u32 {
        self.arrival_time % HOURS_PER_DAY
    }
}
