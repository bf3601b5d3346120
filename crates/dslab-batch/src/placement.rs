//! Job placement records.

use std::fmt::{Display, Formatter};
use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::job::Job;

/// Notification about a job placed on a node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub job_id: u32,
    pub node_id: u32,
    pub round: u64,
    pub arrival_day: u32,
    pub arrival_hour: u32,
    pub memory: u64,
    pub cores: u32,
    pub execution_time: u32,
}

impl Placement {
    pub fn new(job: &Job, node_id: u32, round: u64) -> Self {
        Self {
            job_id: job.id,
            node_id,
            round,
            arrival_day: job.arrival_day(),
            arrival_hour: job.arrival_hour(),
            memory: job.memory,
            cores: job.cores,
            execution_time: job.execution_time,
        }
    }
}

impl Display for Placement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "job {} placed on node {} (arrival day {}, hour {}, memory {}, cores {}, execution time {})",
            self.job_id,
            self.node_id,
            self.arrival_day,
            self.arrival_hour,
            self.memory,
            self.cores,
            self.execution_time
        )
    }
}

/// Writes placements as CSV, one row per placement.
pub fn write_placements_csv<W: Write>(placements: &[Placement], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for placement in placements {
        wtr.serialize(placement)?;
    }
    wtr.flush()?;
    Ok(())
}
