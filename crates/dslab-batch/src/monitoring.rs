//! Recording of resource pool utilization.

use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::resource_pool::ResourcePool;

/// Header of the utilization CSV file.
pub const UTILIZATION_CSV_HEADER: [&str; 3] = ["Time", "CPU Utilization", "Memory Utilization"];

/// Mean utilization (in percents) of the pool nodes at the end of a round.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UtilizationSample {
    #[serde(rename = "Time")]
    pub round: u64,
    #[serde(rename = "CPU Utilization")]
    pub cpu_utilization: f64,
    #[serde(rename = "Memory Utilization")]
    pub memory_utilization: f64,
}

/// Append-only time series of utilization samples, one per round.
/// Rounds of consecutive runs are stored in the same series.
#[derive(Clone, Debug, Default)]
pub struct UtilizationRecorder {
    samples: Vec<UtilizationSample>,
}

impl UtilizationRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes mean CPU and memory utilization across the pool nodes and appends the sample.
    pub fn capture(&mut self, round: u64, pool: &ResourcePool) -> &UtilizationSample {
        self.samples.push(UtilizationSample {
            round,
            cpu_utilization: pool.average_cpu_utilization(),
            memory_utilization: pool.average_memory_utilization(),
        });
        &self.samples[self.samples.len() - 1]
    }

    pub fn samples(&self) -> &[UtilizationSample] {
        &self.samples
    }

    /// Writes samples as CSV with the header row, even if there are no samples.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        write_utilization_csv(&self.samples, writer)
    }
}

/// Writes utilization samples as CSV with the header row.
pub fn write_utilization_csv<W: Write>(samples: &[UtilizationSample], writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(UTILIZATION_CSV_HEADER)?;
    for sample in samples {
        wtr.serialize(sample)?;
    }
    wtr.flush()?;
    Ok(())
}
