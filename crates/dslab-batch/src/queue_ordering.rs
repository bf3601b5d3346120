//! Queue ordering policies.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;
use crate::job::Job;

/// Defines the order in which pending jobs are offered to the fit algorithm.
///
/// The order is established once at the start of a run. All orderings are stable,
/// so jobs with equal keys keep their intake order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum QueueOrdering {
    /// First come, first served: by arrival time.
    #[serde(rename = "FCFS")]
    Fcfs,
    /// By job weight (cores * memory * execution time).
    #[serde(rename = "smallest")]
    SmallestJobFirst,
    /// By execution time.
    #[serde(rename = "duration")]
    ShortestDurationFirst,
}

impl QueueOrdering {
    /// Sorts jobs in place.
    pub fn order(&self, jobs: &mut [Job]) {
        match self {
            QueueOrdering::Fcfs => jobs.sort_by_key(|job| job.arrival_time),
            QueueOrdering::SmallestJobFirst => jobs.sort_by_key(|job| job.weight()),
            QueueOrdering::ShortestDurationFirst => jobs.sort_by_key(|job| job.execution_time),
        }
    }

    /// Returns the policy name used in configs.
    pub fn as_str(&self) -> &'static str {
        match self {
            QueueOrdering::Fcfs => "FCFS",
            QueueOrdering::SmallestJobFirst => "smallest",
            QueueOrdering::ShortestDurationFirst => "duration",
        }
    }
}

impl FromStr for QueueOrdering {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FCFS" => Ok(QueueOrdering::Fcfs),
            "smallest" => Ok(QueueOrdering::SmallestJobFirst),
            "duration" => Ok(QueueOrdering::ShortestDurationFirst),
            _ => Err(Error::InvalidPolicySelector {
                kind: "queue ordering",
                value: s.to_string(),
            }),
        }
    }
}

impl Display for QueueOrdering {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
