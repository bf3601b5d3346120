//! Fit algorithms.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::fit_algorithms::best_fit::BestFit;
use crate::fit_algorithms::first_fit::FirstFit;
use crate::fit_algorithms::worst_fit::WorstFit;
use crate::job::Job;
use crate::resource_pool::ResourcePool;

/// Trait for implementation of fit algorithms.
///
/// The algorithm selects a node for the job, allocates the job resources on it and returns the node ID,
/// or returns `None` if there is no suitable node. In the latter case the pool state must stay unchanged.
///
/// It is possible to implement arbitrary fit algorithm and pass it to
/// [`BatchScheduler::run_with_algorithm`](crate::scheduler::BatchScheduler::run_with_algorithm).
pub trait FitAlgorithm {
    fn place_job(&self, job: &Job, pool: &mut ResourcePool) -> Option<u32>;

    fn name(&self) -> &str;

    /// Whether the outcome depends only on the job and the pool state.
    ///
    /// A run with a deterministic algorithm fails as soon as a round places no jobs, since the following
    /// rounds would repeat it. Other algorithms are only bounded by the round limit.
    fn is_deterministic(&self) -> bool {
        false
    }
}

/// Built-in fit algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum FitPolicy {
    #[serde(rename = "first")]
    FirstFit,
    #[serde(rename = "best")]
    BestFit,
    #[serde(rename = "worst")]
    WorstFit,
}

impl FitPolicy {
    /// Returns the policy name used in configs.
    pub fn as_str(&self) -> &'static str {
        match self {
            FitPolicy::FirstFit => "first",
            FitPolicy::BestFit => "best",
            FitPolicy::WorstFit => "worst",
        }
    }

    pub fn algorithm(&self) -> Box<dyn FitAlgorithm> {
        match self {
            FitPolicy::FirstFit => Box::new(FirstFit::new()),
            FitPolicy::BestFit => Box::new(BestFit::new()),
            FitPolicy::WorstFit => Box::new(WorstFit::new()),
        }
    }
}

impl FromStr for FitPolicy {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "first" | "FirstFit" => Ok(FitPolicy::FirstFit),
            "best" | "BestFit" => Ok(FitPolicy::BestFit),
            "worst" | "WorstFit" => Ok(FitPolicy::WorstFit),
            _ => Err(Error::InvalidPolicySelector {
                kind: "fit",
                value: s.to_string(),
            }),
        }
    }
}

impl Display for FitPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves fit algorithm by its config name.
pub fn fit_algorithm_resolver(config_str: &str) -> Result<Box<dyn FitAlgorithm>> {
    Ok(config_str.parse::<FitPolicy>()?.algorithm())
}
