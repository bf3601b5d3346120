//! First Fit algorithm.

use crate::common::AllocationVerdict;
use crate::fit_algorithm::FitAlgorithm;
use crate::job::Job;
use crate::resource_pool::ResourcePool;

/// Uses the first node with enough available resources.
///
/// The allocation is performed during the scan, so the first successful allocation is the selection.
#[derive(Default)]
pub struct FirstFit;

impl FirstFit {
    pub fn new() -> Self {
        Default::default()
    }
}

impl FitAlgorithm for FirstFit {
    fn place_job(&self, job: &Job, pool: &mut ResourcePool) -> Option<u32> {
        pool.node_ids()
            .find(|&node| pool.allocate(job, node) == AllocationVerdict::Success)
    }

    fn name(&self) -> &str {
        "first"
    }

    fn is_deterministic(&self) -> bool {
        true
    }
}
