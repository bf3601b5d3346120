//! Best Fit algorithm.

use crate::common::AllocationVerdict;
use crate::fit_algorithm::FitAlgorithm;
use crate::job::Job;
use crate::resource_pool::ResourcePool;

/// Uses the suitable node with the smallest leftover (available cores + available memory) after placement.
///
/// Every node is probed with a tentative allocation which is released right away.
/// Ties are resolved in favor of the node scanned first.
#[derive(Default)]
pub struct BestFit;

impl BestFit {
    pub fn new() -> Self {
        Default::default()
    }
}

impl FitAlgorithm for BestFit {
    fn place_job(&self, job: &Job, pool: &mut ResourcePool) -> Option<u32> {
        let mut result: Option<u32> = None;
        let mut min_leftover: Option<u64> = None;

        for node in pool.node_ids() {
            if let Some(leftover) = pool.probe(job, node) {
                if min_leftover.map_or(true, |min| leftover < min) {
                    min_leftover = Some(leftover);
                    result = Some(node);
                }
            }
        }
        result.filter(|&node| pool.allocate(job, node) == AllocationVerdict::Success)
    }

    fn name(&self) -> &str {
        "best"
    }

    fn is_deterministic(&self) -> bool {
        true
    }
}
