//! Worst Fit algorithm.

use crate::common::AllocationVerdict;
use crate::fit_algorithm::FitAlgorithm;
use crate::job::Job;
use crate::resource_pool::ResourcePool;

/// Uses the suitable node with the largest leftover (available cores + available memory) after placement.
///
/// Probing is the same as in [`BestFit`](crate::fit_algorithms::best_fit::BestFit).
/// A node left with zero resources is still a valid choice if it is the only suitable one.
#[derive(Default)]
pub struct WorstFit;

impl WorstFit {
    pub fn new() -> Self {
        Default::default()
    }
}

impl FitAlgorithm for WorstFit {
    fn place_job(&self, job: &Job, pool: &mut ResourcePool) -> Option<u32> {
        let mut result: Option<u32> = None;
        let mut max_leftover: Option<u64> = None;

        for node in pool.node_ids() {
            if let Some(leftover) = pool.probe(job, node) {
                if max_leftover.map_or(true, |max| leftover > max) {
                    max_leftover = Some(leftover);
                    result = Some(node);
                }
            }
        }
        result.filter(|&node| pool.allocate(job, node) == AllocationVerdict::Success)
    }

    fn name(&self) -> &str {
        "worst"
    }

    fn is_deterministic(&self) -> bool {
        true
    }
}
