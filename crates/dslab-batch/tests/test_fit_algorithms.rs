use dslab_batch::common::AllocationVerdict;
use dslab_batch::fit_algorithm::{fit_algorithm_resolver, FitAlgorithm, FitPolicy};
use dslab_batch::fit_algorithms::best_fit::BestFit;
use dslab_batch::fit_algorithms::first_fit::FirstFit;
use dslab_batch::fit_algorithms::worst_fit::WorstFit;
use dslab_batch::job::Job;
use dslab_batch::node::WorkerNode;
use dslab_batch::resource_pool::ResourcePool;
use dslab_batch::Error;

// Pool of three 24/64 nodes where node 0 has 4/44 available, node 1 has 10/10 and node 2 is empty.
fn loaded_pool() -> ResourcePool {
    let mut pool = ResourcePool::uniform(3, 24, 64);
    assert_eq!(pool.allocate(&Job::new(100, 0, 20, 20, 1), 0), AllocationVerdict::Success);
    assert_eq!(pool.allocate(&Job::new(101, 0, 14, 54, 1), 1), AllocationVerdict::Success);
    pool
}

fn available(pool: &ResourcePool) -> Vec<(u32, u64)> {
    pool.nodes()
        .iter()
        .map(|node| (node.cpu_available(), node.memory_available()))
        .collect()
}

#[test]
// First fit selects the lowest-index node with enough resources and commits the allocation.
fn test_first_fit() {
    let mut pool = loaded_pool();
    let job = Job::new(0, 0, 8, 8, 1);

    assert_eq!(FirstFit::new().place_job(&job, &mut pool), Some(1));
    assert_eq!(available(&pool), vec![(4, 44), (2, 2), (24, 64)]);

    let small = Job::new(1, 0, 2, 2, 1);
    assert_eq!(FirstFit::new().place_job(&small, &mut pool), Some(0));
}

#[test]
// Leftover of node 0 is not computed (does not fit), node 1: 2 + 2 = 4, node 2: 16 + 56 = 72.
fn test_best_fit() {
    let mut pool = loaded_pool();
    let job = Job::new(0, 0, 8, 8, 1);

    assert_eq!(BestFit::new().place_job(&job, &mut pool), Some(1));
    assert_eq!(available(&pool), vec![(4, 44), (2, 2), (24, 64)]);
}

#[test]
fn test_worst_fit() {
    let mut pool = loaded_pool();
    let job = Job::new(0, 0, 8, 8, 1);

    assert_eq!(WorstFit::new().place_job(&job, &mut pool), Some(2));
    assert_eq!(available(&pool), vec![(4, 44), (10, 10), (16, 56)]);
}

#[test]
// Nodes A (24/64 available) and B (10/10 available), job 8/8: leftovers are 72 and 4.
fn test_best_fit_prefers_tight_node() {
    let mut pool = ResourcePool::new();
    let a = pool.add_node(24, 64);
    let b = pool.add_node(10, 10);
    let job = Job::new(0, 0, 8, 8, 1);

    assert_eq!(pool.probe(&job, a), Some(72));
    assert_eq!(pool.probe(&job, b), Some(4));
    assert_eq!(BestFit::new().place_job(&job, &mut pool), Some(b));
}

#[test]
// Equal leftovers are resolved in favor of the first scanned node.
fn test_ties() {
    let job = Job::new(0, 0, 4, 4, 1);

    let mut pool = ResourcePool::uniform(3, 24, 64);
    assert_eq!(BestFit::new().place_job(&job, &mut pool), Some(0));

    let mut pool = ResourcePool::uniform(3, 24, 64);
    assert_eq!(WorstFit::new().place_job(&job, &mut pool), Some(0));
}

#[test]
// Worst fit must accept a node which becomes completely full if it is the only suitable one.
fn test_worst_fit_exact_fit() {
    let mut pool = ResourcePool::uniform(1, 24, 64);
    let job = Job::new(0, 0, 24, 64, 1);

    assert_eq!(WorstFit::new().place_job(&job, &mut pool), Some(0));
    assert_eq!(available(&pool), vec![(0, 0)]);
}

#[test]
// Probing nodes with tentative allocations and failed searches leave the pool unchanged.
fn test_no_fit_leaves_pool_unchanged() {
    let job = Job::new(0, 0, 12, 50, 1);
    for policy in [FitPolicy::FirstFit, FitPolicy::BestFit, FitPolicy::WorstFit] {
        let mut pool = loaded_pool();
        assert_eq!(pool.allocate(&Job::new(102, 0, 13, 15, 1), 2), AllocationVerdict::Success);
        let before = pool.nodes().to_vec();

        let algorithm = policy.algorithm();
        assert_eq!(algorithm.place_job(&job, &mut pool), None);
        assert_eq!(pool.nodes(), before.as_slice());
        // Repeated call under unchanged state gives the same outcome.
        assert_eq!(algorithm.place_job(&job, &mut pool), None);
        assert_eq!(pool.nodes(), before.as_slice());
    }
}

#[test]
// Only the selected node changes after best and worst fit.
fn test_probed_nodes_are_restored() {
    let job = Job::new(0, 0, 3, 3, 1);
    for policy in [FitPolicy::BestFit, FitPolicy::WorstFit] {
        let mut pool = loaded_pool();
        let before: Vec<WorkerNode> = pool.nodes().to_vec();

        let selected = policy.algorithm().place_job(&job, &mut pool).unwrap();
        for (node, old) in pool.nodes().iter().zip(before.iter()) {
            if node.id == selected {
                assert_eq!(node.cpu_available(), old.cpu_available() - 3);
                assert_eq!(node.memory_available(), old.memory_available() - 3);
            } else {
                assert_eq!(node, old);
            }
        }
    }
}

#[test]
fn test_resolver() {
    assert_eq!(fit_algorithm_resolver("first").unwrap().name(), "first");
    assert_eq!(fit_algorithm_resolver("BestFit").unwrap().name(), "best");
    assert_eq!(fit_algorithm_resolver("worst").unwrap().name(), "worst");
    assert!(matches!(
        fit_algorithm_resolver("random"),
        Err(Error::InvalidPolicySelector { kind: "fit", .. })
    ));
}

#[test]
// Leftover saturates on nodes with huge memory instead of overflowing, and such nodes stay selectable.
fn test_huge_node_leftover() {
    let mut pool = ResourcePool::uniform(2, 24, u64::MAX);
    let job = Job::new(0, 0, 1, 1, 1);

    assert_eq!(pool.probe(&job, 0), Some(u64::MAX));
    assert_eq!(BestFit::new().place_job(&job, &mut pool), Some(0));
    assert_eq!(WorstFit::new().place_job(&job, &mut pool), Some(0));
    assert_eq!(available(&pool), vec![(22, u64::MAX - 2), (24, u64::MAX)]);
}
