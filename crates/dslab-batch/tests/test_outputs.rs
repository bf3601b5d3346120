use dslab_batch::config::{RunConfig, SimulationConfig};
use dslab_batch::experiment::Experiment;
use dslab_batch::fit_algorithm::FitPolicy;
use dslab_batch::job::Job;
use dslab_batch::monitoring::UtilizationRecorder;
use dslab_batch::placement::{write_placements_csv, Placement};
use dslab_batch::queue_ordering::QueueOrdering;
use dslab_batch::resource_pool::ResourcePool;
use dslab_batch::retry::RetryPolicy;
use dslab_batch::scheduler::BatchScheduler;

fn small_experiment_config() -> SimulationConfig {
    // Each job fits an empty node and there are as many nodes as jobs, so every run completes in one round.
    SimulationConfig::from_yaml(
        r#"
node_count: 20
workload:
  job_count: 20
  seed: 7
"#,
    )
    .unwrap()
}

#[test]
fn test_utilization_csv() {
    let mut scheduler = BatchScheduler::new(ResourcePool::uniform(2, 24, 64), RetryPolicy::default());
    scheduler.intake(vec![Job::new(0, 0, 12, 10, 1)]).unwrap();
    scheduler.run(QueueOrdering::Fcfs, FitPolicy::FirstFit).unwrap();

    let mut buf = Vec::new();
    scheduler.recorder().write_csv(&mut buf).unwrap();
    let output = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines, vec!["Time,CPU Utilization,Memory Utilization", "1,25.0,7.8125"]);
}

#[test]
fn test_empty_utilization_csv_has_header() {
    let mut buf = Vec::new();
    UtilizationRecorder::new().write_csv(&mut buf).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "Time,CPU Utilization,Memory Utilization\n");
}

#[test]
// Arrival time 50 hours is day 2, hour 2.
fn test_placement_record() {
    let placement = Placement::new(&Job::new(3, 50, 4, 8, 2), 1, 7);
    assert_eq!(placement.arrival_day, 2);
    assert_eq!(placement.arrival_hour, 2);

    let mut buf = Vec::new();
    write_placements_csv(&[placement], &mut buf).unwrap();
    let output = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines,
        vec![
            "job_id,node_id,round,arrival_day,arrival_hour,memory,cores,execution_time",
            "3,1,7,2,2,8,4,2",
        ]
    );
}

#[test]
// With pool reset each run places the whole workload in a separate round of the shared series.
fn test_experiment() {
    let results = Experiment::new(small_experiment_config()).run().unwrap();

    assert_eq!(results.failed_runs(), 0);
    assert_eq!(results.runs.len(), 3);
    assert_eq!(results.placements.len(), 60);
    let rounds: Vec<u64> = results.utilization.iter().map(|s| s.round).collect();
    assert_eq!(rounds, vec![1, 2, 3]);

    let policies: Vec<RunConfig> = results.runs.iter().map(|run| run.run).collect();
    assert_eq!(policies, dslab_batch::config::default_runs());
    for run in &results.runs {
        let result = run.result.as_ref().unwrap();
        assert_eq!(result.rounds, 1);
        assert_eq!(result.placements.len(), 20);
    }
}

#[test]
// Without pool reset the workload is submitted once and the following runs have nothing to place.
fn test_experiment_without_reset() {
    let mut config = small_experiment_config();
    config.reset_pool_between_runs = false;
    let results = Experiment::new(config).run().unwrap();

    assert_eq!(results.failed_runs(), 0);
    assert_eq!(results.placements.len(), 20);
    assert_eq!(results.utilization.len(), 1);
    assert_eq!(results.runs[1].result.as_ref().unwrap().rounds, 0);
}

#[test]
// Failed run is reported in results while the remaining runs are still performed.
fn test_experiment_with_stalled_run() {
    let mut config = small_experiment_config();
    config.node_count = 1;
    config.workload.cores.min = 13;
    let results = Experiment::new(config).run().unwrap();

    assert_eq!(results.failed_runs(), 3);
    for run in &results.runs {
        assert!(run.error.as_ref().unwrap().contains("stalled"));
    }
    assert_eq!(results.placements.len(), 3);
}

#[test]
fn test_experiment_rejects_unplaceable_workload() {
    let mut config = small_experiment_config();
    config.node_cores = 8;
    assert!(matches!(
        Experiment::new(config).run(),
        Err(dslab_batch::Error::UnplaceableJob { .. })
    ));
}

#[test]
// The config shipped with the batch-sim tool matches the defaults.
fn test_load_tool_config() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../tools/batch-sim/config.yaml");
    let experiment = Experiment::load(path).unwrap();
    assert_eq!(experiment.config(), &SimulationConfig::default());

    let experiment = experiment.with_seed(42);
    assert_eq!(experiment.config().workload.seed, 42);
    assert_eq!(experiment.config().node_count, 128);
}
