//! Scheduling engine performing round-based job placement.

use serde::Serialize;

use crate::config::SimulationConfig;
use crate::context::SimulationContext;
use crate::error::{Error, Result};
use crate::fit_algorithm::{FitAlgorithm, FitPolicy};
use crate::job::Job;
use crate::monitoring::UtilizationRecorder;
use crate::placement::Placement;
use crate::queue_ordering::QueueOrdering;
use crate::resource_pool::ResourcePool;
use crate::retry::RetryPolicy;
use crate::{log_debug, log_info, log_trace, log_warn};

/// Default limit on the number of rounds in a single run.
pub const DEFAULT_MAX_ROUNDS: u64 = 10000;

/// Contains the outcome of a completed run.
#[derive(Serialize, Clone, Debug)]
pub struct RunResult {
    /// Queue ordering policy.
    pub queue: QueueOrdering,
    /// Name of fit algorithm.
    pub fit: String,
    /// Number of the first round of the run.
    pub first_round: u64,
    /// Number of rounds performed.
    pub rounds: u64,
    /// Placed jobs in placement order.
    pub placements: Vec<Placement>,
    /// IDs of jobs dropped at intake because they do not fit into any node.
    pub dropped_jobs: Vec<u32>,
    /// Mean CPU utilization (in percents) at the end of the run.
    pub cpu_utilization: f64,
    /// Mean memory utilization (in percents) at the end of the run.
    pub memory_utilization: f64,
}

impl RunResult {
    /// Number of the last round of the run (equal to `first_round - 1` if there were no rounds).
    pub fn last_round(&self) -> u64 {
        self.first_round + self.rounds - 1
    }
}

/// Scheduler places submitted jobs onto the resource pool.
///
/// A run orders pending jobs once using the queue ordering policy and then performs rounds until all jobs are
/// placed. In each round every pending job is offered to the fit algorithm in the established order, with a bounded
/// number of attempts defined by the retry policy. Jobs which could not be placed stay pending for the next round
/// in the same relative order. At the end of each round the pool utilization is captured.
///
/// Placed jobs never release their resources. The round counter, pool state and utilization series are kept
/// between runs.
pub struct BatchScheduler {
    pool: ResourcePool,
    pending: Vec<Job>,
    dropped: Vec<u32>,
    placements: Vec<Placement>,
    retry_policy: RetryPolicy,
    max_rounds: u64,
    skip_unplaceable_jobs: bool,
    round: u64,
    recorder: UtilizationRecorder,
    ctx: SimulationContext,
}

impl BatchScheduler {
    /// Creates scheduler for the specified pool.
    pub fn new(pool: ResourcePool, retry_policy: RetryPolicy) -> Self {
        Self {
            pool,
            pending: Vec::new(),
            dropped: Vec::new(),
            placements: Vec::new(),
            retry_policy,
            max_rounds: DEFAULT_MAX_ROUNDS,
            skip_unplaceable_jobs: false,
            round: 0,
            recorder: UtilizationRecorder::new(),
            ctx: SimulationContext::new("scheduler"),
        }
    }

    /// Creates scheduler with the pool and limits from simulation config.
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(
            ResourcePool::uniform(config.node_count, config.node_cores, config.node_memory),
            RetryPolicy::new(config.max_attempts),
        )
        .with_max_rounds(config.max_rounds)
        .with_skip_unplaceable_jobs(config.skip_unplaceable_jobs)
    }

    /// Sets the limit on the number of rounds in a single run.
    pub fn with_max_rounds(mut self, max_rounds: u64) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Sets whether jobs exceeding the capacity of every node are dropped at intake instead of rejecting the batch.
    pub fn with_skip_unplaceable_jobs(mut self, skip: bool) -> Self {
        self.skip_unplaceable_jobs = skip;
        self
    }

    /// Submits jobs for the next run.
    ///
    /// A job which does not fit into the total capacity of any node can never be placed. By default such job
    /// makes the whole batch rejected with [`Error::UnplaceableJob`] before any job is added. If skipping is
    /// enabled, such jobs are dropped with a warning and reported in the next run result.
    pub fn intake<I: IntoIterator<Item = Job>>(&mut self, jobs: I) -> Result<()> {
        let jobs: Vec<Job> = jobs.into_iter().collect();
        let (placeable, unplaceable): (Vec<Job>, Vec<Job>) =
            jobs.into_iter().partition(|job| self.pool.fits_capacity(job));

        if let Some(job) = unplaceable.first() {
            if !self.skip_unplaceable_jobs {
                return Err(Error::UnplaceableJob {
                    job_id: job.id,
                    cores: job.cores,
                    memory: job.memory,
                    max_cores: self.pool.max_cpu_total(),
                    max_memory: self.pool.max_memory_total(),
                });
            }
        }
        for job in unplaceable {
            log_warn!(
                self.ctx,
                "dropped job {} requiring {} cores and {} memory: no node has enough capacity",
                job.id,
                job.cores,
                job.memory
            );
            self.dropped.push(job.id);
        }
        self.pending.extend(placeable);
        Ok(())
    }

    /// Performs run with one of the built-in fit algorithms.
    pub fn run(&mut self, queue: QueueOrdering, fit: FitPolicy) -> Result<RunResult> {
        self.run_with_algorithm(queue, fit.algorithm().as_ref())
    }

    /// Performs run with the specified fit algorithm.
    ///
    /// Fails with [`Error::RoundLimitExceeded`] if the run does not finish within the round limit.
    /// For a [deterministic](FitAlgorithm::is_deterministic) algorithm the run fails earlier with
    /// [`Error::StalledRun`] if a round places no jobs while some jobs are pending.
    /// In both cases the remaining jobs stay pending and the jobs placed before the failure
    /// are available via [`placements`](Self::placements).
    pub fn run_with_algorithm(&mut self, queue: QueueOrdering, algorithm: &dyn FitAlgorithm) -> Result<RunResult> {
        let first_round = self.round + 1;
        let dropped_jobs = std::mem::take(&mut self.dropped);
        let run_start = self.placements.len();

        queue.order(&mut self.pending);
        log_debug!(
            self.ctx,
            "starting run with {} jobs, queue ordering {}, fit algorithm {}, up to {} attempts per job",
            self.pending.len(),
            queue,
            algorithm.name(),
            self.retry_policy.max_attempts()
        );

        while !self.pending.is_empty() {
            if self.round + 1 - first_round == self.max_rounds {
                return Err(Error::RoundLimitExceeded {
                    limit: self.max_rounds,
                    pending: self.pending.len(),
                });
            }
            self.round += 1;
            self.ctx.set_time(self.round);

            let placed_before = self.placements.len();
            let jobs = std::mem::take(&mut self.pending);
            for job in jobs {
                match self.place_job(&job, algorithm) {
                    Some(node_id) => {
                        let placement = Placement::new(&job, node_id, self.round);
                        log_info!(self.ctx, placement);
                        self.placements.push(placement);
                    }
                    None => self.pending.push(job),
                }
            }

            let sample = self.recorder.capture(self.round, &self.pool);
            log_debug!(
                self.ctx,
                "placed {} jobs, {} pending, cpu utilization {:.2}%, memory utilization {:.2}%",
                self.placements.len() - placed_before,
                self.pending.len(),
                sample.cpu_utilization,
                sample.memory_utilization
            );

            let stalled = self.placements.len() == placed_before && !self.pending.is_empty();
            if stalled && algorithm.is_deterministic() {
                return Err(Error::StalledRun {
                    round: self.round,
                    pending: self.pending.len(),
                });
            }
        }

        Ok(RunResult {
            queue,
            fit: algorithm.name().to_string(),
            first_round,
            rounds: self.round + 1 - first_round,
            placements: self.placements[run_start..].to_vec(),
            dropped_jobs,
            cpu_utilization: self.pool.average_cpu_utilization(),
            memory_utilization: self.pool.average_memory_utilization(),
        })
    }

    fn place_job(&mut self, job: &Job, algorithm: &dyn FitAlgorithm) -> Option<u32> {
        let pool = &mut self.pool;
        let ctx = &self.ctx;
        self.retry_policy.run(|attempt| {
            let result = algorithm.place_job(job, pool);
            if result.is_none() {
                log_trace!(ctx, "no suitable node for job {} (attempt {})", job.id, attempt);
            }
            result
        })
    }

    pub fn pool(&self) -> &ResourcePool {
        &self.pool
    }

    /// Returns jobs waiting for placement.
    pub fn pending(&self) -> &[Job] {
        &self.pending
    }

    /// Returns all placements made so far, including those of failed runs.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Returns the number of the last performed round.
    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn recorder(&self) -> &UtilizationRecorder {
        &self.recorder
    }

    pub fn context(&self) -> &SimulationContext {
        &self.ctx
    }

    /// Makes all pool resources available again. Round counter and utilization series are kept.
    pub fn reset_pool(&mut self) {
        self.pool.reset();
    }

    /// Removes and returns all pending jobs.
    pub fn clear_pending(&mut self) -> Vec<Job> {
        std::mem::take(&mut self.pending)
    }
}
