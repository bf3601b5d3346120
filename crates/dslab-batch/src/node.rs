//! Worker node.

use serde::Serialize;

use crate::common::AllocationVerdict;
use crate::job::Job;

/// Stores node capacity and currently available resources.
///
/// Available resources never go below zero or above the node capacity.
/// Resources are changed only by the owning [`ResourcePool`](crate::resource_pool::ResourcePool).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WorkerNode {
    pub id: u32,
    cpu_total: u32,
    memory_total: u64,
    cpu_available: u32,
    memory_available: u64,
}

impl WorkerNode {
    /// Creates node with the specified capacity, all of which is available.
    pub fn new(id: u32, cpu_total: u32, memory_total: u64) -> Self {
        Self {
            id,
            cpu_total,
            memory_total,
            cpu_available: cpu_total,
            memory_available: memory_total,
        }
    }

    pub fn cpu_total(&self) -> u32 {
        self.cpu_total
    }

    pub fn memory_total(&self) -> u64 {
        self.memory_total
    }

    pub fn cpu_available(&self) -> u32 {
        self.cpu_available
    }

    pub fn memory_available(&self) -> u64 {
        self.memory_available
    }

    /// Returns CPU cores currently held by placed jobs.
    pub fn cpu_allocated(&self) -> u32 {
        self.cpu_total - self.cpu_available
    }

    /// Returns memory currently held by placed jobs.
    pub fn memory_allocated(&self) -> u64 {
        self.memory_total - self.memory_available
    }

    /// Checks if the job fits into currently available resources.
    pub fn can_allocate(&self, job: &Job) -> AllocationVerdict {
        if self.cpu_available < job.cores {
            return AllocationVerdict::NotEnoughCPU;
        }
        if self.memory_available < job.memory {
            return AllocationVerdict::NotEnoughMemory;
        }
        AllocationVerdict::Success
    }

    /// Checks if the job fits into the node capacity, regardless of current allocations.
    pub fn fits_capacity(&self, job: &Job) -> bool {
        job.cores <= self.cpu_total && job.memory <= self.memory_total
    }

    /// Percentage of CPU capacity held by placed jobs.
    pub fn cpu_utilization(&self) -> f64 {
        (1. - self.cpu_available as f64 / self.cpu_total as f64) * 100.
    }

    /// Percentage of memory capacity held by placed jobs.
    pub fn memory_utilization(&self) -> f64 {
        (1. - self.memory_available as f64 / self.memory_total as f64) * 100.
    }

    /// Takes the job resources if they are available, otherwise leaves the node unchanged.
    pub(crate) fn allocate(&mut self, job: &Job) -> AllocationVerdict {
        let verdict = self.can_allocate(job);
        if verdict == AllocationVerdict::Success {
            self.cpu_available -= job.cores;
            self.memory_available -= job.memory;
        }
        verdict
    }

    /// Returns the job resources to the node, never exceeding its capacity.
    pub(crate) fn release(&mut self, job: &Job) {
        self.cpu_available = self.cpu_available.saturating_add(job.cores).min(self.cpu_total);
        self.memory_available = self.memory_available.saturating_add(job.memory).min(self.memory_total);
    }

    pub(crate) fn reset(&mut self) {
        self.cpu_available = self.cpu_total;
        self.memory_available = self.memory_total;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_and_release() {
        let mut node = WorkerNode::new(0, 24, 64);
        let job = Job::new(0, 0, 10, 10, 1);

        assert_eq!(node.allocate(&job), AllocationVerdict::Success);
        assert_eq!(node.cpu_available(), 14);
        assert_eq!(node.memory_available(), 54);
        assert_eq!(node.cpu_allocated(), 10);

        node.release(&job);
        assert_eq!(node, WorkerNode::new(0, 24, 64));
    }

    #[test]
    // Failed allocation must not touch the node.
    fn test_allocate_not_enough_resources() {
        let mut node = WorkerNode::new(0, 24, 64);
        assert_eq!(node.allocate(&Job::new(0, 0, 25, 1, 1)), AllocationVerdict::NotEnoughCPU);
        assert_eq!(node.allocate(&Job::new(1, 0, 1, 65, 1)), AllocationVerdict::NotEnoughMemory);
        assert_eq!(node, WorkerNode::new(0, 24, 64));
    }

    #[test]
    fn test_release_never_exceeds_capacity() {
        let mut node = WorkerNode::new(0, 24, 64);
        node.release(&Job::new(0, 0, 4, 4, 1));
        assert_eq!(node.cpu_available(), 24);
        assert_eq!(node.memory_available(), 64);
    }

    #[test]
    fn test_release_on_huge_node() {
        let mut node = WorkerNode::new(0, u32::MAX, u64::MAX);
        node.release(&Job::new(0, 0, u32::MAX, u64::MAX, 1));
        assert_eq!(node.cpu_available(), u32::MAX);
        assert_eq!(node.memory_available(), u64::MAX);
    }

    #[test]
    fn test_utilization() {
        let mut node = WorkerNode::new(0, 24, 64);
        node.allocate(&Job::new(0, 0, 6, 16, 1));
        assert_eq!(node.cpu_utilization(), 25.);
        assert_eq!(node.memory_utilization(), 25.);
    }
}
