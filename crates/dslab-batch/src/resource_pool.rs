//! Resource pool state.

use std::ops::Range;

use crate::common::AllocationVerdict;
use crate::job::Job;
use crate::node::WorkerNode;

/// Ordered collection of worker nodes with node IDs equal to their positions.
///
/// The pool is the only owner of node state. Node resources are changed exclusively through [`allocate`],
/// [`release`] and [`probe`], while searching code gets read-only access to nodes.
///
/// [`allocate`]: ResourcePool::allocate
/// [`release`]: ResourcePool::release
/// [`probe`]: ResourcePool::probe
#[derive(Clone, Debug, Default)]
pub struct ResourcePool {
    nodes: Vec<WorkerNode>,
}

impl ResourcePool {
    /// Creates empty resource pool.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Creates pool of `count` nodes with identical capacity.
    pub fn uniform(count: u32, cpu_total: u32, memory_total: u64) -> Self {
        let mut pool = Self::new();
        for _ in 0..count {
            pool.add_node(cpu_total, memory_total);
        }
        pool
    }

    /// Adds node to the end of the pool and returns its ID.
    pub fn add_node(&mut self, cpu_total: u32, memory_total: u64) -> u32 {
        let id = self.nodes.len() as u32;
        self.nodes.push(WorkerNode::new(id, cpu_total, memory_total));
        id
    }

    /// Returns IDs of all nodes in scan order.
    pub fn node_ids(&self) -> Range<u32> {
        0..self.nodes.len() as u32
    }

    pub fn node_count(&self) -> u32 {
        self.nodes.len() as u32
    }

    pub fn node(&self, node_id: u32) -> Option<&WorkerNode> {
        self.nodes.get(node_id as usize)
    }

    pub fn nodes(&self) -> &[WorkerNode] {
        &self.nodes
    }

    /// Checks if the job currently fits into the specified node.
    pub fn can_allocate(&self, job: &Job, node_id: u32) -> AllocationVerdict {
        match self.node(node_id) {
            Some(node) => node.can_allocate(job),
            None => AllocationVerdict::NodeNotFound,
        }
    }

    /// Allocates job resources on the specified node if they are available.
    pub fn allocate(&mut self, job: &Job, node_id: u32) -> AllocationVerdict {
        match self.nodes.get_mut(node_id as usize) {
            Some(node) => node.allocate(job),
            None => AllocationVerdict::NodeNotFound,
        }
    }

    /// Returns job resources to the specified node.
    pub fn release(&mut self, job: &Job, node_id: u32) {
        if let Some(node) = self.nodes.get_mut(node_id as usize) {
            node.release(job);
        }
    }

    /// Tentatively allocates the job on the specified node and returns the leftover, i.e. the sum of
    /// available cores and available memory after the allocation. The allocation is released before returning,
    /// so the node state is the same as before the call.
    ///
    /// Returns `None` if the job does not fit.
    pub fn probe(&mut self, job: &Job, node_id: u32) -> Option<u64> {
        let node = self.nodes.get_mut(node_id as usize)?;
        if node.allocate(job) != AllocationVerdict::Success {
            return None;
        }
        let leftover = (node.cpu_available() as u64).saturating_add(node.memory_available());
        node.release(job);
        Some(leftover)
    }

    /// Checks if at least one node has enough total capacity for the job.
    pub fn fits_capacity(&self, job: &Job) -> bool {
        self.nodes.iter().any(|node| node.fits_capacity(job))
    }

    /// Returns the largest CPU capacity among nodes.
    pub fn max_cpu_total(&self) -> u32 {
        self.nodes.iter().map(|node| node.cpu_total()).max().unwrap_or(0)
    }

    /// Returns the largest memory capacity among nodes.
    pub fn max_memory_total(&self) -> u64 {
        self.nodes.iter().map(|node| node.memory_total()).max().unwrap_or(0)
    }

    /// Returns the mean CPU utilization (in percents) across all nodes.
    pub fn average_cpu_utilization(&self) -> f64 {
        if self.nodes.is_empty() {
            return 0.;
        }
        self.nodes.iter().map(|node| node.cpu_utilization()).sum::<f64>() / self.nodes.len() as f64
    }

    /// Returns the mean memory utilization (in percents) across all nodes.
    pub fn average_memory_utilization(&self) -> f64 {
        if self.nodes.is_empty() {
            return 0.;
        }
        self.nodes.iter().map(|node| node.memory_utilization()).sum::<f64>() / self.nodes.len() as f64
    }

    /// Makes all resources available again.
    pub fn reset(&mut self) {
        for node in self.nodes.iter_mut() {
            node.reset();
        }
    }
}
