/// Result of checking whether a job fits into a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AllocationVerdict {
    NotEnoughCPU,
    NotEnoughMemory,
    Success,
    NodeNotFound,
}
