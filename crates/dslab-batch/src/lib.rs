#![doc = include_str!("../readme.md")]

pub mod common;
pub mod config;
pub mod context;
pub mod error;
pub mod experiment;
pub mod fit_algorithm;
pub mod fit_algorithms;
pub mod generator;
pub mod job;
pub mod log;
pub mod monitoring;
pub mod node;
pub mod placement;
pub mod queue_ordering;
pub mod resource_pool;
pub mod retry;
pub mod scheduler;

pub use colored;
pub use context::SimulationContext;
pub use error::{Error, Result};
