//! icnsim - Discrete-event simulation engine for in-network caching
//!
//! icnsim replays a chronologically ordered sequence of content requests
//! through a simulated network, lets a pluggable caching/routing strategy
//! decide how each request is forwarded and which nodes cache which content,
//! and aggregates statistics via pluggable collectors.
//!
//! # Architecture
//!
//! - **Distribution samplers**: discrete CDF-inversion sampling, truncated Zipf
//! - **Workload generators**: stationary (Poisson/Zipf), trace-replay, YCSB mixes
//! - **Execution engine**: warm-up/measured split driven by event count
//! - **Collectors**: cache hit ratio, latency, link load, fan-out proxy
//! - **Empirical statistics**: confidence intervals, empirical CDF/PDF

pub mod cache;
pub mod collectors;
pub mod distribution;
pub mod engine;
pub mod error;
pub mod network;
pub mod registry;
pub mod stats;
pub mod strategy;
pub mod topology;
pub mod workload;

// Re-export commonly used types
pub use engine::{exec_experiment, ExperimentSettings};
pub use error::SimError;
pub use workload::{Event, Request};

/// Result type used throughout icnsim
pub type Result<T> = anyhow::Result<T>;

/// Node identifier within a topology
pub type NodeId = usize;

/// Content identifier within the content population (1-based)
pub type ContentId = u64;
