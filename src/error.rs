//! Error taxonomy
//!
//! All failures in this crate are fatal to the current experiment: invalid
//! configuration is rejected eagerly at construction time, data exhaustion is
//! raised when detected mid-stream, and collaborator failures propagate to the
//! experiment driver unhandled. Nothing is retried - generation and simulation
//! are deterministic given their seed, so a retry would reproduce the failure.

use thiserror::Error;

/// Simulation error kinds
#[derive(Debug, Error)]
pub enum SimError {
    /// Malformed parameter detected at construction/validation time
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Trace or benchmark source yielded fewer records than required
    #[error("data exhausted: {0}")]
    DataExhausted(String),

    /// Registry lookup for an unregistered strategy/policy/collector name
    #[error("unknown {kind} '{name}'")]
    UnknownComponent { kind: &'static str, name: String },
}

impl SimError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        SimError::InvalidConfig(msg.into())
    }

    pub fn exhausted(msg: impl Into<String>) -> Self {
        SimError::DataExhausted(msg.into())
    }
}
