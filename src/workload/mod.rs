//! Request workload generators
//!
//! A workload is a lazy, chronologically ordered sequence of events
//! consumed exactly once per experiment. Generators implement
//! `Iterator<Item = Result<Event>>`: laziness keeps large sequences from
//! being materialized, and streaming `Result` items lets mid-sequence
//! failures (trace exhaustion, malformed records) surface to the engine the
//! way `BufRead::lines` surfaces IO errors. Exhaustion is permanent -
//! re-iterating a spent generator is a programming error, not a recoverable
//! condition.
//!
//! Every generator seeds its own `Xoshiro256PlusPlus` at construction, so a
//! run is exactly reproducible from its seed and parameters. Nothing relies
//! on ambient global random state persisting across experiments.

pub mod stationary;
pub mod trace;
pub mod ycsb;

pub use stationary::StationaryWorkload;
pub use trace::TraceDrivenWorkload;
pub use ycsb::{YcsbMix, YcsbWorkload};

use crate::distribution::TruncatedZipfDist;
use crate::error::SimError;
use crate::topology::Topology;
use crate::{ContentId, NodeId, Result};

/// Receiver list plus the optional spatial-skew sampler over it
///
/// With `beta > 0`, receivers are ranked by the degree of their access
/// router, busiest first (ties keep ascending id order), and selected
/// through a Zipf law over the ranks. A receiver without an access router
/// cannot be ranked and is rejected as malformed configuration.
pub(crate) fn spatial_receivers(
    topology: &dyn Topology,
    beta: f64,
) -> Result<(Vec<NodeId>, Option<TruncatedZipfDist>)> {
    if beta < 0.0 {
        return Err(SimError::invalid(format!("beta must be non-negative, got {beta}")).into());
    }
    let mut receivers = topology.receivers();
    if receivers.is_empty() {
        return Err(SimError::invalid("topology has no receiver-role nodes").into());
    }
    if beta == 0.0 {
        return Ok((receivers, None));
    }
    if let Some(&isolated) = receivers.iter().find(|&&r| topology.neighbors(r).is_empty()) {
        return Err(SimError::invalid(format!(
            "receiver {isolated} has no access router, cannot rank by degree"
        ))
        .into());
    }
    receivers.sort_by(|&a, &b| {
        let da = topology.degree(topology.neighbors(a)[0]);
        let db = topology.degree(topology.neighbors(b)[0]);
        db.cmp(&da)
    });
    let dist = TruncatedZipfDist::new(beta, receivers.len())?;
    Ok((receivers, Some(dist)))
}

/// Benchmark operation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Read,
    Update,
}

/// Request descriptor carried by an event
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// Content request originated by a receiver node
    Content {
        receiver: NodeId,
        content: ContentId,
        log: bool,
    },
    /// Benchmark-style keyed operation (no receiver, no network semantics)
    Op {
        kind: OpKind,
        item: ContentId,
        log: bool,
    },
}

impl Request {
    /// Whether this request counts toward measured statistics
    pub fn log(&self) -> bool {
        match *self {
            Request::Content { log, .. } | Request::Op { log, .. } => log,
        }
    }
}

/// One timestamped request
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Non-negative simulation time; non-decreasing within one workload
    pub time: f64,
    pub request: Request,
}
