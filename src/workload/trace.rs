//! Trace-replay workload
//!
//! Content identifiers are read verbatim, in order, from an externally
//! supplied record source (one identifier per line). Arrival timestamps are
//! still synthesized through the same exponential inter-arrival process as
//! the stationary generator, and receiver selection follows the same
//! uniform/degree-skewed policy. If the source runs out before
//! `n_warmup + n_measured` records, a data-exhaustion error streams out of
//! the iterator and the sequence ends.

use crate::error::SimError;
use crate::topology::Topology;
use crate::workload::{Event, Request};
use crate::{NodeId, Result};
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::io::BufRead;

use crate::distribution::TruncatedZipfDist;

/// Workload replaying content identifiers from an ordered record source
#[derive(Debug)]
pub struct TraceDrivenWorkload<R: BufRead> {
    records: std::io::Lines<R>,
    receivers: Vec<NodeId>,
    receiver_dist: Option<TruncatedZipfDist>,
    inter_arrival: Exp<f64>,
    n_warmup: u64,
    n_measured: u64,
    rng: Xoshiro256PlusPlus,
    t: f64,
    count: u64,
    failed: bool,
}

impl<R: BufRead> TraceDrivenWorkload<R> {
    /// Build a trace-replay workload from a line-oriented record source
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        topology: &dyn Topology,
        reader: R,
        beta: f64,
        rate: f64,
        n_warmup: u64,
        n_measured: u64,
        seed: Option<u64>,
    ) -> Result<Self> {
        if !(rate > 0.0) {
            return Err(SimError::invalid(format!("request rate must be positive, got {rate}")).into());
        }
        let (receivers, receiver_dist) = crate::workload::spatial_receivers(topology, beta)?;
        let inter_arrival =
            Exp::new(rate).map_err(|e| SimError::invalid(format!("bad request rate: {e}")))?;
        let rng = match seed {
            Some(s) => Xoshiro256PlusPlus::seed_from_u64(s),
            None => Xoshiro256PlusPlus::from_entropy(),
        };
        Ok(Self {
            records: reader.lines(),
            receivers,
            receiver_dist,
            inter_arrival,
            n_warmup,
            n_measured,
            rng,
            t: 0.0,
            count: 0,
            failed: false,
        })
    }

    fn next_content(&mut self) -> Result<u64> {
        let line = match self.records.next() {
            Some(line) => line?,
            None => {
                return Err(SimError::exhausted(format!(
                    "trace ended after {} of {} records",
                    self.count,
                    self.n_warmup + self.n_measured
                ))
                .into())
            }
        };
        line.trim()
            .parse::<u64>()
            .map_err(|e| SimError::invalid(format!("bad trace record '{}': {e}", line.trim())).into())
    }
}

impl<R: BufRead> Iterator for TraceDrivenWorkload<R> {
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.count >= self.n_warmup + self.n_measured {
            return None;
        }
        let content = match self.next_content() {
            Ok(c) => c,
            Err(e) => {
                self.failed = true;
                return Some(Err(e));
            }
        };
        self.t += self.inter_arrival.sample(&mut self.rng);
        let receiver = match &self.receiver_dist {
            None => self.receivers[self.rng.gen_range(0..self.receivers.len())],
            Some(dist) => self.receivers[(dist.sample(&mut self.rng) - 1) as usize],
        };
        let log = self.count >= self.n_warmup;
        self.count += 1;
        Some(Ok(Event {
            time: self.t,
            request: Request::Content {
                receiver,
                content,
                log,
            },
        }))
    }
}
