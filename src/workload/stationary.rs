//! Stationary synthetic workload
//!
//! Poisson request arrivals (exponential inter-arrival times at a configured
//! network-wide rate), content popularity following a truncated Zipf law,
//! and either uniform receiver selection or - with a spatial skew exponent
//! beta > 0 - a Zipf choice over receivers ranked by the degree of their
//! access router, reflecting the empirical finding that higher-degree access
//! points generate more traffic.

use crate::distribution::TruncatedZipfDist;
use crate::error::SimError;
use crate::topology::Topology;
use crate::workload::{Event, Request};
use crate::{NodeId, Result};
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Stationary Poisson/Zipf request generator
#[derive(Debug)]
pub struct StationaryWorkload {
    receivers: Vec<NodeId>,
    zipf: TruncatedZipfDist,
    receiver_dist: Option<TruncatedZipfDist>,
    inter_arrival: Exp<f64>,
    n_warmup: u64,
    n_measured: u64,
    rng: Xoshiro256PlusPlus,
    t: f64,
    count: u64,
}

impl StationaryWorkload {
    /// Build a stationary workload over the topology's receiver nodes
    ///
    /// `alpha` is the content popularity skew, `beta >= 0` the spatial skew
    /// across receivers (0 selects receivers uniformly), `rate` the
    /// network-wide request rate. Exactly `n_warmup + n_measured` events are
    /// produced; the first `n_warmup` carry `log = false`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        topology: &dyn Topology,
        n_contents: u64,
        alpha: f64,
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
        let zipf = TruncatedZipfDist::new(alpha, n_contents as usize)?;
        let inter_arrival =
            Exp::new(rate).map_err(|e| SimError::invalid(format!("bad request rate: {e}")))?;
        let rng = match seed {
            Some(s) => Xoshiro256PlusPlus::seed_from_u64(s),
            None => Xoshiro256PlusPlus::from_entropy(),
        };
        Ok(Self {
            receivers,
            zipf,
            receiver_dist,
            inter_arrival,
            n_warmup,
            n_measured,
            rng,
            t: 0.0,
            count: 0,
        })
    }
}

impl Iterator for StationaryWorkload {
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.count >= self.n_warmup + self.n_measured {
            return None;
        }
        self.t += self.inter_arrival.sample(&mut self.rng);
        let receiver = match &self.receiver_dist {
            None => self.receivers[self.rng.gen_range(0..self.receivers.len())],
            Some(dist) => self.receivers[(dist.sample(&mut self.rng) - 1) as usize],
        };
        let content = self.zipf.sample(&mut self.rng);
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
