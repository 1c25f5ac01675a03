//! YCSB-style benchmark workload
//!
//! Reproduces the standard read/update mixes of the Yahoo! Cloud Serving
//! Benchmark: workload A (50% read / 50% update), B (95/5) and C (read
//! only). Item popularity follows a truncated Zipf law; timestamps are the
//! iteration index, with no arrival-rate model. The warm-up/measured `log`
//! split is identical to the synthetic generator.

use crate::distribution::TruncatedZipfDist;
use crate::workload::{Event, OpKind, Request};
use crate::Result;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Standard YCSB workload mixes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YcsbMix {
    /// 50% read / 50% update
    A,
    /// 95% read / 5% update
    B,
    /// Read only
    C,
}

impl YcsbMix {
    fn read_fraction(self) -> f64 {
        match self {
            YcsbMix::A => 0.5,
            YcsbMix::B => 0.95,
            YcsbMix::C => 1.0,
        }
    }
}

/// Read/update benchmark generator over a Zipf-popular item population
pub struct YcsbWorkload {
    mix: YcsbMix,
    zipf: TruncatedZipfDist,
    n_warmup: u64,
    n_measured: u64,
    rng: Xoshiro256PlusPlus,
    count: u64,
}

impl YcsbWorkload {
    pub fn new(
        mix: YcsbMix,
        n_items: u64,
        alpha: f64,
        n_warmup: u64,
        n_measured: u64,
        seed: Option<u64>,
    ) -> Result<Self> {
        let zipf = TruncatedZipfDist::new(alpha, n_items as usize)?;
        let rng = match seed {
            Some(s) => Xoshiro256PlusPlus::seed_from_u64(s),
            None => Xoshiro256PlusPlus::from_entropy(),
        };
        Ok(Self {
            mix,
            zipf,
            n_warmup,
            n_measured,
            rng,
            count: 0,
        })
    }

    pub fn mix(&self) -> YcsbMix {
        self.mix
    }
}

impl Iterator for YcsbWorkload {
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.count >= self.n_warmup + self.n_measured {
            return None;
        }
        // One uniform draw selects the operation kind from the mix
        let kind = if self.rng.gen::<f64>() < self.mix.read_fraction() {
            OpKind::Read
        } else {
            OpKind::Update
        };
        let item = self.zipf.sample(&mut self.rng);
        let log = self.count >= self.n_warmup;
        let time = self.count as f64;
        self.count += 1;
        Some(Ok(Event {
            time,
            request: Request::Op { kind, item, log },
        }))
    }
}
