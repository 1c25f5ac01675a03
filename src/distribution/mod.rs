//! Discrete probability distributions
//!
//! This module provides the samplers used to synthesize skewed request
//! workloads: an arbitrary discrete distribution over a finite population
//! {1..N} and a truncated Zipf specialization of it.
//!
//! # CDF-inversion sampling
//!
//! Both samplers precompute the cumulative mass array once at construction
//! and invert it with a binary search per draw, giving O(log N) sampling
//! without linear scans. The cumulative array's last entry is clamped to
//! exactly 1.0 so float round-off can never leave a gap at the top of the
//! range.
//!
//! # Randomness
//!
//! Samplers do not own a random source. Each workload generator owns one
//! seeded RNG for the whole experiment and passes it to every draw, which is
//! what makes a run exactly reproducible from a single seed.
//!
//! # Example
//!
//! ```
//! use icnsim::distribution::zipf::TruncatedZipfDist;
//! use rand::SeedableRng;
//! use rand_xoshiro::Xoshiro256PlusPlus;
//!
//! let zipf = TruncatedZipfDist::new(0.8, 1000).unwrap();
//! let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
//! let content = zipf.sample(&mut rng);
//! assert!((1..=1000).contains(&content));
//! ```

pub mod discrete;
pub mod zipf;

pub use discrete::DiscreteDist;
pub use zipf::TruncatedZipfDist;
