//! Truncated Zipf distribution
//!
//! Zipf-shaped probability mass over a finite population {1..n}:
//! P(k) = k^(-alpha) / H(n, alpha) with rank 1 the most popular item.
//!
//! The truncation to a finite population is what makes exponents alpha >= 1
//! usable at all: the untruncated infinite-population Zipf law is not
//! normalizable there, and real workloads draw from a bounded catalog
//! anyway.

use super::discrete::DiscreteDist;
use crate::error::SimError;
use crate::Result;
use rand::Rng;

/// Zipf distribution truncated to a finite population
#[derive(Debug, Clone)]
pub struct TruncatedZipfDist {
    alpha: f64,
    dist: DiscreteDist,
}

impl TruncatedZipfDist {
    /// Build a truncated Zipf law with skew exponent `alpha` over `{1..n}`
    ///
    /// Fails with an invalid-input error if `alpha <= 0` or `n < 1`.
    pub fn new(alpha: f64, n: usize) -> Result<Self> {
        if !(alpha > 0.0) {
            return Err(SimError::invalid(format!("zipf alpha must be positive, got {alpha}")).into());
        }
        if n < 1 {
            return Err(SimError::invalid("zipf population must be at least 1").into());
        }
        // H(n, alpha) = sum of k^(-alpha) for k = 1..n
        let mut norm = 0.0;
        for k in 1..=n {
            norm += (k as f64).powf(-alpha);
        }
        let pdf: Vec<f64> = (1..=n).map(|k| (k as f64).powf(-alpha) / norm).collect();
        let dist = DiscreteDist::new(pdf)?;
        Ok(Self { alpha, dist })
    }

    /// Skew exponent
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Population size n
    pub fn len(&self) -> usize {
        self.dist.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dist.is_empty()
    }

    pub fn pdf(&self) -> &[f64] {
        self.dist.pdf()
    }

    pub fn cdf(&self) -> &[f64] {
        self.dist.cdf()
    }

    /// Draw one 1-based rank (rank 1 = most popular)
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        self.dist.sample(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    #[test]
    fn test_rejects_invalid_parameters() {
        assert!(TruncatedZipfDist::new(0.0, 100).is_err());
        assert!(TruncatedZipfDist::new(-1.0, 100).is_err());
        assert!(TruncatedZipfDist::new(0.8, 0).is_err());
    }

    #[test]
    fn test_mass_matches_harmonic_scaling() {
        let zipf = TruncatedZipfDist::new(1.0, 100).unwrap();
        let norm: f64 = (1..=100).map(|k| 1.0 / k as f64).sum();
        let pdf = zipf.pdf();
        for (i, &p) in pdf.iter().enumerate() {
            let expected = 1.0 / ((i + 1) as f64 * norm);
            assert!((p - expected).abs() < 1e-12);
        }
        // Rank 1 carries 100x the mass of rank 100
        assert!((pdf[0] / pdf[99] - 100.0).abs() < 1e-9);
        let sum: f64 = pdf.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_supports_alpha_at_least_one() {
        // Exponents >= 1 are exactly the ones the unbounded law cannot support
        for alpha in [1.0, 1.5, 2.0] {
            let zipf = TruncatedZipfDist::new(alpha, 1000).unwrap();
            assert_eq!(zipf.alpha(), alpha);
            assert_eq!(zipf.len(), 1000);
        }
    }

    #[test]
    fn test_skew_concentrates_on_top_ranks() {
        let zipf = TruncatedZipfDist::new(1.2, 1000).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let mut top_decile = 0u64;
        let n = 10_000;
        for _ in 0..n {
            let rank = zipf.sample(&mut rng);
            assert!((1..=1000).contains(&rank));
            if rank <= 100 {
                top_decile += 1;
            }
        }
        // Top 10% of ranks should take well over half the draws at alpha=1.2
        assert!(top_decile > n / 2, "top decile got {top_decile}/{n}");
    }

    #[test]
    fn test_seeded_draws_reproducible() {
        let zipf = TruncatedZipfDist::new(0.8, 500).unwrap();
        let mut a = Xoshiro256PlusPlus::seed_from_u64(9);
        let mut b = Xoshiro256PlusPlus::seed_from_u64(9);
        for _ in 0..100 {
            assert_eq!(zipf.sample(&mut a), zipf.sample(&mut b));
        }
    }
}
