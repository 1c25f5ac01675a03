//! Arbitrary discrete distribution over a finite population

use crate::error::SimError;
use crate::Result;
use rand::Rng;

/// Maximum tolerated absolute deviation of the mass sum from 1
const MASS_SUM_TOLERANCE: f64 = 1e-3;

/// Discrete probability distribution over the population {1..N}
///
/// Owns the probability-mass array (index 0 maps to population label 1) and
/// a derived cumulative-mass array of equal length. Immutable after
/// construction; sampled repeatedly and independently per draw.
#[derive(Debug, Clone)]
pub struct DiscreteDist {
    pdf: Vec<f64>,
    cdf: Vec<f64>,
}

impl DiscreteDist {
    /// Build a distribution from a probability-mass sequence
    ///
    /// Fails if the mass array is empty, contains a negative entry, or its
    /// sum deviates from 1 by more than 1e-3.
    pub fn new(pdf: Vec<f64>) -> Result<Self> {
        if pdf.is_empty() {
            return Err(SimError::invalid("probability mass array is empty").into());
        }
        if pdf.iter().any(|&p| p < 0.0 || !p.is_finite()) {
            return Err(SimError::invalid("probability mass values must be non-negative").into());
        }
        let sum: f64 = pdf.iter().sum();
        if (sum - 1.0).abs() > MASS_SUM_TOLERANCE {
            return Err(SimError::invalid(format!(
                "probability mass must sum to 1, got {sum}"
            ))
            .into());
        }
        let mut cdf = Vec::with_capacity(pdf.len());
        let mut cumulative = 0.0;
        for &p in &pdf {
            cumulative += p;
            cdf.push(cumulative);
        }
        // Clamp so a draw of u close to 1 can never fall past the end.
        *cdf.last_mut().unwrap() = 1.0;
        Ok(Self { pdf, cdf })
    }

    /// Population size N
    pub fn len(&self) -> usize {
        self.pdf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pdf.is_empty()
    }

    /// Probability-mass array, index i holding the mass of label i+1
    pub fn pdf(&self) -> &[f64] {
        &self.pdf
    }

    /// Cumulative-mass array; monotonically non-decreasing, last entry 1.0
    pub fn cdf(&self) -> &[f64] {
        &self.cdf
    }

    /// Draw one 1-based population label
    ///
    /// Draws a uniform u in [0,1) and returns the smallest label whose
    /// cumulative mass exceeds u, found by binary search.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        let u: f64 = rng.gen();
        let idx = self.cdf.partition_point(|&c| c <= u);
        idx as u64 + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    #[test]
    fn test_rejects_bad_mass_sum() {
        assert!(DiscreteDist::new(vec![0.5, 0.3]).is_err());
        assert!(DiscreteDist::new(vec![0.7, 0.5]).is_err());
        assert!(DiscreteDist::new(vec![]).is_err());
        assert!(DiscreteDist::new(vec![0.5, -0.1, 0.6]).is_err());
    }

    #[test]
    fn test_accepts_small_deviation() {
        // Within the 1e-3 tolerance
        assert!(DiscreteDist::new(vec![0.5, 0.5004]).is_ok());
    }

    #[test]
    fn test_cdf_monotone_and_clamped() {
        let dist = DiscreteDist::new(vec![0.2, 0.3, 0.5]).unwrap();
        let cdf = dist.cdf();
        assert!(cdf.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*cdf.last().unwrap(), 1.0);
        assert_eq!(dist.len(), 3);
    }

    #[test]
    fn test_samples_in_population() {
        let dist = DiscreteDist::new(vec![0.1; 10]).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        for _ in 0..1000 {
            let v = dist.sample(&mut rng);
            assert!((1..=10).contains(&v));
        }
    }

    #[test]
    fn test_empirical_frequencies_converge() {
        let pdf = vec![0.6, 0.3, 0.1];
        let dist = DiscreteDist::new(pdf.clone()).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        let n = 100_000;
        let mut counts = [0u64; 3];
        for _ in 0..n {
            counts[(dist.sample(&mut rng) - 1) as usize] += 1;
        }
        for (i, &p) in pdf.iter().enumerate() {
            let freq = counts[i] as f64 / n as f64;
            assert!(
                (freq - p).abs() < 0.01,
                "label {} frequency {} far from {}",
                i + 1,
                freq,
                p
            );
        }
    }

    #[test]
    fn test_degenerate_mass_always_hits() {
        let dist = DiscreteDist::new(vec![0.0, 1.0, 0.0]).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        for _ in 0..100 {
            assert_eq!(dist.sample(&mut rng), 2);
        }
    }
}
