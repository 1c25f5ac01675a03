//! Empirical statistics
//!
//! Confidence intervals for sample means and proportions, plus empirical
//! CDF/PDF computation from raw samples. Used to validate and interpret
//! simulation output (e.g. hit ratios across replications).
//!
//! Conventions are preserved verbatim from the original routines rather than
//! "fixed": the normal approximation is applied regardless of sample size,
//! and the empirical CDF uses strict less-than semantics (P(X < x), so the
//! first entry is always 0).

use crate::error::SimError;
use crate::Result;

/// Confidence interval of a sample mean, normal approximation
///
/// Returns `(mean, half-width)` where half-width is
/// `z(confidence) * s / sqrt(n)` with `s` the unbiased sample standard
/// deviation. A constant sample yields half-width 0 at any confidence.
///
/// Fails if `confidence` is not strictly in (0,1) or fewer than two samples
/// are given.
pub fn means_confidence_interval(samples: &[f64], confidence: f64) -> Result<(f64, f64)> {
    check_confidence(confidence)?;
    let n = samples.len();
    if n < 2 {
        return Err(SimError::invalid("mean confidence interval needs at least two samples").into());
    }
    let mean = samples.iter().sum::<f64>() / n as f64;
    let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let z = norm_ppf((1.0 + confidence) / 2.0);
    let half_width = z * var.sqrt() / (n as f64).sqrt();
    Ok((mean, half_width))
}

/// Confidence interval of a sample proportion, normal approximation
///
/// Returns `(proportion of true, half-width)` with variance `p(1-p)/n`.
/// Fails if `confidence` is not strictly in (0,1) or the input is empty.
pub fn proportions_confidence_interval(samples: &[bool], confidence: f64) -> Result<(f64, f64)> {
    check_confidence(confidence)?;
    if samples.is_empty() {
        return Err(SimError::invalid("proportion confidence interval on empty input").into());
    }
    let n = samples.len() as f64;
    let p = samples.iter().filter(|&&b| b).count() as f64 / n;
    let z = norm_ppf((1.0 + confidence) / 2.0);
    let half_width = z * (p * (1.0 - p) / n).sqrt();
    Ok((p, half_width))
}

/// Empirical CDF of a set of samples
///
/// Returns `(sorted unique values, cumulative probabilities)` where the
/// cumulative probability at index i is P(X < value[i]) - strict less-than,
/// so the first entry is 0. Fails on empty input.
pub fn cdf(samples: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
    if samples.is_empty() {
        return Err(SimError::invalid("empirical CDF on empty input").into());
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len() as f64;
    let mut values = Vec::new();
    let mut cumulative = Vec::new();
    for (i, &x) in sorted.iter().enumerate() {
        if values.last() != Some(&x) {
            values.push(x);
            // Count of samples strictly below x
            cumulative.push(i as f64 / n);
        }
    }
    Ok((values, cumulative))
}

/// Empirical PDF of a set of samples over equal-width bins
///
/// Partitions the observed range into `n_bins` equal-width bins (the last
/// bin inclusive of the maximum), counts membership, and normalizes by bin
/// width and total count so the densities integrate to 1. Returns
/// `(bin centers, densities)`. Fails on empty input or `n_bins < 1`.
pub fn pdf(samples: &[f64], n_bins: usize) -> Result<(Vec<f64>, Vec<f64>)> {
    if samples.is_empty() {
        return Err(SimError::invalid("empirical PDF on empty input").into());
    }
    if n_bins < 1 {
        return Err(SimError::invalid("empirical PDF needs at least one bin").into());
    }
    let min = samples.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    // Degenerate range: a unit-width window centered on the single value
    let (lo, hi) = if max > min {
        (min, max)
    } else {
        (min - 0.5, min + 0.5)
    };
    let width = (hi - lo) / n_bins as f64;
    let mut counts = vec![0u64; n_bins];
    for &x in samples {
        let mut bin = ((x - lo) / width) as usize;
        if bin >= n_bins {
            bin = n_bins - 1;
        }
        counts[bin] += 1;
    }
    let n = samples.len() as f64;
    let centers = (0..n_bins)
        .map(|i| lo + (i as f64 + 0.5) * width)
        .collect();
    let density = counts.iter().map(|&c| c as f64 / (n * width)).collect();
    Ok((centers, density))
}

fn check_confidence(confidence: f64) -> Result<()> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(SimError::invalid(format!(
            "confidence must be in (0,1), got {confidence}"
        ))
        .into());
    }
    Ok(())
}

/// Inverse of the standard normal CDF (Acklam's rational approximation)
///
/// Relative error below 1.15e-9 over the whole domain, more than enough for
/// confidence-interval z values.
fn norm_ppf(q: f64) -> f64 {
    debug_assert!(q > 0.0 && q < 1.0);
    const A: [f64; 6] = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ];
    const B: [f64; 5] = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ];
    const C: [f64; 6] = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ];
    const D: [f64; 4] = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ];
    const P_LOW: f64 = 0.02425;

    if q < P_LOW {
        let r = (-2.0 * q.ln()).sqrt();
        (((((C[0] * r + C[1]) * r + C[2]) * r + C[3]) * r + C[4]) * r + C[5])
            / ((((D[0] * r + D[1]) * r + D[2]) * r + D[3]) * r + 1.0)
    } else if q <= 1.0 - P_LOW {
        let r = q - 0.5;
        let s = r * r;
        (((((A[0] * s + A[1]) * s + A[2]) * s + A[3]) * s + A[4]) * s + A[5]) * r
            / (((((B[0] * s + B[1]) * s + B[2]) * s + B[3]) * s + B[4]) * s + 1.0)
    } else {
        -norm_ppf(1.0 - q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_norm_ppf_known_quantiles() {
        assert!((norm_ppf(0.975) - 1.959964).abs() < 1e-4);
        assert!((norm_ppf(0.95) - 1.644854).abs() < 1e-4);
        assert!(norm_ppf(0.5).abs() < 1e-9);
        assert!((norm_ppf(0.025) + 1.959964).abs() < 1e-4);
    }

    #[test]
    fn test_mean_ci_constant_sample() {
        let (mean, hw) = means_confidence_interval(&[5.0; 5], 0.95).unwrap();
        assert_eq!(mean, 5.0);
        assert_eq!(hw, 0.0);
        // Zero width regardless of confidence level
        let (_, hw) = means_confidence_interval(&[5.0; 5], 0.5).unwrap();
        assert_eq!(hw, 0.0);
    }

    #[test]
    fn test_mean_ci_validation() {
        assert!(means_confidence_interval(&[1.0, 2.0], 0.0).is_err());
        assert!(means_confidence_interval(&[1.0, 2.0], 1.0).is_err());
        assert!(means_confidence_interval(&[1.0], 0.95).is_err());
        assert!(means_confidence_interval(&[], 0.95).is_err());
    }

    #[test]
    fn test_proportion_ci() {
        let mut samples = vec![true; 80];
        samples.extend(vec![false; 20]);
        let (p, hw) = proportions_confidence_interval(&samples, 0.95).unwrap();
        assert_eq!(p, 0.8);
        assert!(hw > 0.0);

        // Doubling the sample at the same ratio shrinks the width by 1/sqrt(2)
        let mut doubled = vec![true; 160];
        doubled.extend(vec![false; 40]);
        let (p2, hw2) = proportions_confidence_interval(&doubled, 0.95).unwrap();
        assert_eq!(p2, 0.8);
        assert!((hw2 - hw / 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_proportion_ci_validation() {
        assert!(proportions_confidence_interval(&[], 0.95).is_err());
        assert!(proportions_confidence_interval(&[true], 1.5).is_err());
    }

    #[test]
    fn test_cdf_strict_less_than() {
        let (values, cum) = cdf(&[3.0, 1.0, 2.0, 1.0]).unwrap();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
        // P(X < 1) = 0, P(X < 2) = 0.5, P(X < 3) = 0.75
        assert_eq!(cum, vec![0.0, 0.5, 0.75]);
    }

    #[test]
    fn test_cdf_empty_input() {
        assert!(cdf(&[]).is_err());
    }

    #[test]
    fn test_pdf_two_bins() {
        let (centers, density) = pdf(&[0.0, 0.0, 0.0, 10.0, 10.0], 2).unwrap();
        assert_eq!(centers, vec![2.5, 7.5]);
        // 3 samples in [0,5), 2 in [5,10]; density = count / (n * width)
        assert!((density[0] - 3.0 / 25.0).abs() < 1e-12);
        assert!((density[1] - 2.0 / 25.0).abs() < 1e-12);
        // Densities integrate to 1
        let integral: f64 = density.iter().map(|d| d * 5.0).sum();
        assert!((integral - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pdf_degenerate_range() {
        let (centers, density) = pdf(&[4.0, 4.0], 1).unwrap();
        assert_eq!(centers, vec![4.0]);
        assert!((density[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pdf_validation() {
        assert!(pdf(&[], 2).is_err());
        assert!(pdf(&[1.0], 0).is_err());
    }
}
