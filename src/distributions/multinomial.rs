//! Multinomial distribution over count vectors.
//!
//! Models the outcome histogram of `trials` independent categorical draws:
//! one observation is a vector of per-category counts summing to `trials`.
//! The mass function is evaluated through log-gamma factorials for
//! numerical stability, following the same log-domain convention the other
//! discrete laws use for their masses.
use crate::distributions::{
    errors::{DistributionError, DistributionResult},
    validation::validate_weights,
    MultivariateDistribution,
};
use ndarray::{Array1, ArrayView1, ArrayView2};
use statrs::function::gamma::ln_gamma;

// Tolerance for the sum-to-one check at construction.
const NORMALIZATION_TOL: f64 = 1e-9;

/// Multinomial distribution with `trials` draws over `probabilities`.
#[derive(Debug, Clone, PartialEq)]
pub struct MultinomialDistribution {
    trials: u64,
    probabilities: Vec<f64>,
}

impl MultinomialDistribution {
    /// Construct a multinomial distribution.
    ///
    /// # Errors
    /// - [`DistributionError::InvalidParameter`] when `trials` is 0.
    /// - [`DistributionError::EmptyProbabilities`],
    ///   [`DistributionError::InvalidProbability`], or
    ///   [`DistributionError::ProbabilitiesNotNormalized`] for an invalid
    ///   probability vector.
    pub fn new(trials: u64, probabilities: Vec<f64>) -> DistributionResult<Self> {
        if trials == 0 {
            return Err(DistributionError::InvalidParameter {
                name: "trials",
                value: 0.0,
                reason: "trial count must be at least 1",
            });
        }
        if probabilities.is_empty() {
            return Err(DistributionError::EmptyProbabilities);
        }
        for (index, &value) in probabilities.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(DistributionError::InvalidProbability { index, value });
            }
        }
        let sum: f64 = probabilities.iter().sum();
        if (sum - 1.0).abs() > NORMALIZATION_TOL {
            return Err(DistributionError::ProbabilitiesNotNormalized { sum });
        }
        Ok(Self { trials, probabilities })
    }

    /// Number of draws per observation.
    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Per-category probabilities.
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Validated count vector, or `None` when `x` is not a vector of
    /// non-negative integers summing to `trials`.
    fn validate_counts(&self, x: ArrayView1<'_, f64>) -> Option<()> {
        if x.len() != self.probabilities.len() {
            return None;
        }
        let mut total = 0.0;
        for &count in x.iter() {
            if !count.is_finite() || count < 0.0 || count.fract() != 0.0 {
                return None;
            }
            total += count;
        }
        if total != self.trials as f64 {
            return None;
        }
        Some(())
    }
}

impl MultivariateDistribution for MultinomialDistribution {
    fn dimension(&self) -> usize {
        self.probabilities.len()
    }

    /// Mean count vector `trials * p`.
    fn mean(&self) -> Array1<f64> {
        Array1::from_iter(self.probabilities.iter().map(|&p| self.trials as f64 * p))
    }

    fn probability(&self, x: ArrayView1<'_, f64>) -> f64 {
        self.log_probability(x).exp()
    }

    /// Log-mass via log-gamma factorials:
    /// `ln n! − Σ ln x_i! + Σ x_i ln p_i`. Count vectors outside the
    /// support (wrong length, negative/fractional entries, or counts not
    /// summing to `trials`) have mass 0.
    fn log_probability(&self, x: ArrayView1<'_, f64>) -> f64 {
        if self.validate_counts(x).is_none() {
            return f64::NEG_INFINITY;
        }
        let mut log_mass = ln_gamma(self.trials as f64 + 1.0);
        for (&count, &p) in x.iter().zip(&self.probabilities) {
            log_mass -= ln_gamma(count + 1.0);
            if count > 0.0 {
                // 0 * ln(0) is a zero contribution, not NaN.
                log_mass += count * p.ln();
            }
        }
        log_mass
    }

    /// Weighted fit: the category probabilities become the weighted mean
    /// of the observed count proportions; the trial count is inherited
    /// from the receiver.
    ///
    /// # Errors
    /// [`DistributionError::DimensionMismatch`] for rows of the wrong
    /// width, [`DistributionError::SampleOutOfRange`] for rows outside the
    /// support, plus the shared weighted-fit contract errors.
    fn fit(
        &self, samples: ArrayView2<'_, f64>, weights: Option<&[f64]>,
    ) -> DistributionResult<Self> {
        let total = validate_weights(samples.nrows(), weights)?;
        if samples.ncols() != self.probabilities.len() {
            return Err(DistributionError::DimensionMismatch {
                expected: self.probabilities.len(),
                actual: samples.ncols(),
            });
        }
        let mut proportions = vec![0.0; self.probabilities.len()];
        for (index, row) in samples.rows().into_iter().enumerate() {
            self.validate_counts(row)
                .ok_or(DistributionError::SampleOutOfRange { index, value: row.sum() })?;
            let weight = weights.map_or(1.0, |w| w[index]);
            for (slot, &count) in proportions.iter_mut().zip(row.iter()) {
                *slot += weight * count / self.trials as f64;
            }
        }
        for slot in &mut proportions {
            *slot /= total;
        }
        Self::new(self.trials, proportions)
    }
}
