//! General discrete (categorical) distribution with optional offset
//! indexing.
//!
//! The categorical distribution assigns an arbitrary probability to each
//! symbol in a contiguous integer range `offset..offset + symbols`. It is
//! the workhorse emission model of discrete hidden Markov models and the
//! target of the weighted-frequency M-step: `fit` tallies weighted symbol
//! frequencies and renormalizes so the fitted probabilities sum to 1 even
//! when the weights do not.
use crate::distributions::{
    errors::{DistributionError, DistributionResult},
    validation::validate_weights,
    UnivariateDistribution,
};

// Tolerance for the sum-to-one check at construction.
const NORMALIZATION_TOL: f64 = 1e-9;

/// Categorical distribution over `offset..offset + symbols`.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneralDiscreteDistribution {
    offset: i64,
    probabilities: Vec<f64>,
}

impl GeneralDiscreteDistribution {
    /// Construct a categorical distribution over `0..probabilities.len()`.
    ///
    /// # Errors
    /// - [`DistributionError::EmptyProbabilities`] for an empty vector.
    /// - [`DistributionError::InvalidProbability`] for a negative or
    ///   non-finite entry.
    /// - [`DistributionError::ProbabilitiesNotNormalized`] when the entries
    ///   do not sum to 1 within tolerance.
    pub fn new(probabilities: Vec<f64>) -> DistributionResult<Self> {
        Self::with_offset(0, probabilities)
    }

    /// Construct a categorical distribution over
    /// `offset..offset + probabilities.len()`.
    ///
    /// # Errors
    /// Same as [`GeneralDiscreteDistribution::new`].
    pub fn with_offset(offset: i64, probabilities: Vec<f64>) -> DistributionResult<Self> {
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
        Ok(Self { offset, probabilities })
    }

    /// Uniform categorical distribution over `symbols` symbols.
    ///
    /// # Errors
    /// [`DistributionError::EmptyProbabilities`] when `symbols` is 0.
    pub fn uniform(symbols: usize) -> DistributionResult<Self> {
        if symbols == 0 {
            return Err(DistributionError::EmptyProbabilities);
        }
        Ok(Self { offset: 0, probabilities: vec![1.0 / symbols as f64; symbols] })
    }

    /// Number of symbols in the support.
    pub fn symbols(&self) -> usize {
        self.probabilities.len()
    }

    /// First symbol of the support.
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Per-symbol probabilities, indexed from [`Self::offset`].
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Index of `x` within the support, or `None` when `x` is outside it
    /// or not an integer.
    fn support_index(&self, x: f64) -> Option<usize> {
        if !x.is_finite() || x.fract() != 0.0 {
            return None;
        }
        let shifted = x as i64 - self.offset;
        if shifted < 0 || shifted as usize >= self.probabilities.len() {
            return None;
        }
        Some(shifted as usize)
    }
}

impl UnivariateDistribution for GeneralDiscreteDistribution {
    fn mean(&self) -> f64 {
        self.probabilities
            .iter()
            .enumerate()
            .map(|(i, &p)| (self.offset + i as i64) as f64 * p)
            .sum()
    }

    fn variance(&self) -> f64 {
        let mean = self.mean();
        self.probabilities
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                let value = (self.offset + i as i64) as f64;
                p * (value - mean) * (value - mean)
            })
            .sum()
    }

    fn probability(&self, x: f64) -> f64 {
        match self.support_index(x) {
            Some(index) => self.probabilities[index],
            None => 0.0,
        }
    }

    fn log_probability(&self, x: f64) -> f64 {
        self.probability(x).ln()
    }

    /// Stepwise cumulative sum over the support.
    fn cumulative(&self, x: f64) -> DistributionResult<f64> {
        if !x.is_finite() {
            return Ok(if x > 0.0 { 1.0 } else { 0.0 });
        }
        let upper = (x.floor() as i64 - self.offset + 1).clamp(0, self.probabilities.len() as i64);
        Ok(self.probabilities[..upper as usize].iter().sum())
    }

    /// Weighted fit: weighted symbol frequencies, renormalized to sum
    /// to 1 even when the weights do not. The support (offset and symbol
    /// count) is inherited from the receiver.
    ///
    /// # Errors
    /// [`DistributionError::SampleOutOfRange`] for a sample outside the
    /// receiver's support, plus the shared weighted-fit contract errors.
    fn fit(&self, samples: &[f64], weights: Option<&[f64]>) -> DistributionResult<Self> {
        let total = validate_weights(samples.len(), weights)?;
        let mut frequencies = vec![0.0; self.probabilities.len()];
        for (index, &value) in samples.iter().enumerate() {
            let slot = self
                .support_index(value)
                .ok_or(DistributionError::SampleOutOfRange { index, value })?;
            frequencies[slot] += weights.map_or(1.0, |w| w[index]);
        }
        for frequency in &mut frequencies {
            *frequency /= total;
        }
        Ok(Self { offset: self.offset, probabilities: frequencies })
    }
}
