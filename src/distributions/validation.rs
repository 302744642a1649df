//! Shared validation helpers for distribution parameters and weighted fits.
//!
//! Purpose
//! -------
//! Centralize the small checks every distribution constructor and `fit`
//! implementation repeats: scalar domain checks, the parallel
//! sample/weight array contract, and the weighted mean/variance estimate
//! used by the scalar fits. Higher-level constructors call these helpers so
//! they can fail fast with structured [`DistributionError`] variants.
//!
//! Conventions
//! -----------
//! - Weights are finite and non-negative but need not sum to 1; callers
//!   that need normalized weights divide by the returned weight sum.
//! - Validation functions never panic on invalid input; they return
//!   [`DistributionResult`] values.
use crate::distributions::errors::{DistributionError, DistributionResult};

/// Validate a scalar parameter that must be finite and strictly positive.
///
/// # Errors
/// Returns [`DistributionError::InvalidParameter`] naming the parameter if
/// `value` is NaN, ±inf, or ≤ 0.
pub fn validate_positive(name: &'static str, value: f64) -> DistributionResult<f64> {
    if !value.is_finite() {
        return Err(DistributionError::InvalidParameter {
            name,
            value,
            reason: "parameter must be finite",
        });
    }
    if value <= 0.0 {
        return Err(DistributionError::InvalidParameter {
            name,
            value,
            reason: "parameter must be strictly positive",
        });
    }
    Ok(value)
}

/// Validate a probability parameter in the closed interval [0, 1].
///
/// # Errors
/// Returns [`DistributionError::InvalidParameter`] if `value` is NaN or
/// outside `[0, 1]`.
pub fn validate_unit_interval(name: &'static str, value: f64) -> DistributionResult<f64> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(DistributionError::InvalidParameter {
            name,
            value,
            reason: "parameter must lie in [0, 1]",
        });
    }
    Ok(value)
}

/// Validate the parallel sample/weight arrays of a weighted fit and return
/// the total weight.
///
/// Checks, in order: non-empty samples, matching lengths when weights are
/// supplied, finiteness/non-negativity of every weight, and a strictly
/// positive weight sum. When `weights` is `None` the fit is unweighted and
/// the total weight is the sample count.
///
/// # Errors
/// - [`DistributionError::EmptySample`] for an empty sample array.
/// - [`DistributionError::WeightLengthMismatch`] when lengths differ.
/// - [`DistributionError::InvalidWeight`] for a NaN/±inf/negative weight.
/// - [`DistributionError::ZeroWeightSum`] when every weight is zero.
pub fn validate_weights(samples: usize, weights: Option<&[f64]>) -> DistributionResult<f64> {
    if samples == 0 {
        return Err(DistributionError::EmptySample);
    }
    match weights {
        None => Ok(samples as f64),
        Some(w) => {
            if w.len() != samples {
                return Err(DistributionError::WeightLengthMismatch {
                    samples,
                    weights: w.len(),
                });
            }
            let mut total = 0.0;
            for (index, &value) in w.iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return Err(DistributionError::InvalidWeight { index, value });
                }
                total += value;
            }
            if total <= 0.0 {
                return Err(DistributionError::ZeroWeightSum);
            }
            Ok(total)
        }
    }
}

/// Weighted mean and (biased) weighted variance of a scalar sample.
///
/// Uses the total-weight normalization `Σ w_i (x_i − m)² / Σ w_i`, matching
/// the posterior-weighted M-step of Baum-Welch where weights are state
/// occupancy probabilities. Assumes `validate_weights` has already passed.
pub fn weighted_mean_variance(samples: &[f64], weights: Option<&[f64]>, total: f64) -> (f64, f64) {
    let mean = match weights {
        None => samples.iter().sum::<f64>() / total,
        Some(w) => samples.iter().zip(w).map(|(&x, &wi)| wi * x).sum::<f64>() / total,
    };
    let variance = match weights {
        None => samples.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / total,
        Some(w) => {
            samples.iter().zip(w).map(|(&x, &wi)| wi * (x - mean) * (x - mean)).sum::<f64>()
                / total
        }
    };
    (mean, variance)
}
