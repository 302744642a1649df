//! Errors for probability distributions (parameter validation, weighted
//! fitting, and capability gaps).
//!
//! This module defines [`DistributionError`], the single error surface for
//! every distribution in the crate. It covers construction-time parameter
//! checks, the weighted-fit input contract (parallel sample/weight arrays,
//! non-negative weights), multivariate shape checks, and deliberate
//! capability gaps (distributions without a defined fitting procedure).
//!
//! ## Conventions
//! - Indices are 0-based.
//! - Weights must be finite and non-negative but are **not** required to
//!   sum to 1; fits renormalize internally.
//! - `UnsupportedOperation` is a designed capability gap, not a bug: test
//!   distributions such as Chi-square and Fisher F have no weighted MLE.

/// Result alias for distribution operations that may produce
/// [`DistributionError`].
pub type DistributionResult<T> = Result<T, DistributionError>;

/// Unified error type for probability distributions.
///
/// Covers invalid parameters, weighted-fit input violations, multivariate
/// shape mismatches, and unsupported operations. Implements
/// `Display`/`Error` so it can be wrapped by the model and learning layers.
#[derive(Debug, Clone, PartialEq)]
pub enum DistributionError {
    // ---- Parameter validation ----
    /// A scalar parameter is outside its domain (NaN, ±inf, or out of range).
    InvalidParameter { name: &'static str, value: f64, reason: &'static str },

    /// A probability vector is empty.
    EmptyProbabilities,

    /// A probability vector entry is negative or non-finite.
    InvalidProbability { index: usize, value: f64 },

    /// A probability vector does not sum to 1 within tolerance.
    ProbabilitiesNotNormalized { sum: f64 },

    // ---- Weighted fitting ----
    /// The sample array is empty.
    EmptySample,

    /// Sample and weight arrays have different lengths.
    WeightLengthMismatch { samples: usize, weights: usize },

    /// A weight is negative or non-finite.
    InvalidWeight { index: usize, value: f64 },

    /// Every weight is zero, so no weighted estimate exists.
    ZeroWeightSum,

    /// A sample falls outside the distribution's support.
    SampleOutOfRange { index: usize, value: f64 },

    // ---- Multivariate shape ----
    /// An observation vector has the wrong dimension.
    DimensionMismatch { expected: usize, actual: usize },

    /// A covariance matrix is not square.
    NonSquareCovariance { rows: usize, cols: usize },

    /// A covariance matrix is not symmetric within tolerance.
    NonSymmetricCovariance { row: usize, col: usize },

    /// A covariance entry is NaN or ±inf.
    NonFiniteCovariance { row: usize, col: usize, value: f64 },

    // ---- Capability gaps ----
    /// The distribution does not define the requested operation.
    UnsupportedOperation { distribution: &'static str, operation: &'static str },
}

impl std::error::Error for DistributionError {}

impl std::fmt::Display for DistributionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DistributionError::InvalidParameter { name, value, reason } => {
                write!(f, "Invalid parameter `{name}` = {value}: {reason}")
            }
            DistributionError::EmptyProbabilities => {
                write!(f, "Probability vector is empty.")
            }
            DistributionError::InvalidProbability { index, value } => {
                write!(
                    f,
                    "Probability at index {index} must be finite and non-negative; got: {value}"
                )
            }
            DistributionError::ProbabilitiesNotNormalized { sum } => {
                write!(f, "Probability vector must sum to 1; got sum: {sum}")
            }
            DistributionError::EmptySample => {
                write!(f, "Sample array is empty.")
            }
            DistributionError::WeightLengthMismatch { samples, weights } => {
                write!(f, "Sample/weight length mismatch: {samples} samples, {weights} weights")
            }
            DistributionError::InvalidWeight { index, value } => {
                write!(f, "Weight at index {index} must be finite and non-negative; got: {value}")
            }
            DistributionError::ZeroWeightSum => {
                write!(f, "All weights are zero; no weighted estimate exists.")
            }
            DistributionError::SampleOutOfRange { index, value } => {
                write!(f, "Sample at index {index} is outside the support: {value}")
            }
            DistributionError::DimensionMismatch { expected, actual } => {
                write!(f, "Dimension mismatch: expected {expected}, got {actual}")
            }
            DistributionError::NonSquareCovariance { rows, cols } => {
                write!(f, "Covariance matrix must be square; got {rows}x{cols}")
            }
            DistributionError::NonSymmetricCovariance { row, col } => {
                write!(f, "Covariance matrix is not symmetric at ({row}, {col}).")
            }
            DistributionError::NonFiniteCovariance { row, col, value } => {
                write!(f, "Covariance entry at ({row}, {col}) is non-finite: {value}")
            }
            DistributionError::UnsupportedOperation { distribution, operation } => {
                write!(f, "{distribution} does not support `{operation}`.")
            }
        }
    }
}
