//! Stopping criteria and training results.
//!
//! Purpose
//! -------
//! [`TrainingOptions`] packages the two Baum-Welch stopping criteria
//! (likelihood tolerance and iteration cap) behind a validated
//! constructor; [`TrainingOutcome`] carries the trained model back to
//! the caller together with the run's diagnostics.
//!
//! Conventions
//! -----------
//! - A zero tolerance disables the likelihood criterion; a zero
//!   iteration cap disables the count criterion. Disabling both is
//!   rejected at construction since the loop would never stop.
use crate::learning::errors::{LearningError, LearningResult};

/// Stopping criteria for the expectation-maximization loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingOptions {
    tolerance: f64,
    max_iterations: usize,
}

impl TrainingOptions {
    /// Build validated options.
    ///
    /// # Errors
    /// - [`LearningError::InvalidTolerance`] for a negative or non-finite
    ///   tolerance.
    /// - [`LearningError::NonTerminatingOptions`] when both criteria are
    ///   zero.
    pub fn new(tolerance: f64, max_iterations: usize) -> LearningResult<Self> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(LearningError::InvalidTolerance { value: tolerance });
        }
        if tolerance == 0.0 && max_iterations == 0 {
            return Err(LearningError::NonTerminatingOptions);
        }
        Ok(Self { tolerance, max_iterations })
    }

    /// Absolute average log-likelihood change below which training is
    /// considered converged. Zero disables the criterion.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Maximum number of parameter updates. Zero disables the criterion.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }
}

impl Default for TrainingOptions {
    fn default() -> Self {
        Self { tolerance: 1e-3, max_iterations: 100 }
    }
}

/// Result of a training run.
#[derive(Debug, Clone)]
pub struct TrainingOutcome<M> {
    /// The trained model.
    pub model: M,
    /// Average per-sequence log-likelihood from the final E-step.
    pub log_likelihood: f64,
    /// Number of parameter updates performed.
    pub iterations: usize,
    /// Whether the tolerance criterion stopped the run (as opposed to
    /// the iteration cap or a non-finite likelihood).
    pub converged: bool,
}
