//! Error types for Baum-Welch training.
//!
//! Purpose
//! -------
//! Structured errors for the learning layer, with `From` conversions so
//! model validation and distribution refit failures propagate through
//! the trainers with the `?` operator.
use crate::{distributions::errors::DistributionError, markov::errors::ModelError};
use std::{error::Error, fmt};

/// Result alias for training entry points.
pub type LearningResult<T> = Result<T, LearningError>;

/// Errors raised while configuring or running training.
#[derive(Debug, Clone, PartialEq)]
pub enum LearningError {
    /// Training was invoked with no sequences at all.
    NoSequences,

    /// One of the training sequences is empty.
    EmptySequence { index: usize },

    /// Tolerance is negative or non-finite.
    InvalidTolerance { value: f64 },

    /// Both stopping criteria are disabled, so training would never
    /// terminate.
    NonTerminatingOptions,

    /// Underlying model failure (sequence validation, shape checks).
    Model(ModelError),

    /// Underlying distribution failure during an emission refit.
    Distribution(DistributionError),
}

impl fmt::Display for LearningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LearningError::NoSequences => {
                write!(f, "training requires at least one observation sequence")
            }
            LearningError::EmptySequence { index } => {
                write!(f, "training sequence {index} is empty")
            }
            LearningError::InvalidTolerance { value } => {
                write!(f, "tolerance must be finite and non-negative, got {value}")
            }
            LearningError::NonTerminatingOptions => write!(
                f,
                "zero tolerance with zero max iterations disables both stopping criteria"
            ),
            LearningError::Model(err) => write!(f, "model error: {err}"),
            LearningError::Distribution(err) => write!(f, "distribution error: {err}"),
        }
    }
}

impl Error for LearningError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LearningError::Model(err) => Some(err),
            LearningError::Distribution(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModelError> for LearningError {
    fn from(err: ModelError) -> Self {
        LearningError::Model(err)
    }
}

impl From<DistributionError> for LearningError {
    fn from(err: DistributionError) -> Self {
        LearningError::Distribution(err)
    }
}
