//! Error types for topology construction.
//!
//! Purpose
//! -------
//! Structured errors raised while turning a topology description into an
//! initial transition matrix and state-probability vector. Each variant
//! carries the offending value so callers can report the exact failure.
use std::{error::Error, fmt};

/// Result alias for topology construction.
pub type TopologyResult<T> = Result<T, TopologyError>;

/// Errors raised while materializing a topology.
#[derive(Debug, Clone, PartialEq)]
pub enum TopologyError {
    /// The requested number of states is zero.
    InvalidStateCount { states: usize },

    /// A custom transition matrix is not square.
    NonSquareTransitions { rows: usize, cols: usize },

    /// A custom initial vector disagrees with the transition matrix size.
    InitialLengthMismatch { expected: usize, actual: usize },

    /// A transition entry is negative or non-finite.
    InvalidTransition { row: usize, col: usize, value: f64 },

    /// An initial-probability entry is negative or non-finite.
    InvalidInitial { index: usize, value: f64 },
}

impl fmt::Display for TopologyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopologyError::InvalidStateCount { states } => {
                write!(f, "topology requires at least one state, got {states}")
            }
            TopologyError::NonSquareTransitions { rows, cols } => {
                write!(f, "transition matrix must be square, got {rows}x{cols}")
            }
            TopologyError::InitialLengthMismatch { expected, actual } => write!(
                f,
                "initial probabilities must have length {expected}, got {actual}"
            ),
            TopologyError::InvalidTransition { row, col, value } => write!(
                f,
                "transition entry ({row}, {col}) must be finite and non-negative, got {value}"
            ),
            TopologyError::InvalidInitial { index, value } => write!(
                f,
                "initial probability {index} must be finite and non-negative, got {value}"
            ),
        }
    }
}

impl Error for TopologyError {}
