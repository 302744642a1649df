//! Error types for hidden Markov model construction and evaluation.
//!
//! Purpose
//! -------
//! Structured errors for the model layer, with `From` conversions that
//! let topology and distribution failures bubble through model
//! constructors with the `?` operator.
use crate::{distributions::errors::DistributionError, topology::errors::TopologyError};
use std::{error::Error, fmt};

/// Result alias for model construction and evaluation.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised by hidden Markov models.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// The model was asked for zero emission symbols.
    InvalidSymbolCount { symbols: usize },

    /// The emission set does not provide one distribution per state.
    EmissionCountMismatch { states: usize, emissions: usize },

    /// A supplied matrix does not have the expected shape.
    ShapeMismatch {
        matrix: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// A probability entry is negative or non-finite.
    InvalidEntry {
        matrix: &'static str,
        row: usize,
        col: usize,
        value: f64,
    },

    /// A probability row does not sum to one.
    RowNotNormalized {
        matrix: &'static str,
        row: usize,
        sum: f64,
    },

    /// An observation sequence is empty.
    EmptySequence,

    /// A discrete observation lies outside the model's alphabet.
    SymbolOutOfRange {
        index: usize,
        symbol: usize,
        symbols: usize,
    },

    /// A continuous observation row has the wrong width.
    ObservationWidthMismatch { expected: usize, actual: usize },

    /// Underlying topology failure.
    Topology(TopologyError),

    /// Underlying distribution failure.
    Distribution(DistributionError),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidSymbolCount { symbols } => {
                write!(f, "model requires at least one symbol, got {symbols}")
            }
            ModelError::EmissionCountMismatch { states, emissions } => write!(
                f,
                "expected one emission distribution per state ({states}), got {emissions}"
            ),
            ModelError::ShapeMismatch { matrix, expected, actual } => write!(
                f,
                "{matrix} matrix must have shape {}x{}, got {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
            ModelError::InvalidEntry { matrix, row, col, value } => write!(
                f,
                "{matrix} entry ({row}, {col}) must be finite and non-negative, got {value}"
            ),
            ModelError::RowNotNormalized { matrix, row, sum } => {
                write!(f, "{matrix} row {row} must sum to 1, got {sum}")
            }
            ModelError::EmptySequence => {
                write!(f, "observation sequences must contain at least one step")
            }
            ModelError::SymbolOutOfRange { index, symbol, symbols } => write!(
                f,
                "observation {index} is symbol {symbol}, outside the alphabet of {symbols} symbols"
            ),
            ModelError::ObservationWidthMismatch { expected, actual } => write!(
                f,
                "observation rows must have {expected} columns, got {actual}"
            ),
            ModelError::Topology(err) => write!(f, "topology error: {err}"),
            ModelError::Distribution(err) => write!(f, "distribution error: {err}"),
        }
    }
}

impl Error for ModelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ModelError::Topology(err) => Some(err),
            ModelError::Distribution(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TopologyError> for ModelError {
    fn from(err: TopologyError) -> Self {
        ModelError::Topology(err)
    }
}

impl From<DistributionError> for ModelError {
    fn from(err: DistributionError) -> Self {
        ModelError::Distribution(err)
    }
}
