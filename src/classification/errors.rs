//! Error types for the sequence-classifier layer.
use crate::{learning::errors::LearningError, markov::errors::ModelError};
use std::{error::Error, fmt};

/// Result alias for classifier construction, scoring, and training.
pub type ClassifierResult<T> = Result<T, ClassifierError>;

/// Errors raised by the classifier layer.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifierError {
    /// The classifier was built with no class models.
    NoModels,

    /// The label list length disagrees with the sequence count.
    LabelCountMismatch { sequences: usize, labels: usize },

    /// A training label names a class outside the ensemble.
    LabelOutOfRange {
        index: usize,
        label: usize,
        classes: usize,
    },

    /// Underlying model failure while scoring a sequence.
    Model(ModelError),

    /// Underlying training failure for one of the class models.
    Learning(LearningError),
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifierError::NoModels => {
                write!(f, "a classifier requires at least one class model")
            }
            ClassifierError::LabelCountMismatch { sequences, labels } => write!(
                f,
                "expected one label per sequence ({sequences}), got {labels}"
            ),
            ClassifierError::LabelOutOfRange { index, label, classes } => write!(
                f,
                "label {label} at position {index} exceeds the {classes} known classes"
            ),
            ClassifierError::Model(err) => write!(f, "model error: {err}"),
            ClassifierError::Learning(err) => write!(f, "learning error: {err}"),
        }
    }
}

impl Error for ClassifierError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ClassifierError::Model(err) => Some(err),
            ClassifierError::Learning(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModelError> for ClassifierError {
    fn from(err: ModelError) -> Self {
        ClassifierError::Model(err)
    }
}

impl From<LearningError> for ClassifierError {
    fn from(err: LearningError) -> Self {
        ClassifierError::Learning(err)
    }
}
