//! Maximum-likelihood sequence classification.
//!
//! Purpose
//! -------
//! An ensemble of per-class sequence models scored side by side: a
//! sequence is assigned to the class whose model gives it the highest
//! log-likelihood. The ensemble is generic over [`MarkovSequenceModel`],
//! so discrete and continuous models classify through the same code.
//!
//! Key behaviors
//! -------------
//! - Class models are scored in parallel; with many classes or long
//!   sequences the evaluations dominate, and they are independent.
//! - Ties, including the all-negative-infinity case where no model can
//!   produce the sequence, resolve to the lowest class index. Callers
//!   that need to detect the hopeless case can inspect the returned
//!   per-class scores.
use crate::{
    classification::errors::{ClassifierError, ClassifierResult},
    markov::MarkovSequenceModel,
};
use rayon::prelude::*;

/// A labeled classification decision with its per-class evidence.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Winning class index.
    pub label: usize,
    /// Log-likelihood of the sequence under each class model, indexed
    /// by class.
    pub log_likelihoods: Vec<f64>,
}

/// Maximum-likelihood classifier over one sequence model per class.
#[derive(Debug, Clone)]
pub struct SequenceClassifier<M: MarkovSequenceModel> {
    models: Vec<M>,
}

impl<M: MarkovSequenceModel> SequenceClassifier<M> {
    /// Build a classifier from one model per class; class `i` is scored
    /// by `models[i]`.
    ///
    /// # Errors
    /// [`ClassifierError::NoModels`] for an empty ensemble.
    pub fn new(models: Vec<M>) -> ClassifierResult<Self> {
        if models.is_empty() {
            return Err(ClassifierError::NoModels);
        }
        Ok(Self { models })
    }

    /// Number of classes.
    pub fn classes(&self) -> usize {
        self.models.len()
    }

    /// Class models, indexed by class.
    pub fn models(&self) -> &[M] {
        &self.models
    }

    /// Score a sequence under every class model in parallel.
    ///
    /// # Errors
    /// [`ClassifierError::Model`] when any model rejects the sequence as
    /// malformed.
    pub fn log_likelihoods(&self, sequence: &M::Sequence) -> ClassifierResult<Vec<f64>> {
        let scores = self
            .models
            .par_iter()
            .map(|model| model.evaluate(sequence))
            .collect::<Result<Vec<f64>, _>>()?;
        Ok(scores)
    }

    /// Assign a sequence to the class with the highest log-likelihood.
    /// Ties resolve to the lowest class index.
    ///
    /// # Errors
    /// [`ClassifierError::Model`] when any model rejects the sequence as
    /// malformed.
    pub fn classify(&self, sequence: &M::Sequence) -> ClassifierResult<Classification> {
        let log_likelihoods = self.log_likelihoods(sequence)?;
        let mut label = 0;
        for (index, &score) in log_likelihoods.iter().enumerate().skip(1) {
            if score > log_likelihoods[label] {
                label = index;
            }
        }
        Ok(Classification { label, log_likelihoods })
    }
}
