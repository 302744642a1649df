//! Supervised training of classifier ensembles.
//!
//! Purpose
//! -------
//! Fits one sequence model per class from a labeled training set: the
//! sequences are partitioned by label, each class's model is trained on
//! its own partition, and the fitted models are assembled into a
//! [`SequenceClassifier`]. The per-class fitting step is supplied by the
//! caller as a closure, so the same partitioning logic serves discrete
//! and continuous trainers (and custom per-class option schedules).
//!
//! Key behaviors
//! -------------
//! - Classes are trained in parallel; the partitions are disjoint and
//!   the trainings independent.
//! - A class with no labeled sequences keeps its untrained model and
//!   contributes zero to the reported total log-likelihood.
use crate::{
    classification::{
        classifier::SequenceClassifier,
        errors::{ClassifierError, ClassifierResult},
    },
    learning::{
        baum_welch,
        errors::LearningError,
        options::{TrainingOptions, TrainingOutcome},
    },
    markov::{HiddenMarkovModel, MarkovSequenceModel},
};
use rayon::prelude::*;

/// Train one model per class on its labeled partition of `sequences`.
///
/// `trainer` is invoked once per non-empty class with the class index,
/// the class's untrained model, and the sequences labeled with that
/// class. Returns the fitted classifier and the summed per-class
/// training log-likelihoods.
///
/// # Errors
/// - [`ClassifierError::NoModels`] for an empty ensemble.
/// - [`ClassifierError::LabelCountMismatch`] /
///   [`ClassifierError::LabelOutOfRange`] for a malformed labeling.
/// - [`ClassifierError::Learning`] when a class training fails.
pub fn train_classifier<M, S, F>(
    models: Vec<M>, sequences: &[&S], labels: &[usize], trainer: F,
) -> ClassifierResult<(SequenceClassifier<M>, f64)>
where
    M: MarkovSequenceModel<Sequence = S> + Send,
    S: ?Sized + Sync,
    F: Fn(usize, M, &[&S]) -> Result<TrainingOutcome<M>, LearningError> + Sync,
{
    if models.is_empty() {
        return Err(ClassifierError::NoModels);
    }
    if sequences.len() != labels.len() {
        return Err(ClassifierError::LabelCountMismatch {
            sequences: sequences.len(),
            labels: labels.len(),
        });
    }
    let classes = models.len();
    for (index, &label) in labels.iter().enumerate() {
        if label >= classes {
            return Err(ClassifierError::LabelOutOfRange { index, label, classes });
        }
    }

    let fitted = models
        .into_par_iter()
        .enumerate()
        .map(|(class, model)| {
            let partition: Vec<&S> = sequences
                .iter()
                .zip(labels)
                .filter(|&(_, &label)| label == class)
                .map(|(&sequence, _)| sequence)
                .collect();
            if partition.is_empty() {
                return Ok((model, 0.0));
            }
            let outcome = trainer(class, model, &partition)?;
            Ok((outcome.model, outcome.log_likelihood))
        })
        .collect::<Result<Vec<(M, f64)>, LearningError>>()?;

    let total = fitted.iter().map(|(_, log_likelihood)| log_likelihood).sum();
    let models = fitted.into_iter().map(|(model, _)| model).collect();
    Ok((SequenceClassifier::new(models)?, total))
}

/// Convenience wrapper for discrete ensembles: Baum-Welch on every
/// class with a shared set of stopping criteria.
///
/// # Errors
/// See [`train_classifier`].
pub fn train_discrete_classifier(
    models: Vec<HiddenMarkovModel>, sequences: &[&[usize]], labels: &[usize],
    options: &TrainingOptions,
) -> ClassifierResult<(SequenceClassifier<HiddenMarkovModel>, f64)> {
    train_classifier(models, sequences, labels, |_, model, partition| {
        baum_welch::train(model, partition, options)
    })
}
