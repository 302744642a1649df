//! Sequence classification over per-class hidden Markov models.
//!
//! Purpose
//! -------
//! The supervised layer on top of the model families: one model per
//! class, maximum-likelihood assignment at prediction time, and
//! label-partitioned Baum-Welch at training time.
//!
//! Downstream usage
//! ----------------
//! Typical flow: build untrained models from a shared topology, call
//! [`learning::train_discrete_classifier`] on the labeled corpus, then
//! [`SequenceClassifier::classify`] on fresh sequences.
pub mod classifier;
pub mod errors;
pub mod learning;

pub use classifier::{Classification, SequenceClassifier};
pub use errors::{ClassifierError, ClassifierResult};
