//! sequence_models — hidden Markov models for sequence learning and
//! classification.
//!
//! Purpose
//! -------
//! Serve as the crate root for the hidden-Markov-model toolkit: emission
//! distributions, state-graph topologies, the two model families
//! (discrete symbol emissions and continuous density emissions),
//! Baum-Welch training, and maximum-likelihood sequence classification.
//!
//! Key behaviors
//! -------------
//! - Re-export the core modules (`distributions`, `topology`, `markov`,
//!   `learning`, `classification`) as the public crate surface.
//! - All likelihood work runs on the log scale through per-step
//!   rescaling, so long sequences evaluate without underflow.
//! - Negative infinity is a valid likelihood ("impossible under this
//!   model"); `Result` errors are reserved for malformed input and
//!   invalid parameters.
//!
//! Invariants & assumptions
//! ------------------------
//! - Probability matrices handed across module boundaries are validated
//!   at construction; inner loops assume the documented invariants hold
//!   and do not re-check them.
//! - Observation indexing is zero-based throughout: symbols `0..symbols`
//!   for discrete models, one observation row per time step for
//!   continuous models.
//!
//! Conventions
//! -----------
//! - Each module owns a structured error enum with a `XxxResult` alias;
//!   cross-layer failures propagate through `From` conversions.
//! - Dense numerics use `ndarray`; matrix factorizations bridge into
//!   `nalgebra`; elementary distributions wrap `statrs`.
//!
//! Downstream usage
//! ----------------
//! Typical flow: pick a [`topology::Topology`], build one model per
//! class, fit with [`learning::baum_welch::train`] (or the classifier
//! helpers in [`classification::learning`]), then score fresh sequences
//! with [`classification::SequenceClassifier`].
//!
//! Testing notes
//! -------------
//! Unit tests live next to each module; the end-to-end pipeline
//! (topology to trained classifier) is exercised in the integration
//! suite under `tests/`.

pub mod classification;
pub mod distributions;
pub mod learning;
pub mod markov;
pub mod topology;
