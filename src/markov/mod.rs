//! Hidden Markov models and their shared evaluation core.
//!
//! Purpose
//! -------
//! Hosts the two model families (discrete symbol emissions and
//! continuous density emissions), the scaled forward-backward recursions
//! they share, and the [`MarkovSequenceModel`] trait that lets the
//! classifier layer score either family uniformly.
//!
//! Key behaviors
//! -------------
//! - Likelihoods are always reported on the log scale, computed through
//!   per-step rescaling so arbitrarily long sequences stay in range.
//! - Negative infinity is a valid evaluation result meaning "impossible
//!   under this model"; errors are reserved for malformed input.
//!
//! Downstream usage
//! ----------------
//! `crate::learning` drives Baum-Welch over these models through their
//! crate-private parameter accessors; `crate::classification` scores
//! sequences through [`MarkovSequenceModel`].
pub mod continuous;
pub mod discrete;
pub mod errors;
pub mod forward_backward;

pub use continuous::ContinuousHiddenMarkovModel;
pub use discrete::HiddenMarkovModel;
pub use errors::{ModelError, ModelResult};

/// Common scoring surface over the model families.
///
/// `Sequence` is the observation type a model consumes: symbol slices
/// for discrete models, observation matrices for continuous ones. The
/// bound is `?Sized` so slice types qualify directly.
pub trait MarkovSequenceModel: Send + Sync {
    type Sequence: ?Sized + Sync;

    /// Number of hidden states.
    fn states(&self) -> usize;

    /// Log-likelihood of a sequence under this model. Negative infinity
    /// is a valid result; errors indicate malformed input.
    fn evaluate(&self, sequence: &Self::Sequence) -> ModelResult<f64>;
}
