//! Baum-Welch training for hidden Markov models.
//!
//! Purpose
//! -------
//! Expectation-maximization fitting for both model families. The
//! family-independent loop (posterior computation, convergence checks,
//! chain parameter updates) lives in a private driver; `baum_welch`
//! trains discrete symbol models and `continuous` trains density
//! models, each contributing only its emission update.
//!
//! Key behaviors
//! -------------
//! - Training is ownership-explicit: `train` consumes the model and
//!   returns the fitted one inside a [`TrainingOutcome`] alongside the
//!   final likelihood, iteration count, and convergence flag.
//! - Stopping is governed by [`TrainingOptions`]: an absolute tolerance
//!   on the average log-likelihood change, an iteration cap, or both.
//!
//! Testing notes
//! -------------
//! Unit tests live with each trainer; the end-to-end properties
//! (likelihood improvement, classifier separation) are exercised in the
//! integration suite.
pub mod baum_welch;
pub mod continuous;
mod driver;
pub mod errors;
pub mod options;

pub use errors::{LearningError, LearningResult};
pub use options::{TrainingOptions, TrainingOutcome};
