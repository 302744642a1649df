//! distributions — pluggable emission models and test distributions.
//!
//! Purpose
//! -------
//! Provide the probability distributions the HMM stack plugs in as emission
//! models, plus the distributions used for statistical testing. Each
//! distribution is an immutable value object: evaluation never mutates, and
//! weighted maximum-likelihood fitting returns a brand-new instance.
//!
//! Key behaviors
//! -------------
//! - [`UnivariateDistribution`]: mean/variance, density-or-mass evaluation,
//!   cumulative distribution (or a structured capability-gap error), and
//!   weighted fitting for scalar observations.
//! - [`MultivariateDistribution`]: the vector-observation counterpart, used
//!   by continuous hidden Markov models with vector emissions.
//! - [`ContinuousEmission`]: the seam continuous HMMs train against — a
//!   density over observation rows plus a posterior-weighted refit.
//! - Standard laws (Bernoulli, Poisson, Normal, Chi-square, Fisher F)
//!   delegate density/mass/CDF evaluation to `statrs`; the categorical,
//!   multinomial, and multivariate normal distributions carry their own
//!   numerics (the latter via `nalgebra` factorizations).
//!
//! Invariants & assumptions
//! ------------------------
//! - Weighted-fit weights are finite and non-negative but need not sum
//!   to 1; fits renormalize internally.
//! - Categorical fits renormalize so the fitted probabilities sum to 1.
//! - `fit` never mutates the receiver; callers swap in the returned
//!   instance.
//! - Chi-square and Fisher F exist for statistical testing only and reject
//!   `fit` with [`DistributionError::UnsupportedOperation`].
//!
//! Conventions
//! -----------
//! - Discrete masses are evaluated through the `f64` observation type used
//!   crate-wide; arguments outside the support yield mass 0, not an error.
//! - No I/O and no logging; errors surface as [`DistributionResult`].
use ndarray::{Array1, ArrayView1, ArrayView2};

pub mod errors;
pub mod general_discrete;
pub mod multinomial;
pub mod multivariate_normal;
pub mod univariate;
pub mod validation;

pub use self::errors::{DistributionError, DistributionResult};
pub use self::general_discrete::GeneralDiscreteDistribution;
pub use self::multinomial::MultinomialDistribution;
pub use self::multivariate_normal::MultivariateNormalDistribution;
pub use self::univariate::{
    BernoulliDistribution, ChiSquareDistribution, FisherFDistribution, NormalDistribution,
    PoissonDistribution,
};

/// Scalar-observation distributions: moments, density/mass, CDF, and
/// weighted maximum-likelihood fitting.
///
/// `probability` returns a density for continuous laws and a mass for
/// discrete ones; arguments outside a discrete support yield 0. `fit`
/// consumes parallel sample/weight arrays (weights optional, non-negative,
/// not required to sum to 1) and returns a **new** fitted instance.
pub trait UnivariateDistribution: Clone {
    /// Distribution mean.
    fn mean(&self) -> f64;

    /// Distribution variance.
    fn variance(&self) -> f64;

    /// Density (continuous) or mass (discrete) at `x`.
    fn probability(&self, x: f64) -> f64;

    /// Natural log of [`Self::probability`]; `-inf` where the mass is 0.
    fn log_probability(&self, x: f64) -> f64;

    /// Cumulative distribution `P(X ≤ x)`.
    ///
    /// # Errors
    /// [`DistributionError::UnsupportedOperation`] for distributions
    /// without a defined CDF.
    fn cumulative(&self, x: f64) -> DistributionResult<f64>;

    /// Weighted maximum-likelihood fit; returns a new instance.
    ///
    /// # Errors
    /// Weighted-fit contract violations ([`DistributionError`] variants) or
    /// [`DistributionError::UnsupportedOperation`] for distributions
    /// without a fitting procedure.
    fn fit(&self, samples: &[f64], weights: Option<&[f64]>) -> DistributionResult<Self>;
}

/// Vector-observation distributions over `R^d`.
///
/// Samples are supplied as row-major matrices (one observation per row),
/// matching the observation layout of continuous hidden Markov models.
pub trait MultivariateDistribution: Clone {
    /// Dimensionality `d` of one observation.
    fn dimension(&self) -> usize;

    /// Mean vector.
    fn mean(&self) -> Array1<f64>;

    /// Density (or mass) at the observation `x`.
    fn probability(&self, x: ArrayView1<'_, f64>) -> f64;

    /// Natural log of [`Self::probability`].
    fn log_probability(&self, x: ArrayView1<'_, f64>) -> f64;

    /// Weighted maximum-likelihood fit over the rows of `samples`.
    ///
    /// # Errors
    /// Weighted-fit contract violations or dimension mismatches.
    fn fit(
        &self, samples: ArrayView2<'_, f64>, weights: Option<&[f64]>,
    ) -> DistributionResult<Self>;
}

/// Emission seam for continuous hidden Markov models.
///
/// One implementor instance is held per hidden state; Baum-Welch calls
/// [`ContinuousEmission::refit`] each M-step with the pooled observations
/// and that state's normalized posterior occupancy as weights. Implemented
/// for every [`MultivariateDistribution`] with a fitting procedure, and for
/// [`NormalDistribution`] over single-column observation matrices.
pub trait ContinuousEmission: Clone + Send + Sync {
    /// Width of one observation row; models check incoming matrices
    /// against it before evaluating any density.
    fn dimension(&self) -> usize;

    /// Density of one observation row.
    fn density(&self, x: ArrayView1<'_, f64>) -> f64;

    /// Posterior-weighted refit over the rows of `samples`; returns a new
    /// instance and never mutates the receiver.
    fn refit(
        &self, samples: ArrayView2<'_, f64>, weights: &[f64],
    ) -> DistributionResult<Self>;
}

impl ContinuousEmission for MultivariateNormalDistribution {
    fn dimension(&self) -> usize {
        MultivariateDistribution::dimension(self)
    }

    fn density(&self, x: ArrayView1<'_, f64>) -> f64 {
        MultivariateDistribution::probability(self, x)
    }

    fn refit(
        &self, samples: ArrayView2<'_, f64>, weights: &[f64],
    ) -> DistributionResult<Self> {
        MultivariateDistribution::fit(self, samples, Some(weights))
    }
}

/// Scalar normal emissions over single-column observation matrices: the
/// univariate continuous HMM is the dimension-1 case of the vector one.
impl ContinuousEmission for NormalDistribution {
    fn dimension(&self) -> usize {
        1
    }

    fn density(&self, x: ArrayView1<'_, f64>) -> f64 {
        self.probability(x[0])
    }

    fn refit(
        &self, samples: ArrayView2<'_, f64>, weights: &[f64],
    ) -> DistributionResult<Self> {
        let column: Vec<f64> = samples.column(0).iter().copied().collect();
        self.fit(&column, Some(weights))
    }
}
