//! Multivariate normal distribution with a singularity-tolerant density.
//!
//! Purpose
//! -------
//! Emission model for vector-valued hidden Markov states: a mean vector
//! plus a covariance matrix, evaluated through `nalgebra` factorizations.
//! The density's quadratic form uses the Cholesky decomposition of the
//! covariance; when the covariance is singular (zero determinant, e.g.
//! after a degenerate weighted refit), the distribution falls back to the
//! SVD pseudo-inverse and pseudo-determinant instead of failing.
//!
//! Invariants & assumptions
//! ------------------------
//! - The covariance is validated square, symmetric (within tolerance), and
//!   finite at construction; the factorization is computed once and reused
//!   for every density evaluation.
//! - Weighted fits use the total-weight normalization (weights are
//!   posterior state occupancies during Baum-Welch) and re-factorize
//!   through the constructor, so a singular fitted covariance silently
//!   selects the pseudo-inverse path.
//!
//! Conventions
//! -----------
//! - Parameters and observations cross the API as `ndarray` types; the
//!   `nalgebra` types are an internal factorization detail, mirroring the
//!   crate convention of bridging into `nalgebra` only for decompositions.
use crate::distributions::{
    errors::{DistributionError, DistributionResult},
    validation::validate_weights,
    MultivariateDistribution,
};
use nalgebra::{Cholesky, DMatrix, DVector, Dyn};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

// Absolute symmetry tolerance for covariance validation.
const SYMMETRY_TOL: f64 = 1e-8;

const LN_TWO_PI: f64 = 1.8378770664093453;

/// Precomputed covariance factorization used by the density.
#[derive(Debug, Clone)]
enum CovarianceFactor {
    /// Positive-definite covariance: Cholesky factor.
    Cholesky(Cholesky<f64, Dyn>),
    /// Singular covariance: SVD pseudo-inverse.
    PseudoInverse(DMatrix<f64>),
}

/// Multivariate normal distribution `N(mean, covariance)`.
#[derive(Debug, Clone)]
pub struct MultivariateNormalDistribution {
    mean: Array1<f64>,
    covariance: Array2<f64>,
    factor: CovarianceFactor,
    // -(k ln 2π + ln det Σ) / 2, with the pseudo-determinant on the
    // singular path.
    ln_normalization: f64,
}

impl MultivariateNormalDistribution {
    /// Construct a multivariate normal distribution.
    ///
    /// Factorizes the covariance once: Cholesky when positive-definite,
    /// SVD pseudo-inverse with pseudo-determinant when singular.
    ///
    /// # Errors
    /// - [`DistributionError::NonSquareCovariance`] for a non-square
    ///   matrix.
    /// - [`DistributionError::DimensionMismatch`] when the mean length and
    ///   covariance size disagree.
    /// - [`DistributionError::NonFiniteCovariance`] /
    ///   [`DistributionError::NonSymmetricCovariance`] for invalid
    ///   entries.
    pub fn new(mean: Array1<f64>, covariance: Array2<f64>) -> DistributionResult<Self> {
        let k = mean.len();
        if covariance.nrows() != covariance.ncols() {
            return Err(DistributionError::NonSquareCovariance {
                rows: covariance.nrows(),
                cols: covariance.ncols(),
            });
        }
        if covariance.nrows() != k || k == 0 {
            return Err(DistributionError::DimensionMismatch {
                expected: k,
                actual: covariance.nrows(),
            });
        }
        for ((row, col), &value) in covariance.indexed_iter() {
            if !value.is_finite() {
                return Err(DistributionError::NonFiniteCovariance { row, col, value });
            }
            if (value - covariance[[col, row]]).abs() > SYMMETRY_TOL {
                return Err(DistributionError::NonSymmetricCovariance { row, col });
            }
        }

        let dense = DMatrix::from_fn(k, k, |i, j| covariance[[i, j]]);
        let (factor, ln_determinant) = match dense.clone().cholesky() {
            Some(cholesky) => {
                let ln_det = cholesky.determinant().ln();
                (CovarianceFactor::Cholesky(cholesky), ln_det)
            }
            None => Self::pseudo_inverse_factor(dense)?,
        };
        let ln_normalization = -0.5 * (k as f64 * LN_TWO_PI + ln_determinant);
        Ok(Self { mean, covariance, factor, ln_normalization })
    }

    /// SVD fallback for a singular (or otherwise non-PD) covariance:
    /// pseudo-inverse plus the log pseudo-determinant (product of the
    /// non-negligible singular values).
    fn pseudo_inverse_factor(
        dense: DMatrix<f64>,
    ) -> DistributionResult<(CovarianceFactor, f64)> {
        let svd = dense.svd(true, true);
        let max_singular = svd.singular_values.iter().cloned().fold(0.0, f64::max);
        let eps = max_singular * svd.singular_values.len() as f64 * f64::EPSILON;
        let ln_pseudo_determinant: f64 =
            svd.singular_values.iter().filter(|&&s| s > eps).map(|s| s.ln()).sum();
        let inverse = svd.pseudo_inverse(eps).map_err(|_| {
            DistributionError::InvalidParameter {
                name: "covariance",
                value: f64::NAN,
                reason: "singular value decomposition failed",
            }
        })?;
        Ok((CovarianceFactor::PseudoInverse(inverse), ln_pseudo_determinant))
    }

    /// Covariance matrix.
    pub fn covariance(&self) -> &Array2<f64> {
        &self.covariance
    }

    /// Whether the covariance required the SVD pseudo-inverse fallback.
    pub fn is_singular(&self) -> bool {
        matches!(self.factor, CovarianceFactor::PseudoInverse(_))
    }

    /// Quadratic form `(x − μ)ᵀ Σ⁻¹ (x − μ)` through the cached factor.
    fn quadratic_form(&self, x: ArrayView1<'_, f64>) -> f64 {
        let deviation = DVector::from_fn(self.mean.len(), |i, _| x[i] - self.mean[i]);
        match &self.factor {
            CovarianceFactor::Cholesky(cholesky) => {
                let solved = cholesky.solve(&deviation);
                deviation.dot(&solved)
            }
            CovarianceFactor::PseudoInverse(inverse) => deviation.dot(&(inverse * &deviation)),
        }
    }
}

impl MultivariateDistribution for MultivariateNormalDistribution {
    fn dimension(&self) -> usize {
        self.mean.len()
    }

    fn mean(&self) -> Array1<f64> {
        self.mean.clone()
    }

    fn probability(&self, x: ArrayView1<'_, f64>) -> f64 {
        self.log_probability(x).exp()
    }

    /// Log-density; observations of the wrong dimension score `-inf`.
    fn log_probability(&self, x: ArrayView1<'_, f64>) -> f64 {
        if x.len() != self.mean.len() {
            return f64::NEG_INFINITY;
        }
        self.ln_normalization - 0.5 * self.quadratic_form(x)
    }

    /// Weighted fit: weighted mean vector and weighted (biased)
    /// covariance, re-factorized through the constructor so a singular
    /// fitted covariance selects the pseudo-inverse path.
    ///
    /// # Errors
    /// [`DistributionError::DimensionMismatch`] for rows of the wrong
    /// width, plus the shared weighted-fit contract errors.
    fn fit(
        &self, samples: ArrayView2<'_, f64>, weights: Option<&[f64]>,
    ) -> DistributionResult<Self> {
        let total = validate_weights(samples.nrows(), weights)?;
        let k = self.mean.len();
        if samples.ncols() != k {
            return Err(DistributionError::DimensionMismatch {
                expected: k,
                actual: samples.ncols(),
            });
        }

        let mut mean = Array1::<f64>::zeros(k);
        for (index, row) in samples.rows().into_iter().enumerate() {
            let weight = weights.map_or(1.0, |w| w[index]);
            mean.scaled_add(weight, &row);
        }
        mean.mapv_inplace(|v| v / total);

        let mut covariance = Array2::<f64>::zeros((k, k));
        for (index, row) in samples.rows().into_iter().enumerate() {
            let weight = weights.map_or(1.0, |w| w[index]);
            for i in 0..k {
                let di = row[i] - mean[i];
                for j in 0..k {
                    covariance[[i, j]] += weight * di * (row[j] - mean[j]);
                }
            }
        }
        covariance.mapv_inplace(|v| v / total);

        Self::new(mean, covariance)
    }
}
