//! Standard univariate laws backed by `statrs`.
//!
//! Bernoulli, Poisson, and Normal support weighted maximum-likelihood
//! fitting and serve as emission models; Chi-square and Fisher F exist for
//! statistical testing and deliberately reject `fit`. Each type validates
//! its parameters once at construction and caches the `statrs` distribution
//! so density/mass/CDF evaluation in the likelihood hot path never fails.
use crate::distributions::{
    errors::{DistributionError, DistributionResult},
    validation::{validate_positive, validate_unit_interval, validate_weights,
        weighted_mean_variance},
    UnivariateDistribution,
};
use statrs::distribution::{
    Bernoulli, ChiSquared, Continuous, ContinuousCDF, Discrete, DiscreteCDF, FisherSnedecor,
    Normal, Poisson,
};
use statrs::statistics::Distribution as Moments;

// Variance floor for degenerate weighted normal fits (all mass on one
// point); keeps the refitted distribution constructible.
const VARIANCE_FLOOR: f64 = 1e-12;

/// Bernoulli distribution with success probability `p`.
#[derive(Debug, Clone)]
pub struct BernoulliDistribution {
    p: f64,
    inner: Bernoulli,
}

impl BernoulliDistribution {
    /// Construct a Bernoulli distribution.
    ///
    /// # Errors
    /// [`DistributionError::InvalidParameter`] if `p` is outside `[0, 1]`.
    pub fn new(p: f64) -> DistributionResult<Self> {
        let p = validate_unit_interval("p", p)?;
        let inner = Bernoulli::new(p).map_err(|_| DistributionError::InvalidParameter {
            name: "p",
            value: p,
            reason: "rejected by the underlying distribution",
        })?;
        Ok(Self { p, inner })
    }

    /// Success probability.
    pub fn success_probability(&self) -> f64 {
        self.p
    }
}

impl UnivariateDistribution for BernoulliDistribution {
    fn mean(&self) -> f64 {
        self.p
    }

    fn variance(&self) -> f64 {
        self.p * (1.0 - self.p)
    }

    fn probability(&self, x: f64) -> f64 {
        match x {
            x if x == 0.0 => 1.0 - self.p,
            x if x == 1.0 => self.p,
            _ => 0.0,
        }
    }

    fn log_probability(&self, x: f64) -> f64 {
        self.probability(x).ln()
    }

    fn cumulative(&self, x: f64) -> DistributionResult<f64> {
        if x < 0.0 {
            return Ok(0.0);
        }
        Ok(self.inner.cdf(x as u64))
    }

    /// Weighted fit: `p` is the weighted mean of the 0/1 samples.
    ///
    /// # Errors
    /// [`DistributionError::SampleOutOfRange`] for samples other than 0
    /// or 1, plus the shared weighted-fit contract errors.
    fn fit(&self, samples: &[f64], weights: Option<&[f64]>) -> DistributionResult<Self> {
        let total = validate_weights(samples.len(), weights)?;
        for (index, &value) in samples.iter().enumerate() {
            if value != 0.0 && value != 1.0 {
                return Err(DistributionError::SampleOutOfRange { index, value });
            }
        }
        let (mean, _) = weighted_mean_variance(samples, weights, total);
        Self::new(mean.clamp(0.0, 1.0))
    }
}

/// Poisson distribution with rate `lambda > 0`.
#[derive(Debug, Clone)]
pub struct PoissonDistribution {
    lambda: f64,
    inner: Poisson,
}

impl PoissonDistribution {
    /// Construct a Poisson distribution.
    ///
    /// # Errors
    /// [`DistributionError::InvalidParameter`] if `lambda` is not finite
    /// and strictly positive.
    pub fn new(lambda: f64) -> DistributionResult<Self> {
        let lambda = validate_positive("lambda", lambda)?;
        let inner = Poisson::new(lambda).map_err(|_| DistributionError::InvalidParameter {
            name: "lambda",
            value: lambda,
            reason: "rejected by the underlying distribution",
        })?;
        Ok(Self { lambda, inner })
    }

    /// Rate parameter.
    pub fn rate(&self) -> f64 {
        self.lambda
    }
}

impl UnivariateDistribution for PoissonDistribution {
    fn mean(&self) -> f64 {
        self.lambda
    }

    fn variance(&self) -> f64 {
        self.lambda
    }

    fn probability(&self, x: f64) -> f64 {
        if x < 0.0 || x.fract() != 0.0 {
            return 0.0;
        }
        self.inner.pmf(x as u64)
    }

    fn log_probability(&self, x: f64) -> f64 {
        if x < 0.0 || x.fract() != 0.0 {
            return f64::NEG_INFINITY;
        }
        self.inner.ln_pmf(x as u64)
    }

    fn cumulative(&self, x: f64) -> DistributionResult<f64> {
        if x < 0.0 {
            return Ok(0.0);
        }
        Ok(self.inner.cdf(x as u64))
    }

    /// Weighted fit: `lambda` is the weighted sample mean.
    ///
    /// # Errors
    /// [`DistributionError::SampleOutOfRange`] for negative counts, the
    /// shared weighted-fit contract errors, or an invalid (zero) fitted
    /// rate when every weighted sample is 0.
    fn fit(&self, samples: &[f64], weights: Option<&[f64]>) -> DistributionResult<Self> {
        let total = validate_weights(samples.len(), weights)?;
        for (index, &value) in samples.iter().enumerate() {
            if value < 0.0 || !value.is_finite() {
                return Err(DistributionError::SampleOutOfRange { index, value });
            }
        }
        let (mean, _) = weighted_mean_variance(samples, weights, total);
        Self::new(mean)
    }
}

/// Normal distribution parameterized by mean and standard deviation.
#[derive(Debug, Clone)]
pub struct NormalDistribution {
    mean: f64,
    std_dev: f64,
    inner: Normal,
}

impl NormalDistribution {
    /// Construct a normal distribution.
    ///
    /// # Errors
    /// [`DistributionError::InvalidParameter`] if `mean` is non-finite or
    /// `std_dev` is not finite and strictly positive.
    pub fn new(mean: f64, std_dev: f64) -> DistributionResult<Self> {
        if !mean.is_finite() {
            return Err(DistributionError::InvalidParameter {
                name: "mean",
                value: mean,
                reason: "parameter must be finite",
            });
        }
        let std_dev = validate_positive("std_dev", std_dev)?;
        let inner = Normal::new(mean, std_dev).map_err(|_| DistributionError::InvalidParameter {
            name: "std_dev",
            value: std_dev,
            reason: "rejected by the underlying distribution",
        })?;
        Ok(Self { mean, std_dev, inner })
    }

    /// Standard normal, `N(0, 1)`.
    pub fn standard() -> Self {
        // Parameters are in-domain, so construction cannot fail.
        Self::new(0.0, 1.0).unwrap_or_else(|_| unreachable!())
    }

    /// Standard deviation.
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }
}

impl UnivariateDistribution for NormalDistribution {
    fn mean(&self) -> f64 {
        self.mean
    }

    fn variance(&self) -> f64 {
        self.std_dev * self.std_dev
    }

    fn probability(&self, x: f64) -> f64 {
        self.inner.pdf(x)
    }

    fn log_probability(&self, x: f64) -> f64 {
        self.inner.ln_pdf(x)
    }

    fn cumulative(&self, x: f64) -> DistributionResult<f64> {
        Ok(self.inner.cdf(x))
    }

    /// Weighted fit: weighted mean and weighted (biased) variance, with
    /// the variance floored at a tiny epsilon so a degenerate weighted
    /// sample still yields a valid distribution.
    fn fit(&self, samples: &[f64], weights: Option<&[f64]>) -> DistributionResult<Self> {
        let total = validate_weights(samples.len(), weights)?;
        let (mean, variance) = weighted_mean_variance(samples, weights, total);
        Self::new(mean, variance.max(VARIANCE_FLOOR).sqrt())
    }
}

/// Chi-square distribution with `k` degrees of freedom.
///
/// Used for statistical testing only; `fit` is a deliberate capability gap.
#[derive(Debug, Clone)]
pub struct ChiSquareDistribution {
    degrees_of_freedom: f64,
    inner: ChiSquared,
}

impl ChiSquareDistribution {
    /// Construct a chi-square distribution.
    ///
    /// # Errors
    /// [`DistributionError::InvalidParameter`] if `degrees_of_freedom` is
    /// not finite and strictly positive.
    pub fn new(degrees_of_freedom: f64) -> DistributionResult<Self> {
        let degrees_of_freedom = validate_positive("degrees_of_freedom", degrees_of_freedom)?;
        let inner = ChiSquared::new(degrees_of_freedom).map_err(|_| {
            DistributionError::InvalidParameter {
                name: "degrees_of_freedom",
                value: degrees_of_freedom,
                reason: "rejected by the underlying distribution",
            }
        })?;
        Ok(Self { degrees_of_freedom, inner })
    }

    /// Degrees of freedom.
    pub fn degrees_of_freedom(&self) -> f64 {
        self.degrees_of_freedom
    }
}

impl UnivariateDistribution for ChiSquareDistribution {
    fn mean(&self) -> f64 {
        self.degrees_of_freedom
    }

    fn variance(&self) -> f64 {
        2.0 * self.degrees_of_freedom
    }

    fn probability(&self, x: f64) -> f64 {
        self.inner.pdf(x)
    }

    fn log_probability(&self, x: f64) -> f64 {
        self.inner.ln_pdf(x)
    }

    fn cumulative(&self, x: f64) -> DistributionResult<f64> {
        Ok(self.inner.cdf(x))
    }

    fn fit(&self, _samples: &[f64], _weights: Option<&[f64]>) -> DistributionResult<Self> {
        Err(DistributionError::UnsupportedOperation {
            distribution: "ChiSquareDistribution",
            operation: "fit",
        })
    }
}

/// Fisher F distribution with numerator/denominator degrees of freedom.
///
/// Used for statistical testing only; `fit` is a deliberate capability gap.
#[derive(Debug, Clone)]
pub struct FisherFDistribution {
    numerator_degrees: f64,
    denominator_degrees: f64,
    inner: FisherSnedecor,
}

impl FisherFDistribution {
    /// Construct a Fisher F distribution.
    ///
    /// # Errors
    /// [`DistributionError::InvalidParameter`] if either degrees-of-freedom
    /// parameter is not finite and strictly positive.
    pub fn new(numerator_degrees: f64, denominator_degrees: f64) -> DistributionResult<Self> {
        let numerator_degrees = validate_positive("numerator_degrees", numerator_degrees)?;
        let denominator_degrees =
            validate_positive("denominator_degrees", denominator_degrees)?;
        let inner = FisherSnedecor::new(numerator_degrees, denominator_degrees).map_err(|_| {
            DistributionError::InvalidParameter {
                name: "numerator_degrees",
                value: numerator_degrees,
                reason: "rejected by the underlying distribution",
            }
        })?;
        Ok(Self { numerator_degrees, denominator_degrees, inner })
    }

    /// Numerator degrees of freedom.
    pub fn numerator_degrees(&self) -> f64 {
        self.numerator_degrees
    }

    /// Denominator degrees of freedom.
    pub fn denominator_degrees(&self) -> f64 {
        self.denominator_degrees
    }
}

impl UnivariateDistribution for FisherFDistribution {
    /// Mean; NaN when undefined (denominator degrees ≤ 2).
    fn mean(&self) -> f64 {
        Moments::mean(&self.inner).unwrap_or(f64::NAN)
    }

    /// Variance; NaN when undefined (denominator degrees ≤ 4).
    fn variance(&self) -> f64 {
        Moments::variance(&self.inner).unwrap_or(f64::NAN)
    }

    fn probability(&self, x: f64) -> f64 {
        self.inner.pdf(x)
    }

    fn log_probability(&self, x: f64) -> f64 {
        self.inner.ln_pdf(x)
    }

    fn cumulative(&self, x: f64) -> DistributionResult<f64> {
        Ok(self.inner.cdf(x))
    }

    fn fit(&self, _samples: &[f64], _weights: Option<&[f64]>) -> DistributionResult<Self> {
        Err(DistributionError::UnsupportedOperation {
            distribution: "FisherFDistribution",
            operation: "fit",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distributions::errors::DistributionError;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Parameter validation at construction for each standard law.
    // - Mass/density/CDF evaluation against known closed-form values.
    // - Weighted-fit behavior for Bernoulli, Poisson, and Normal.
    // - The deliberate `fit` capability gap of Chi-square and Fisher F.
    //
    // They intentionally DO NOT cover:
    // - HMM emission usage (covered by the markov/learning tests).
    // - The categorical/multinomial/multivariate-normal types (own files).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Bernoulli mass and moments match the closed forms for p = 0.3.
    fn bernoulli_mass_and_moments_match_closed_forms() {
        // Arrange
        let dist = BernoulliDistribution::new(0.3).unwrap();

        // Act & Assert
        assert!((dist.mean() - 0.3).abs() < 1e-12);
        assert!((dist.variance() - 0.21).abs() < 1e-12);
        assert!((dist.probability(1.0) - 0.3).abs() < 1e-12);
        assert!((dist.probability(0.0) - 0.7).abs() < 1e-12);
        assert_eq!(dist.probability(2.0), 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Bernoulli construction rejects probabilities outside [0, 1].
    fn bernoulli_new_with_out_of_range_p_returns_invalid_parameter() {
        for bad in [-0.1, 1.5, f64::NAN] {
            assert!(matches!(
                BernoulliDistribution::new(bad),
                Err(DistributionError::InvalidParameter { name: "p", .. })
            ));
        }
    }

    #[test]
    // Purpose
    // -------
    // Bernoulli weighted fit recovers the weighted success frequency.
    //
    // Given
    // -----
    // - Samples [1, 1, 0, 0] with weights [2, 2, 1, 1].
    //
    // Expect
    // ------
    // - Fitted p = 4/6.
    fn bernoulli_fit_recovers_weighted_success_frequency() {
        // Arrange
        let dist = BernoulliDistribution::new(0.5).unwrap();
        let samples = [1.0, 1.0, 0.0, 0.0];
        let weights = [2.0, 2.0, 1.0, 1.0];

        // Act
        let fitted = dist.fit(&samples, Some(&weights)).unwrap();

        // Assert
        assert!((fitted.success_probability() - 4.0 / 6.0).abs() < 1e-12);
        // The receiver is unchanged.
        assert!((dist.success_probability() - 0.5).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Bernoulli fit rejects samples outside {0, 1}.
    fn bernoulli_fit_with_non_binary_sample_returns_sample_out_of_range() {
        let dist = BernoulliDistribution::new(0.5).unwrap();
        let result = dist.fit(&[0.0, 2.0], None);
        assert!(matches!(
            result,
            Err(DistributionError::SampleOutOfRange { index: 1, value }) if value == 2.0
        ));
    }

    #[test]
    // Purpose
    // -------
    // Poisson mass at small counts matches the closed form for λ = 2.
    fn poisson_mass_matches_closed_form() {
        // Arrange
        let dist = PoissonDistribution::new(2.0).unwrap();

        // Act & Assert: P(X = 0) = e^-2, P(X = 1) = 2 e^-2.
        assert!((dist.probability(0.0) - (-2.0_f64).exp()).abs() < 1e-12);
        assert!((dist.probability(1.0) - 2.0 * (-2.0_f64).exp()).abs() < 1e-12);
        assert_eq!(dist.probability(1.5), 0.0);
        assert_eq!(dist.probability(-1.0), 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Poisson weighted fit recovers the weighted sample mean as the rate.
    fn poisson_fit_recovers_weighted_mean_rate() {
        let dist = PoissonDistribution::new(1.0).unwrap();
        let fitted = dist.fit(&[1.0, 3.0], Some(&[1.0, 3.0])).unwrap();
        assert!((fitted.rate() - 2.5).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Normal density matches the closed form at the mean and the CDF is
    // 0.5 there.
    fn normal_density_and_cdf_match_closed_forms_at_mean() {
        // Arrange
        let dist = NormalDistribution::new(1.0, 2.0).unwrap();

        // Act & Assert
        let expected = 1.0 / (2.0 * (2.0 * std::f64::consts::PI).sqrt());
        assert!((dist.probability(1.0) - expected).abs() < 1e-12);
        assert!((dist.cumulative(1.0).unwrap() - 0.5).abs() < 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Normal weighted fit recovers weighted moments and survives a
    // degenerate (single-point) weighted sample via the variance floor.
    fn normal_fit_recovers_weighted_moments_and_floors_degenerate_variance() {
        // Arrange
        let dist = NormalDistribution::standard();

        // Act: regular weighted fit.
        let fitted = dist.fit(&[1.0, 3.0], Some(&[1.0, 1.0])).unwrap();

        // Assert
        assert!((UnivariateDistribution::mean(&fitted) - 2.0).abs() < 1e-12);
        assert!((fitted.variance() - 1.0).abs() < 1e-12);

        // Act: all weight on one point; variance would be 0 without the floor.
        let degenerate = dist.fit(&[5.0, 9.0], Some(&[1.0, 0.0])).unwrap();

        // Assert
        assert!((UnivariateDistribution::mean(&degenerate) - 5.0).abs() < 1e-12);
        assert!(degenerate.variance() > 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Chi-square and Fisher F reject `fit` with UnsupportedOperation —
    // the documented capability gap, not a bug.
    fn chi_square_and_fisher_f_fit_return_unsupported_operation() {
        let chi = ChiSquareDistribution::new(3.0).unwrap();
        assert!(matches!(
            chi.fit(&[1.0], None),
            Err(DistributionError::UnsupportedOperation { operation: "fit", .. })
        ));

        let fisher = FisherFDistribution::new(3.0, 5.0).unwrap();
        assert!(matches!(
            fisher.fit(&[1.0], None),
            Err(DistributionError::UnsupportedOperation { operation: "fit", .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Chi-square moments match the closed forms mean = k, variance = 2k.
    fn chi_square_moments_match_closed_forms() {
        let chi = ChiSquareDistribution::new(4.0).unwrap();
        assert!((chi.mean() - 4.0).abs() < 1e-12);
        assert!((chi.variance() - 8.0).abs() < 1e-12);
        // CDF is monotone and bounded.
        let lo = chi.cumulative(1.0).unwrap();
        let hi = chi.cumulative(10.0).unwrap();
        assert!(lo < hi && (0.0..=1.0).contains(&lo) && (0.0..=1.0).contains(&hi));
    }
}
