//! Hidden Markov model with density-valued emissions.
//!
//! Purpose
//! -------
//! The continuous-observation counterpart of the discrete model: the
//! same transition structure, but each hidden state carries an emission
//! distribution implementing [`ContinuousEmission`] instead of a row of
//! symbol probabilities.
//!
//! Conventions
//! -----------
//! - Observation sequences are `Array2<f64>` matrices, one row per time
//!   step. One-dimensional emissions (a plain normal per state) use
//!   single-column matrices.
//! - Densities may exceed one; only the relative magnitudes matter for
//!   likelihood comparison and training.
use crate::{
    distributions::ContinuousEmission,
    markov::{
        errors::{ModelError, ModelResult},
        forward_backward, MarkovSequenceModel,
    },
    topology::Topology,
};
use ndarray::{Array1, Array2};

/// Hidden Markov model whose states emit through continuous densities.
#[derive(Debug, Clone)]
pub struct ContinuousHiddenMarkovModel<D: ContinuousEmission> {
    transitions: Array2<f64>,
    initial: Array1<f64>,
    emissions: Vec<D>,
}

impl<D: ContinuousEmission> ContinuousHiddenMarkovModel<D> {
    /// Build a model from a topology and one emission distribution per
    /// state.
    ///
    /// # Errors
    /// [`ModelError::EmissionCountMismatch`] when the distribution count
    /// disagrees with the topology's state count.
    pub fn new(topology: &Topology, emissions: Vec<D>) -> ModelResult<Self> {
        if emissions.len() != topology.states() {
            return Err(ModelError::EmissionCountMismatch {
                states: topology.states(),
                emissions: emissions.len(),
            });
        }
        let (transitions, initial) = topology.create();
        Ok(Self { transitions, initial, emissions })
    }

    /// Transition matrix (row-stochastic, states x states).
    pub fn transitions(&self) -> &Array2<f64> {
        &self.transitions
    }

    /// Initial state distribution.
    pub fn initial(&self) -> &Array1<f64> {
        &self.initial
    }

    /// Per-state emission distributions, indexed by state.
    pub fn emissions(&self) -> &[D] {
        &self.emissions
    }

    /// In-place access for the trainer's parameter updates.
    pub(crate) fn parts_mut(
        &mut self,
    ) -> (&mut Array2<f64>, &mut Array1<f64>, &mut Vec<D>) {
        (&mut self.transitions, &mut self.initial, &mut self.emissions)
    }

    /// Reject observation matrices the recursions cannot evaluate:
    /// no rows, or rows narrower/wider than the emission dimension.
    pub(crate) fn validate_sequence(&self, sequence: &Array2<f64>) -> ModelResult<()> {
        if sequence.nrows() == 0 {
            return Err(ModelError::EmptySequence);
        }
        let expected = self.emissions[0].dimension();
        if sequence.ncols() != expected {
            return Err(ModelError::ObservationWidthMismatch {
                expected,
                actual: sequence.ncols(),
            });
        }
        Ok(())
    }

    /// Scaled log-likelihood of an observation matrix (one row per time
    /// step).
    ///
    /// # Errors
    /// [`ModelError::EmptySequence`] when the matrix has no rows;
    /// [`ModelError::ObservationWidthMismatch`] when the rows do not
    /// match the emission dimension.
    pub fn log_likelihood(&self, sequence: &Array2<f64>) -> ModelResult<f64> {
        self.validate_sequence(sequence)?;
        let (_, scaling) = forward_backward::forward(
            &self.transitions,
            &self.initial,
            |state, t| self.emissions[state].density(sequence.row(t)),
            sequence.nrows(),
        );
        Ok(forward_backward::log_likelihood(&scaling))
    }
}

impl<D: ContinuousEmission> MarkovSequenceModel for ContinuousHiddenMarkovModel<D> {
    type Sequence = Array2<f64>;

    fn states(&self) -> usize {
        self.transitions.nrows()
    }

    fn evaluate(&self, sequence: &Array2<f64>) -> ModelResult<f64> {
        self.log_likelihood(sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distributions::univariate::NormalDistribution;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover construction validation and single-step
    // likelihoods against the closed-form normal density.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // The emission list must supply exactly one distribution per state.
    fn new_rejects_wrong_emission_count() {
        // Arrange
        let topology = Topology::ergodic(3).unwrap();
        let emissions = vec![NormalDistribution::standard(); 2];

        // Act / Assert
        assert!(matches!(
            ContinuousHiddenMarkovModel::new(&topology, emissions),
            Err(ModelError::EmissionCountMismatch { states: 3, emissions: 2 })
        ));
    }

    #[test]
    // Purpose
    // -------
    // A one-step sequence under a single-state model scores exactly the
    // log-density of its emission distribution, and empty observation
    // matrices are rejected.
    fn single_state_log_likelihood_matches_normal_density() {
        // Arrange
        let topology = Topology::ergodic(1).unwrap();
        let model = ContinuousHiddenMarkovModel::new(
            &topology,
            vec![NormalDistribution::standard()],
        )
        .unwrap();

        // Act
        let loglik = model.log_likelihood(&array![[0.0]]).unwrap();

        // Assert: ln of the standard normal density at 0.
        let expected = -0.5 * (2.0 * std::f64::consts::PI).ln();
        assert!((loglik - expected).abs() < 1e-12);
        assert!(matches!(
            model.log_likelihood(&Array2::zeros((0, 1))),
            Err(ModelError::EmptySequence)
        ));
    }

    #[test]
    // Purpose
    // -------
    // Observation matrices whose rows do not match the emission
    // dimension are rejected with a structured error instead of
    // reaching the density evaluation.
    //
    // Given
    // -----
    // - A one-state model with scalar normal emissions (dimension 1).
    // - A zero-column matrix and a two-column matrix.
    //
    // Expect
    // ------
    // - Both score attempts return `ObservationWidthMismatch`.
    fn mismatched_observation_width_is_an_error_not_a_panic() {
        // Arrange
        let topology = Topology::ergodic(1).unwrap();
        let model = ContinuousHiddenMarkovModel::new(
            &topology,
            vec![NormalDistribution::standard()],
        )
        .unwrap();

        // Act / Assert
        assert!(matches!(
            model.log_likelihood(&Array2::zeros((2, 0))),
            Err(ModelError::ObservationWidthMismatch { expected: 1, actual: 0 })
        ));
        assert!(matches!(
            model.log_likelihood(&Array2::zeros((2, 2))),
            Err(ModelError::ObservationWidthMismatch { expected: 1, actual: 2 })
        ));
    }
}
