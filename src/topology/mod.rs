//! State-graph topologies for hidden Markov models.
//!
//! Purpose
//! -------
//! Describes the connectivity of a model's hidden states and materializes
//! it into an initial transition matrix and state-probability vector. An
//! ergodic topology connects every state to every other with uniform or
//! randomized rows; a custom topology carries caller-supplied matrices
//! through validation unchanged.
//!
//! Key behaviors
//! -------------
//! - `create` returns freshly owned matrices every call, so a single
//!   topology value can seed many independent models (one per class in a
//!   classifier ensemble, for instance).
//! - Randomized ergodic rows are drawn uniformly and renormalized to sum
//!   to one; the initial state vector concentrates all mass on state 0
//!   either way, making state 0 the canonical start state.
//!
//! Invariants & assumptions
//! ------------------------
//! - Custom transitions must be square and match the initial vector's
//!   length; entries must be finite and non-negative. Row normalization
//!   is deliberately NOT enforced here, since training renormalizes rows
//!   on every update.
//!
//! Downstream usage
//! ----------------
//! Consumed by the model constructors in `crate::markov` as the common
//! entry point for choosing a state-count and initial parameters.
pub mod errors;

use errors::{TopologyError, TopologyResult};
use ndarray::{Array1, Array2};
use rand::Rng;

/// Connectivity description for a hidden-state graph.
#[derive(Debug, Clone, PartialEq)]
pub enum Topology {
    /// Fully connected states with uniform or randomized transition rows.
    Ergodic { states: usize, random: bool },
    /// Caller-supplied transition matrix and initial probabilities.
    Custom {
        transitions: Array2<f64>,
        initial: Array1<f64>,
    },
}

impl Topology {
    /// Fully connected topology with uniform transition rows.
    ///
    /// # Errors
    /// [`TopologyError::InvalidStateCount`] when `states` is zero.
    pub fn ergodic(states: usize) -> TopologyResult<Self> {
        if states == 0 {
            return Err(TopologyError::InvalidStateCount { states });
        }
        Ok(Topology::Ergodic { states, random: false })
    }

    /// Fully connected topology with randomized, row-normalized
    /// transition rows. Randomization breaks the symmetry between states
    /// that makes uniform initialization a stationary point of training.
    ///
    /// # Errors
    /// [`TopologyError::InvalidStateCount`] when `states` is zero.
    pub fn ergodic_random(states: usize) -> TopologyResult<Self> {
        if states == 0 {
            return Err(TopologyError::InvalidStateCount { states });
        }
        Ok(Topology::Ergodic { states, random: true })
    }

    /// Topology from explicit transition and initial-probability values.
    ///
    /// # Errors
    /// - [`TopologyError::NonSquareTransitions`] for a non-square matrix.
    /// - [`TopologyError::InitialLengthMismatch`] when the vector length
    ///   disagrees with the matrix size.
    /// - [`TopologyError::InvalidTransition`] /
    ///   [`TopologyError::InvalidInitial`] for negative or non-finite
    ///   entries.
    pub fn custom(transitions: Array2<f64>, initial: Array1<f64>) -> TopologyResult<Self> {
        if transitions.nrows() != transitions.ncols() {
            return Err(TopologyError::NonSquareTransitions {
                rows: transitions.nrows(),
                cols: transitions.ncols(),
            });
        }
        if transitions.nrows() == 0 {
            return Err(TopologyError::InvalidStateCount { states: 0 });
        }
        if initial.len() != transitions.nrows() {
            return Err(TopologyError::InitialLengthMismatch {
                expected: transitions.nrows(),
                actual: initial.len(),
            });
        }
        for ((row, col), &value) in transitions.indexed_iter() {
            if !value.is_finite() || value < 0.0 {
                return Err(TopologyError::InvalidTransition { row, col, value });
            }
        }
        for (index, &value) in initial.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(TopologyError::InvalidInitial { index, value });
            }
        }
        Ok(Topology::Custom { transitions, initial })
    }

    /// Number of hidden states this topology describes.
    pub fn states(&self) -> usize {
        match self {
            Topology::Ergodic { states, .. } => *states,
            Topology::Custom { transitions, .. } => transitions.nrows(),
        }
    }

    /// Materialize the topology into owned `(transitions, initial)`
    /// matrices. Each call produces an independent copy (and an
    /// independent random draw for randomized topologies).
    pub fn create(&self) -> (Array2<f64>, Array1<f64>) {
        match self {
            Topology::Ergodic { states, random } => {
                let n = *states;
                let transitions = if *random {
                    let mut rng = rand::rng();
                    let mut matrix = Array2::from_shape_fn((n, n), |_| rng.random::<f64>());
                    for mut row in matrix.rows_mut() {
                        let sum: f64 = row.sum();
                        row.mapv_inplace(|v| v / sum);
                    }
                    matrix
                } else {
                    Array2::from_elem((n, n), 1.0 / n as f64)
                };
                let mut initial = Array1::zeros(n);
                initial[0] = 1.0;
                (transitions, initial)
            }
            Topology::Custom { transitions, initial } => {
                (transitions.clone(), initial.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover ergodic materialization (uniform and randomized),
    // custom validation, and the owned-copy contract of `create`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // A uniform ergodic topology materializes 1/n transition rows and an
    // initial vector concentrated on state 0.
    fn uniform_ergodic_creates_uniform_rows_and_state_zero_start() {
        // Arrange
        let topology = Topology::ergodic(4).unwrap();

        // Act
        let (transitions, initial) = topology.create();

        // Assert
        assert_eq!(transitions.dim(), (4, 4));
        assert!(transitions.iter().all(|&v| (v - 0.25).abs() < 1e-12));
        assert_eq!(initial.len(), 4);
        assert!((initial[0] - 1.0).abs() < 1e-12);
        assert!(initial.iter().skip(1).all(|&v| v == 0.0));
    }

    #[test]
    // Purpose
    // -------
    // Randomized ergodic rows are normalized to sum to one.
    fn random_ergodic_rows_sum_to_one() {
        // Arrange
        let topology = Topology::ergodic_random(3).unwrap();

        // Act
        let (transitions, _) = topology.create();

        // Assert
        for row in transitions.rows() {
            assert!((row.sum() - 1.0).abs() < 1e-12);
            assert!(row.iter().all(|&v| v >= 0.0));
        }
    }

    #[test]
    // Purpose
    // -------
    // Custom construction rejects non-square matrices, mismatched
    // initial lengths, and negative entries.
    fn custom_rejects_malformed_inputs() {
        assert!(matches!(
            Topology::custom(array![[0.5, 0.5]], array![1.0]),
            Err(TopologyError::NonSquareTransitions { rows: 1, cols: 2 })
        ));
        assert!(matches!(
            Topology::custom(array![[1.0]], array![0.5, 0.5]),
            Err(TopologyError::InitialLengthMismatch { expected: 1, actual: 2 })
        ));
        assert!(matches!(
            Topology::custom(array![[-0.1, 1.1], [0.5, 0.5]], array![1.0, 0.0]),
            Err(TopologyError::InvalidTransition { row: 0, col: 0, .. })
        ));
        assert!(matches!(
            Topology::custom(array![[0.5, 0.5], [0.5, 0.5]], array![1.0, f64::NAN]),
            Err(TopologyError::InvalidInitial { index: 1, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Zero-state topologies are rejected through every constructor.
    fn zero_states_are_rejected() {
        assert!(matches!(
            Topology::ergodic(0),
            Err(TopologyError::InvalidStateCount { states: 0 })
        ));
        assert!(matches!(
            Topology::ergodic_random(0),
            Err(TopologyError::InvalidStateCount { states: 0 })
        ));
    }

    #[test]
    // Purpose
    // -------
    // `create` on a custom topology hands back independent owned copies:
    // mutating one model's matrices must not leak into a sibling's.
    fn custom_create_returns_independent_copies() {
        // Arrange
        let topology = Topology::custom(
            array![[0.7, 0.3], [0.4, 0.6]],
            array![0.9, 0.1],
        )
        .unwrap();

        // Act
        let (mut first, _) = topology.create();
        first[[0, 0]] = 0.0;
        let (second, _) = topology.create();

        // Assert
        assert!((second[[0, 0]] - 0.7).abs() < 1e-12);
    }
}
