//! Hidden Markov model over a finite symbol alphabet.
//!
//! Purpose
//! -------
//! The discrete-emission model: a row-stochastic transition matrix, an
//! initial state distribution, and a states-by-symbols emission matrix.
//! Evaluation runs the scaled forward pass and reports the sequence
//! log-likelihood.
//!
//! Conventions
//! -----------
//! - Observations are symbol indices `0..symbols`; sequences are plain
//!   `&[usize]` slices.
//! - `new` starts from a topology with uniform emission rows, the
//!   canonical pre-training state. `from_matrices` accepts explicit
//!   parameters and enforces row-stochasticity, for models written down
//!   by hand or restored from elsewhere.
use crate::{
    markov::{
        errors::{ModelError, ModelResult},
        forward_backward, MarkovSequenceModel,
    },
    topology::Topology,
};
use ndarray::{Array1, Array2};

// Tolerance for the row-sum check in `from_matrices`.
const ROW_SUM_TOL: f64 = 1e-6;

/// Discrete-emission hidden Markov model.
#[derive(Debug, Clone, PartialEq)]
pub struct HiddenMarkovModel {
    transitions: Array2<f64>,
    initial: Array1<f64>,
    emissions: Array2<f64>,
}

impl HiddenMarkovModel {
    /// Build a model from a topology with uniform emission rows.
    ///
    /// # Errors
    /// [`ModelError::InvalidSymbolCount`] when `symbols` is zero.
    pub fn new(topology: &Topology, symbols: usize) -> ModelResult<Self> {
        if symbols == 0 {
            return Err(ModelError::InvalidSymbolCount { symbols });
        }
        let (transitions, initial) = topology.create();
        let states = transitions.nrows();
        let emissions = Array2::from_elem((states, symbols), 1.0 / symbols as f64);
        Ok(Self { transitions, initial, emissions })
    }

    /// Build a model from explicit matrices.
    ///
    /// # Errors
    /// - [`ModelError::ShapeMismatch`] when the matrices disagree on the
    ///   state count or the initial vector has the wrong length.
    /// - [`ModelError::InvalidEntry`] for negative or non-finite entries.
    /// - [`ModelError::RowNotNormalized`] when a transition or emission
    ///   row does not sum to one within `1e-6`.
    pub fn from_matrices(
        transitions: Array2<f64>, emissions: Array2<f64>, initial: Array1<f64>,
    ) -> ModelResult<Self> {
        let states = transitions.nrows();
        if transitions.ncols() != states || states == 0 {
            return Err(ModelError::ShapeMismatch {
                matrix: "transition",
                expected: (states, states),
                actual: transitions.dim(),
            });
        }
        if emissions.nrows() != states || emissions.ncols() == 0 {
            return Err(ModelError::ShapeMismatch {
                matrix: "emission",
                expected: (states, emissions.ncols().max(1)),
                actual: emissions.dim(),
            });
        }
        if initial.len() != states {
            return Err(ModelError::ShapeMismatch {
                matrix: "initial",
                expected: (states, 1),
                actual: (initial.len(), 1),
            });
        }
        validate_stochastic(&transitions, "transition")?;
        validate_stochastic(&emissions, "emission")?;
        for (index, &value) in initial.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(ModelError::InvalidEntry {
                    matrix: "initial",
                    row: index,
                    col: 0,
                    value,
                });
            }
        }
        let initial_sum: f64 = initial.sum();
        if (initial_sum - 1.0).abs() > ROW_SUM_TOL {
            return Err(ModelError::RowNotNormalized {
                matrix: "initial",
                row: 0,
                sum: initial_sum,
            });
        }
        Ok(Self { transitions, initial, emissions })
    }

    /// Number of emission symbols.
    pub fn symbols(&self) -> usize {
        self.emissions.ncols()
    }

    /// Transition matrix (row-stochastic, states x states).
    pub fn transitions(&self) -> &Array2<f64> {
        &self.transitions
    }

    /// Initial state distribution.
    pub fn initial(&self) -> &Array1<f64> {
        &self.initial
    }

    /// Emission matrix (row-stochastic, states x symbols).
    pub fn emissions(&self) -> &Array2<f64> {
        &self.emissions
    }

    /// In-place access for the trainer's parameter updates.
    pub(crate) fn parts_mut(
        &mut self,
    ) -> (&mut Array2<f64>, &mut Array1<f64>, &mut Array2<f64>) {
        (&mut self.transitions, &mut self.initial, &mut self.emissions)
    }

    /// Reject sequences the forward pass cannot index: empty sequences
    /// and symbols outside the alphabet.
    pub(crate) fn validate_sequence(&self, sequence: &[usize]) -> ModelResult<()> {
        if sequence.is_empty() {
            return Err(ModelError::EmptySequence);
        }
        let symbols = self.symbols();
        for (index, &symbol) in sequence.iter().enumerate() {
            if symbol >= symbols {
                return Err(ModelError::SymbolOutOfRange { index, symbol, symbols });
            }
        }
        Ok(())
    }

    /// Scaled log-likelihood of a symbol sequence. Sequences that are
    /// possible nowhere under the model score negative infinity.
    ///
    /// # Errors
    /// [`ModelError::EmptySequence`] / [`ModelError::SymbolOutOfRange`]
    /// for malformed input.
    pub fn log_likelihood(&self, sequence: &[usize]) -> ModelResult<f64> {
        self.validate_sequence(sequence)?;
        let (_, scaling) = forward_backward::forward(
            &self.transitions,
            &self.initial,
            |state, t| self.emissions[[state, sequence[t]]],
            sequence.len(),
        );
        Ok(forward_backward::log_likelihood(&scaling))
    }
}

/// Check that every entry of `matrix` is finite and non-negative and
/// every row sums to one within `ROW_SUM_TOL`.
fn validate_stochastic(matrix: &Array2<f64>, name: &'static str) -> ModelResult<()> {
    for ((row, col), &value) in matrix.indexed_iter() {
        if !value.is_finite() || value < 0.0 {
            return Err(ModelError::InvalidEntry { matrix: name, row, col, value });
        }
    }
    for (row, entries) in matrix.rows().into_iter().enumerate() {
        let sum = entries.sum();
        if (sum - 1.0).abs() > ROW_SUM_TOL {
            return Err(ModelError::RowNotNormalized { matrix: name, row, sum });
        }
    }
    Ok(())
}

impl MarkovSequenceModel for HiddenMarkovModel {
    type Sequence = [usize];

    fn states(&self) -> usize {
        self.transitions.nrows()
    }

    fn evaluate(&self, sequence: &[usize]) -> ModelResult<f64> {
        self.log_likelihood(sequence)
    }
}
