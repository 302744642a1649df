//! Shared expectation-maximization loop.
//!
//! Purpose
//! -------
//! The model-family-independent part of Baum-Welch: per-sequence
//! posterior computation (state occupancies and transition posteriors
//! from the scaled recursions), the convergence loop, and the chain
//! parameter updates (initial vector, transition matrix). The emission
//! update is the only family-specific step, delegated through the
//! crate-private [`EmSteps`] trait implemented by each trainer.
//!
//! Key behaviors
//! -------------
//! - The loop evaluates first and updates second, so a run configured
//!   with a zero tolerance performs exactly `max_iterations` parameter
//!   updates.
//! - A non-finite average log-likelihood halts the loop immediately with
//!   `converged == false` and the non-finite value reported as-is; the
//!   parameters from the previous update are kept.
//!
//! Invariants & assumptions
//! ------------------------
//! - Posterior rows (state occupancies per time step) are normalized to
//!   sum to one; a degenerate all-zero row is left at zero rather than
//!   divided by zero.
//! - Transition rows whose occupancy denominator vanishes are zeroed
//!   instead of producing NaN entries.
use crate::{
    learning::{errors::LearningResult, options::TrainingOptions},
    markov::forward_backward,
};
use ndarray::{Array1, Array2};

/// Per-sequence posterior statistics from one E-step.
pub(crate) struct SequenceStats {
    /// State occupancy posteriors, time steps x states.
    pub(crate) gamma: Array2<f64>,
    /// Transition posteriors, one states x states matrix per step pair.
    pub(crate) ksi: Vec<Array2<f64>>,
    /// Sequence log-likelihood under the current parameters.
    pub(crate) log_likelihood: f64,
}

/// Family-specific hooks the shared loop drives.
pub(crate) trait EmSteps {
    type Sequence: ?Sized;

    fn states(&self) -> usize;

    fn length(sequence: &Self::Sequence) -> usize;

    /// Emission density of `state` at step `t` of `sequence`.
    fn emission(&self, state: usize, sequence: &Self::Sequence, t: usize) -> f64;

    fn chain_parts(&self) -> (&Array2<f64>, &Array1<f64>);

    fn chain_parts_mut(&mut self) -> (&mut Array2<f64>, &mut Array1<f64>);

    /// Re-estimate the emission parameters from the posteriors.
    fn update_emissions(
        &mut self, sequences: &[&Self::Sequence], stats: &[SequenceStats],
    ) -> LearningResult<()>;
}

/// Run the EM loop to completion, returning the final average
/// log-likelihood, the number of parameter updates, and whether the
/// tolerance criterion fired.
pub(crate) fn run<M: EmSteps>(
    model: &mut M, sequences: &[&M::Sequence], options: &TrainingOptions,
) -> LearningResult<(f64, usize, bool)> {
    let mut iterations = 0;
    let mut previous = f64::NEG_INFINITY;
    loop {
        let stats: Vec<SequenceStats> =
            sequences.iter().map(|sequence| e_step(model, sequence)).collect();
        let current =
            stats.iter().map(|s| s.log_likelihood).sum::<f64>() / stats.len() as f64;

        if !current.is_finite() {
            return Ok((current, iterations, false));
        }
        if options.tolerance() > 0.0 && (current - previous).abs() <= options.tolerance() {
            return Ok((current, iterations, true));
        }

        m_step(model, sequences, &stats)?;
        iterations += 1;
        if options.max_iterations() > 0 && iterations >= options.max_iterations() {
            return Ok((current, iterations, false));
        }
        previous = current;
    }
}

/// One E-step: scaled forward-backward plus the posterior statistics.
fn e_step<M: EmSteps>(model: &M, sequence: &M::Sequence) -> SequenceStats {
    let length = M::length(sequence);
    let states = model.states();
    let (transitions, initial) = model.chain_parts();
    let emit = |state: usize, t: usize| model.emission(state, sequence, t);

    let (alpha, scaling) = forward_backward::forward(transitions, initial, &emit, length);
    let beta = forward_backward::backward(transitions, &scaling, &emit, length);

    let mut gamma = &alpha * &beta;
    for mut row in gamma.rows_mut() {
        let sum = row.sum();
        if sum != 0.0 {
            row.mapv_inplace(|v| v / sum);
        }
    }

    let mut ksi = Vec::with_capacity(length.saturating_sub(1));
    for t in 0..length.saturating_sub(1) {
        let mut posterior = Array2::<f64>::zeros((states, states));
        for i in 0..states {
            for j in 0..states {
                posterior[[i, j]] = scaling[t + 1]
                    * alpha[[t, i]]
                    * transitions[[i, j]]
                    * emit(j, t + 1)
                    * beta[[t + 1, j]];
            }
        }
        let total = posterior.sum();
        if total != 0.0 {
            posterior.mapv_inplace(|v| v / total);
        }
        ksi.push(posterior);
    }

    SequenceStats { gamma, ksi, log_likelihood: forward_backward::log_likelihood(&scaling) }
}

/// One M-step: initial vector and transition matrix from the pooled
/// posteriors, then the family-specific emission update.
fn m_step<M: EmSteps>(
    model: &mut M, sequences: &[&M::Sequence], stats: &[SequenceStats],
) -> LearningResult<()> {
    let states = model.states();
    {
        let (transitions, initial) = model.chain_parts_mut();

        for state in 0..states {
            initial[state] = stats.iter().map(|s| s.gamma[[0, state]]).sum::<f64>()
                / stats.len() as f64;
        }

        for i in 0..states {
            // Occupancy over all but each sequence's final step.
            let denominator: f64 = stats
                .iter()
                .map(|s| {
                    (0..s.gamma.nrows().saturating_sub(1))
                        .map(|t| s.gamma[[t, i]])
                        .sum::<f64>()
                })
                .sum();
            for j in 0..states {
                let numerator: f64 = stats
                    .iter()
                    .map(|s| s.ksi.iter().map(|m| m[[i, j]]).sum::<f64>())
                    .sum();
                transitions[[i, j]] =
                    if denominator == 0.0 { 0.0 } else { numerator / denominator };
            }
        }
    }
    model.update_emissions(sequences, stats)
}
