//! Baum-Welch training for density-emission models.
//!
//! Purpose
//! -------
//! The continuous trainer: the shared EM loop drives the chain updates,
//! and the emission update refits each state's distribution on the
//! pooled observations of every training sequence, weighted by that
//! state's occupancy posteriors.
//!
//! Key behaviors
//! -------------
//! - Observations from all sequences are pooled into one matrix per
//!   M-step and shared across states; only the weight vector differs per
//!   state.
//! - A state whose total occupancy vanishes keeps its previous
//!   distribution instead of attempting a zero-weight refit.
use crate::{
    distributions::ContinuousEmission,
    learning::{
        driver::{self, EmSteps, SequenceStats},
        errors::{LearningError, LearningResult},
        options::{TrainingOptions, TrainingOutcome},
    },
    markov::ContinuousHiddenMarkovModel,
};
use ndarray::{Array1, Array2};

impl<D: ContinuousEmission> EmSteps for ContinuousHiddenMarkovModel<D> {
    type Sequence = Array2<f64>;

    fn states(&self) -> usize {
        self.transitions().nrows()
    }

    fn length(sequence: &Array2<f64>) -> usize {
        sequence.nrows()
    }

    fn emission(&self, state: usize, sequence: &Array2<f64>, t: usize) -> f64 {
        self.emissions()[state].density(sequence.row(t))
    }

    fn chain_parts(&self) -> (&Array2<f64>, &Array1<f64>) {
        (self.transitions(), self.initial())
    }

    fn chain_parts_mut(&mut self) -> (&mut Array2<f64>, &mut Array1<f64>) {
        let (transitions, initial, _) = self.parts_mut();
        (transitions, initial)
    }

    /// Refit each state's distribution on the pooled observations,
    /// weighted by that state's occupancy posteriors.
    fn update_emissions(
        &mut self, sequences: &[&Array2<f64>], stats: &[SequenceStats],
    ) -> LearningResult<()> {
        let states = self.transitions().nrows();
        let total_rows: usize = sequences.iter().map(|s| s.nrows()).sum();
        let width = sequences[0].ncols();

        let mut pooled = Array2::<f64>::zeros((total_rows, width));
        let mut offset = 0;
        for sequence in sequences {
            pooled
                .slice_mut(ndarray::s![offset..offset + sequence.nrows(), ..])
                .assign(sequence);
            offset += sequence.nrows();
        }

        let mut weights = vec![0.0; total_rows];
        for state in 0..states {
            let mut index = 0;
            let mut total = 0.0;
            for s in stats {
                for &occupancy in s.gamma.column(state) {
                    weights[index] = occupancy;
                    total += occupancy;
                    index += 1;
                }
            }
            if total == 0.0 {
                continue;
            }
            let (_, _, emissions) = self.parts_mut();
            emissions[state] = emissions[state].refit(pooled.view(), &weights)?;
        }
        Ok(())
    }
}

/// Fit a continuous model to a set of observation matrices with
/// Baum-Welch.
///
/// # Errors
/// - [`LearningError::NoSequences`] for an empty training set.
/// - [`LearningError::EmptySequence`] for a member matrix with no rows.
/// - [`LearningError::Model`] when a member matrix does not match the
///   emission dimension.
/// - [`LearningError::Distribution`] when an emission refit fails.
pub fn train<D: ContinuousEmission>(
    model: ContinuousHiddenMarkovModel<D>, sequences: &[&Array2<f64>],
    options: &TrainingOptions,
) -> LearningResult<TrainingOutcome<ContinuousHiddenMarkovModel<D>>> {
    if sequences.is_empty() {
        return Err(LearningError::NoSequences);
    }
    for (index, sequence) in sequences.iter().enumerate() {
        if sequence.nrows() == 0 {
            return Err(LearningError::EmptySequence { index });
        }
        model.validate_sequence(sequence)?;
    }

    let mut model = model;
    let (log_likelihood, iterations, converged) =
        driver::run(&mut model, sequences, options)?;
    Ok(TrainingOutcome { model, log_likelihood, iterations, converged })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        distributions::{univariate::NormalDistribution, UnivariateDistribution},
        topology::Topology,
    };
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover training-set validation and a two-regime normal
    // fit: states seeded near distinct value ranges must specialize and
    // the transition matrix must stay stochastic.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Empty training sets and empty observation matrices are rejected.
    fn train_validates_training_set() {
        let topology = Topology::ergodic(1).unwrap();
        let model = ContinuousHiddenMarkovModel::new(
            &topology,
            vec![NormalDistribution::standard()],
        )
        .unwrap();
        let options = TrainingOptions::new(0.0, 1).unwrap();

        assert!(matches!(
            train(model.clone(), &[], &options),
            Err(LearningError::NoSequences)
        ));
        let empty = Array2::<f64>::zeros((0, 1));
        assert!(matches!(
            train(model.clone(), &[&empty], &options),
            Err(LearningError::EmptySequence { index: 0 })
        ));
        // Rows narrower than the emission dimension are rejected before
        // any density is evaluated.
        let zero_width = Array2::<f64>::zeros((2, 0));
        assert!(matches!(
            train(model, &[&zero_width], &options),
            Err(LearningError::Model(_))
        ));
    }

    #[test]
    // Purpose
    // -------
    // Training a two-state model seeded near two value clusters pulls
    // each state's mean toward its cluster and keeps the chain
    // parameters stochastic.
    fn two_regime_normals_specialize_toward_their_clusters() {
        // Arrange: observations alternate between a low and a high band.
        let topology = Topology::custom(
            array![[0.5, 0.5], [0.5, 0.5]],
            array![0.5, 0.5],
        )
        .unwrap();
        let model = ContinuousHiddenMarkovModel::new(
            &topology,
            vec![
                NormalDistribution::new(0.0, 1.0).unwrap(),
                NormalDistribution::new(10.0, 1.0).unwrap(),
            ],
        )
        .unwrap();
        let sequence = array![
            [0.1], [0.3], [-0.2], [9.8], [10.2], [10.1], [0.2], [-0.1], [9.9], [10.3]
        ];
        let options = TrainingOptions::new(1e-6, 50).unwrap();

        // Act
        let outcome = train(model, &[&sequence], &options).unwrap();

        // Assert: each state's mean stays near its cluster.
        let low = outcome.model.emissions()[0].clone();
        let high = outcome.model.emissions()[1].clone();
        assert!(low.mean() < 2.0, "low state drifted to {}", low.mean());
        assert!(high.mean() > 8.0, "high state drifted to {}", high.mean());
        for row in outcome.model.transitions().rows() {
            assert!((row.sum() - 1.0).abs() < 1e-8);
        }
        assert!(outcome.log_likelihood.is_finite());
    }
}
