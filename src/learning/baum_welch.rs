//! Baum-Welch training for discrete-emission models.
//!
//! Purpose
//! -------
//! The discrete trainer: plugs the emission-matrix re-estimation into
//! the shared EM loop. Emission probabilities are re-estimated as
//! occupancy-weighted symbol frequencies; a symbol a state never
//! accounts for is floored at a tiny positive mass instead of zero, so
//! one absent symbol cannot permanently bar a state from emitting it in
//! later iterations.
//!
//! Conventions
//! -----------
//! - `train` takes the model by value and returns it inside the outcome,
//!   making the parameter mutation explicit in the signature.
use crate::{
    learning::{
        driver::{self, EmSteps, SequenceStats},
        errors::{LearningError, LearningResult},
        options::{TrainingOptions, TrainingOutcome},
    },
    markov::HiddenMarkovModel,
};
use ndarray::{Array1, Array2};

// Floor for emission entries whose posterior numerator vanishes.
const EMISSION_FLOOR: f64 = 1e-10;

impl EmSteps for HiddenMarkovModel {
    type Sequence = [usize];

    fn states(&self) -> usize {
        self.transitions().nrows()
    }

    fn length(sequence: &[usize]) -> usize {
        sequence.len()
    }

    fn emission(&self, state: usize, sequence: &[usize], t: usize) -> f64 {
        self.emissions()[[state, sequence[t]]]
    }

    fn chain_parts(&self) -> (&Array2<f64>, &Array1<f64>) {
        (self.transitions(), self.initial())
    }

    fn chain_parts_mut(&mut self) -> (&mut Array2<f64>, &mut Array1<f64>) {
        let (transitions, initial, _) = self.parts_mut();
        (transitions, initial)
    }

    /// Occupancy-weighted symbol frequencies, floored where a state
    /// never accounts for a symbol.
    fn update_emissions(
        &mut self, sequences: &[&[usize]], stats: &[SequenceStats],
    ) -> LearningResult<()> {
        let states = self.transitions().nrows();
        let symbols = self.symbols();
        let (_, _, emissions) = self.parts_mut();

        for state in 0..states {
            let denominator: f64 = stats
                .iter()
                .map(|s| s.gamma.column(state).sum())
                .sum();
            for symbol in 0..symbols {
                let numerator: f64 = sequences
                    .iter()
                    .zip(stats)
                    .map(|(sequence, s)| {
                        sequence
                            .iter()
                            .enumerate()
                            .filter(|&(_, &observed)| observed == symbol)
                            .map(|(t, _)| s.gamma[[t, state]])
                            .sum::<f64>()
                    })
                    .sum();
                emissions[[state, symbol]] = if numerator == 0.0 {
                    EMISSION_FLOOR
                } else {
                    numerator / denominator
                };
            }
        }
        Ok(())
    }
}

/// Fit a discrete model to a set of symbol sequences with Baum-Welch.
///
/// # Errors
/// - [`LearningError::NoSequences`] for an empty training set.
/// - [`LearningError::EmptySequence`] for an empty member sequence.
/// - [`LearningError::Model`] when a sequence contains a symbol outside
///   the model's alphabet.
pub fn train(
    model: HiddenMarkovModel, sequences: &[&[usize]], options: &TrainingOptions,
) -> LearningResult<TrainingOutcome<HiddenMarkovModel>> {
    if sequences.is_empty() {
        return Err(LearningError::NoSequences);
    }
    for (index, sequence) in sequences.iter().enumerate() {
        if sequence.is_empty() {
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
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover input validation, stochasticity of the
    // re-estimated parameters, monotone likelihood improvement, the
    // iteration-cap semantics under a zero tolerance, and the clean halt
    // on an impossible training set.
    // -------------------------------------------------------------------------

    fn seeded_model() -> HiddenMarkovModel {
        // Asymmetric start so uniform symmetry cannot stall training.
        HiddenMarkovModel::from_matrices(
            array![[0.6, 0.4], [0.3, 0.7]],
            array![[0.6, 0.3, 0.1], [0.1, 0.3, 0.6]],
            array![1.0, 0.0],
        )
        .unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Training rejects empty training sets, empty member sequences, and
    // out-of-alphabet symbols before touching the model.
    fn train_validates_training_set() {
        let options = TrainingOptions::new(0.0, 1).unwrap();
        assert!(matches!(
            train(seeded_model(), &[], &options),
            Err(LearningError::NoSequences)
        ));
        assert!(matches!(
            train(seeded_model(), &[&[0, 1], &[]], &options),
            Err(LearningError::EmptySequence { index: 1 })
        ));
        assert!(matches!(
            train(seeded_model(), &[&[0, 9]], &options),
            Err(LearningError::Model(_))
        ));
    }

    #[test]
    // Purpose
    // -------
    // After a parameter update, every transition and emission row still
    // sums to one (within the emission-floor slack) and the initial
    // vector remains a distribution.
    fn reestimated_parameters_remain_stochastic() {
        // Arrange
        let sequences: Vec<&[usize]> = vec![&[0, 0, 1, 2, 2], &[0, 1, 1, 2, 0]];
        let options = TrainingOptions::new(0.0, 5).unwrap();

        // Act
        let outcome = train(seeded_model(), &sequences, &options).unwrap();

        // Assert
        for row in outcome.model.transitions().rows() {
            assert!((row.sum() - 1.0).abs() < 1e-8);
            assert!(row.iter().all(|&v| v >= 0.0));
        }
        for row in outcome.model.emissions().rows() {
            assert!((row.sum() - 1.0).abs() < 1e-6);
            assert!(row.iter().all(|&v| v > 0.0));
        }
        assert!((outcome.model.initial().sum() - 1.0).abs() < 1e-8);
    }

    #[test]
    // Purpose
    // -------
    // Each EM update improves (or preserves) the average training
    // log-likelihood: comparing a 1-update run against a 10-update run
    // on the same data must not show a decrease.
    fn likelihood_does_not_decrease_across_updates() {
        // Arrange
        let sequences: Vec<&[usize]> = vec![&[0, 1, 2, 2, 1, 0], &[0, 0, 1, 2]];
        let short = TrainingOptions::new(0.0, 1).unwrap();
        let long = TrainingOptions::new(0.0, 10).unwrap();

        // Act
        let after_one = train(seeded_model(), &sequences, &short).unwrap();
        let after_ten = train(seeded_model(), &sequences, &long).unwrap();

        // Assert
        assert!(after_ten.log_likelihood >= after_one.log_likelihood - 1e-10);
    }

    #[test]
    // Purpose
    // -------
    // With the tolerance disabled the loop performs exactly the
    // requested number of parameter updates and reports convergence as
    // false; with a generous tolerance it stops early and reports true.
    fn stopping_criteria_drive_iteration_count_and_convergence_flag() {
        // Arrange
        let sequences: Vec<&[usize]> = vec![&[0, 1, 2, 1, 0]];

        // Act
        let capped = train(
            seeded_model(),
            &sequences,
            &TrainingOptions::new(0.0, 4).unwrap(),
        )
        .unwrap();
        let tolerant = train(
            seeded_model(),
            &sequences,
            &TrainingOptions::new(1e3, 50).unwrap(),
        )
        .unwrap();

        // Assert
        assert_eq!(capped.iterations, 4);
        assert!(!capped.converged);
        assert!(tolerant.converged);
        assert!(tolerant.iterations < 50);
    }

    #[test]
    // Purpose
    // -------
    // A training set that is impossible under the model (a symbol with
    // zero mass in every state) halts on the first evaluation with a
    // negative-infinity likelihood instead of corrupting the parameters
    // with NaN.
    fn impossible_training_set_halts_with_negative_infinity() {
        // Arrange
        let model = HiddenMarkovModel::from_matrices(
            array![[0.5, 0.5], [0.5, 0.5]],
            array![[0.7, 0.3, 0.0], [0.4, 0.6, 0.0]],
            array![0.5, 0.5],
        )
        .unwrap();
        let sequences: Vec<&[usize]> = vec![&[0, 2, 1]];
        let options = TrainingOptions::new(1e-4, 10).unwrap();

        // Act
        let outcome = train(model.clone(), &sequences, &options).unwrap();

        // Assert
        assert_eq!(outcome.log_likelihood, f64::NEG_INFINITY);
        assert_eq!(outcome.iterations, 0);
        assert!(!outcome.converged);
        // Parameters untouched and finite.
        assert_eq!(outcome.model.transitions(), model.transitions());
        assert!(outcome.model.emissions().iter().all(|v| v.is_finite()));
    }
}
