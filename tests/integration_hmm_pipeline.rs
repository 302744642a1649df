//! End-to-end pipeline tests: topology to trained classifier.
//!
//! Purpose
//! -------
//! Exercise the full public surface the way a caller would: build
//! untrained models from a topology, fit them with Baum-Welch on labeled
//! sequences, and classify fresh sequences — for both the discrete and
//! the continuous model family.
use ndarray::{array, Array2};
use sequence_models::{
    classification::{learning::train_classifier, SequenceClassifier},
    distributions::{univariate::NormalDistribution, UnivariateDistribution},
    learning::{
        baum_welch, continuous, LearningError, TrainingOptions,
    },
    markov::{ContinuousHiddenMarkovModel, HiddenMarkovModel},
    topology::Topology,
};

#[test]
// Purpose
// -------
// Two uniformly initialized discrete models, trained on ascending and
// descending symbol runs respectively, learn enough structure for the
// classifier to route fresh sequences from each family to the right
// class. The two training sets share identical symbol frequencies, so
// separation must come from the learned temporal structure.
fn discrete_pipeline_separates_ascending_from_descending_runs() {
    // Arrange: shared topology, one untrained model per class.
    let topology = Topology::ergodic(2).unwrap();
    let models: Vec<HiddenMarkovModel> =
        (0..2).map(|_| HiddenMarkovModel::new(&topology, 5).unwrap()).collect();
    let sequences: Vec<&[usize]> = vec![
        &[0, 1, 2, 3, 4],
        &[0, 1, 2, 3, 4, 4],
        &[4, 3, 2, 1, 0],
        &[4, 3, 2, 1, 0, 0],
    ];
    let labels = [0, 0, 1, 1];
    let options = TrainingOptions::new(1e-4, 100).unwrap();

    // Act
    let (classifier, total) = train_classifier(
        models,
        &sequences,
        &labels,
        |_, model, partition| baum_welch::train(model, partition, &options),
    )
    .unwrap();

    // Assert
    assert!(total.is_finite());
    let ascending = classifier.classify(&[0, 1, 2, 3, 4][..]).unwrap();
    let descending = classifier.classify(&[4, 3, 2, 1, 0][..]).unwrap();
    assert_eq!(ascending.label, 0);
    assert_eq!(descending.label, 1);
    assert!(ascending.log_likelihoods[0] > ascending.log_likelihoods[1]);
    assert!(descending.log_likelihoods[1] > descending.log_likelihoods[0]);
}

#[test]
// Purpose
// -------
// The continuous family runs through the same pipeline: per-class
// models with normal emissions, trained with the continuous trainer
// through the generic classifier-training entry point, classify fresh
// observation traces by their value band.
fn continuous_pipeline_separates_low_from_high_traces() {
    // Arrange: class 0 lives near 0, class 1 near 8. Seeds are offset
    // from both bands so training has to move the means.
    let topology = Topology::custom(array![[0.8, 0.2], [0.2, 0.8]], array![0.5, 0.5]).unwrap();
    let models: Vec<ContinuousHiddenMarkovModel<NormalDistribution>> = (0..2)
        .map(|_| {
            ContinuousHiddenMarkovModel::new(
                &topology,
                vec![
                    NormalDistribution::new(2.0, 2.0).unwrap(),
                    NormalDistribution::new(6.0, 2.0).unwrap(),
                ],
            )
            .unwrap()
        })
        .collect();
    let low_a = array![[0.1], [-0.2], [0.3], [0.0], [0.2]];
    let low_b = array![[-0.1], [0.4], [0.1], [-0.3]];
    let high_a = array![[7.9], [8.2], [8.1], [7.8], [8.0]];
    let high_b = array![[8.3], [7.7], [8.1], [8.0]];
    let sequences: Vec<&Array2<f64>> = vec![&low_a, &low_b, &high_a, &high_b];
    let labels = [0, 0, 1, 1];
    let options = TrainingOptions::new(1e-5, 100).unwrap();

    // Act
    let (classifier, _) = train_classifier(
        models,
        &sequences,
        &labels,
        |_, model, partition| continuous::train(model, partition, &options),
    )
    .unwrap();

    // Assert
    let low_probe = array![[0.05], [0.1], [-0.1]];
    let high_probe = array![[8.05], [7.9], [8.1]];
    assert_eq!(classifier.classify(&low_probe).unwrap().label, 0);
    assert_eq!(classifier.classify(&high_probe).unwrap().label, 1);

    // The trained class-0 emissions should sit well below class 1's.
    let class0_top = classifier.models()[0]
        .emissions()
        .iter()
        .map(|d| d.mean())
        .fold(f64::NEG_INFINITY, f64::max);
    let class1_top = classifier.models()[1]
        .emissions()
        .iter()
        .map(|d| d.mean())
        .fold(f64::NEG_INFINITY, f64::max);
    assert!(class0_top < class1_top);
}

#[test]
// Purpose
// -------
// A hand-built ensemble scores a sequence that is impossible under one
// class: that class reports negative infinity while the other wins,
// and a sequence impossible everywhere still yields a decision (class
// 0) with the evidence exposing the hopeless scores.
fn impossible_sequences_classify_without_errors() {
    // Arrange: class 0 emits only symbol 0, class 1 emits both.
    let only_zero = HiddenMarkovModel::from_matrices(
        array![[1.0]],
        array![[1.0, 0.0]],
        array![1.0],
    )
    .unwrap();
    let both = HiddenMarkovModel::from_matrices(
        array![[1.0]],
        array![[0.5, 0.5]],
        array![1.0],
    )
    .unwrap();
    let classifier = SequenceClassifier::new(vec![only_zero.clone(), both]).unwrap();

    // Act
    let mixed = classifier.classify(&[0, 1, 0][..]).unwrap();

    // Assert
    assert_eq!(mixed.label, 1);
    assert_eq!(mixed.log_likelihoods[0], f64::NEG_INFINITY);
    assert!(mixed.log_likelihoods[1].is_finite());

    // Two copies of the restrictive model: nothing can produce the
    // sequence, ties resolve to class 0.
    let hopeless = SequenceClassifier::new(vec![only_zero.clone(), only_zero]).unwrap();
    let decision = hopeless.classify(&[1][..]).unwrap();
    assert_eq!(decision.label, 0);
    assert!(decision.log_likelihoods.iter().all(|&s| s == f64::NEG_INFINITY));
}

#[test]
// Purpose
// -------
// Misconfigured stopping criteria surface as a structured error from
// the options constructor rather than a hung training loop.
fn non_terminating_options_are_rejected_up_front() {
    assert!(matches!(
        TrainingOptions::new(0.0, 0),
        Err(LearningError::NonTerminatingOptions)
    ));
}
