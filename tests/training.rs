//! Training behavior on the pricing corpus.

use rstest::rstest;

use price_boost::model::{RegularizationParams, SamplingParams, TreeParams};
use price_boost::testing::{scenario_records, synthetic_records, DEFAULT_TOLERANCE};
use price_boost::training::{mae, rmse, RecordingObserver};
use price_boost::{ModelArtifact, PriceRecord, TrainConfig};

fn targets(records: &[PriceRecord]) -> Vec<f32> {
    records.iter().filter_map(|r| r.target_price).collect()
}

fn mean(values: &[f32]) -> f32 {
    values.iter().sum::<f32>() / values.len() as f32
}

#[test]
fn model_beats_constant_baseline_on_held_out_rows() {
    let train = synthetic_records(400, 11);
    let test = synthetic_records(100, 12);
    let config = TrainConfig::builder()
        .n_trees(60)
        .learning_rate(0.1)
        .tree(TreeParams::depth_wise(4))
        .build()
        .unwrap();
    let artifact = ModelArtifact::train(&train, &config).unwrap();

    let y_test = targets(&test);
    let baseline = vec![mean(&targets(&train)); y_test.len()];
    let preds: Vec<f32> = test.iter().map(|r| artifact.predict(r)).collect();

    assert!(rmse(&preds, &y_test) < 0.5 * rmse(&baseline, &y_test));
    assert!(mae(&preds, &y_test) < 0.5 * mae(&baseline, &y_test));
}

#[test]
fn reported_rmse_matches_artifact_predictions() {
    let records = synthetic_records(200, 13);
    let config = TrainConfig::builder().n_trees(25).build().unwrap();
    let artifact = ModelArtifact::train(&records, &config).unwrap();

    let preds: Vec<f32> = records.iter().map(|r| artifact.predict(r)).collect();
    let recomputed = rmse(&preds, &targets(&records));
    assert!(
        (recomputed - artifact.meta().train_rmse).abs() <= f64::from(DEFAULT_TOLERANCE),
        "recomputed {recomputed} vs reported {}",
        artifact.meta().train_rmse
    );
}

#[test]
fn forest_is_structurally_valid() {
    let artifact = ModelArtifact::train(&synthetic_records(200, 3), &TrainConfig::default()).unwrap();
    let order = artifact.order();
    artifact
        .forest()
        .validate(order.n_features(), |f| order.is_categorical(f))
        .unwrap();
    assert_eq!(artifact.forest().n_trees(), 100);
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(0)]
fn thread_count_does_not_change_the_model(#[case] n_threads: usize) {
    let records = synthetic_records(150, 6);
    let build = |threads| {
        let config = TrainConfig::builder()
            .n_trees(20)
            .n_threads(threads)
            .sampling(SamplingParams { subsample: 0.8 })
            .build()
            .unwrap();
        ModelArtifact::train(&records, &config).unwrap()
    };
    assert_eq!(build(n_threads), build(1));
}

#[test]
fn different_seeds_sample_differently() {
    let records = synthetic_records(150, 6);
    let build = |seed| {
        let config = TrainConfig::builder()
            .n_trees(10)
            .seed(seed)
            .sampling(SamplingParams { subsample: 0.5 })
            .build()
            .unwrap();
        ModelArtifact::train(&records, &config).unwrap()
    };
    assert_ne!(build(1).forest(), build(2).forest());
}

#[test]
fn strong_min_gain_keeps_trees_as_stumps() {
    let config = TrainConfig::builder()
        .n_trees(5)
        .regularization(RegularizationParams {
            min_gain: 1e9,
            ..Default::default()
        })
        .build()
        .unwrap();
    let artifact = ModelArtifact::train(&synthetic_records(100, 2), &config).unwrap();
    assert!(artifact.forest().trees().all(|t| t.n_nodes() == 1));
}

#[test]
fn max_depth_bounds_leaf_count() {
    let config = TrainConfig::builder()
        .n_trees(5)
        .tree(TreeParams::depth_wise(2))
        .build()
        .unwrap();
    let artifact = ModelArtifact::train(&synthetic_records(300, 2), &config).unwrap();
    assert!(artifact.forest().trees().all(|t| t.n_leaves() <= 4));
}

#[test]
fn observer_reports_decreasing_error() {
    let mut observer = RecordingObserver::default();
    let config = TrainConfig::builder().n_trees(15).build().unwrap();
    let artifact =
        ModelArtifact::train_with_observer(&synthetic_records(120, 7), &config, &mut observer)
            .unwrap();

    assert_eq!(observer.reports.len(), 15);
    let first = observer.reports[0].train_rmse;
    let last = observer.reports[14].train_rmse;
    assert!(last < first);
    assert_eq!(last, artifact.meta().train_rmse);
}

#[test]
fn scenario_learns_both_rows() {
    let artifact = ModelArtifact::train(&scenario_records(), &TrainConfig::default()).unwrap();
    let records = scenario_records();
    assert!((artifact.predict(&records[0]) - 7.0).abs() < 0.5);
    assert!((artifact.predict(&records[1]) - 12.0).abs() < 0.5);
}

#[test]
fn unseen_categories_in_every_column_score_finite() {
    let artifact = ModelArtifact::train(&synthetic_records(100, 5), &TrainConfig::default()).unwrap();
    let record = PriceRecord::new("castle", "42", 4.0, 2000.0, 2400.0, "BTC");
    let features = artifact.assemble(&record);
    let encodings = artifact.encodings();
    for (idx, column) in [(0, "property_code"), (1, "discount_code"), (4, "payment_type")] {
        let unknown = encodings.encoder(column).unwrap().unknown_code();
        assert_eq!(features[idx], unknown as f32);
    }
    assert!(artifact.predict(&record).is_finite());
}
