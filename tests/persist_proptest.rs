//! Property tests: encoding, prediction determinism and persistence round trips
//! over arbitrary query records.

use std::sync::OnceLock;

use proptest::prelude::*;

use price_boost::persist;
use price_boost::testing::synthetic_records;
use price_boost::{CategoryEncoder, ModelArtifact, PriceRecord, TrainConfig};

fn artifact() -> &'static (ModelArtifact, ModelArtifact) {
    static CELL: OnceLock<(ModelArtifact, ModelArtifact)> = OnceLock::new();
    CELL.get_or_init(|| {
        let config = TrainConfig::builder().n_trees(20).n_threads(1).build().unwrap();
        let trained = ModelArtifact::train(&synthetic_records(150, 17), &config).unwrap();
        let bytes = persist::to_bytes(&trained).unwrap();
        let loaded = persist::from_bytes(&bytes).unwrap();
        (trained, loaded)
    })
}

fn category() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec!["building", "house", "flat", "villa", "studio"])
            .prop_map(String::from),
        "[a-z0-9]{0,8}",
    ]
}

fn record() -> impl Strategy<Value = PriceRecord> {
    (
        category(),
        category(),
        0.0f32..10.0,
        0.0f32..10_000.0,
        0.0f32..12_000.0,
        prop::sample::select(vec!["CRD", "DBT", "CSH", "XXX"]),
    )
        .prop_map(|(property, discount, count, loan, floor, payment)| {
            PriceRecord::new(property, discount, count, loan, floor, payment)
        })
}

proptest! {
    #[test]
    fn loaded_artifact_predicts_identically(record in record()) {
        let (trained, loaded) = artifact();
        let a = trained.predict(&record);
        let b = loaded.predict(&record);
        prop_assert!(a.is_finite());
        prop_assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn prediction_is_deterministic(record in record()) {
        let (trained, _) = artifact();
        prop_assert_eq!(trained.predict(&record).to_bits(), trained.predict(&record).to_bits());
    }

    #[test]
    fn label_does_not_affect_score(record in record(), label in -100.0f32..100.0) {
        let (trained, _) = artifact();
        let labeled = record.clone().with_target(label);
        prop_assert_eq!(trained.predict(&record).to_bits(), trained.predict(&labeled).to_bits());
    }

    #[test]
    fn encoder_codes_are_first_occurrence(values in prop::collection::vec("[a-c]{1,2}", 0..40)) {
        let encoder = CategoryEncoder::fit(values.iter().map(String::as_str));
        let refit = CategoryEncoder::fit(values.iter().map(String::as_str));
        prop_assert_eq!(&encoder, &refit);

        let mut seen: Vec<&str> = Vec::new();
        for value in &values {
            if !seen.contains(&value.as_str()) {
                seen.push(value);
            }
        }
        for (code, value) in seen.iter().enumerate() {
            prop_assert_eq!(encoder.encode(value), code as u32);
        }
        prop_assert_eq!(encoder.encode("zzz"), encoder.unknown_code());
        prop_assert_eq!(encoder.unknown_code() as usize, seen.len());
    }
}
