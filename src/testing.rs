//! Shared fixtures for unit tests, integration tests and benchmarks.
//!
//! - [`scenario_records`] / [`scenario_query`]: the two-row pricing scenario
//! - [`synthetic_records`]: seeded corpus of realistic-looking records
//! - [`to_csv`]: render records back into the input text format
//! - [`assert_approx_eq!`](crate::assert_approx_eq): float assertion with a message

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::data::{PriceRecord, RecordSchema};

// =============================================================================
// Constants
// =============================================================================

/// Tolerance for comparing predictions that should be identical up to
/// float noise.
pub const DEFAULT_TOLERANCE: f32 = 1e-5;

/// How close the scenario model must get to its training label.
pub const SCENARIO_TOLERANCE: f32 = 0.5;

/// Header line of the input format.
pub const CSV_HEADER: &str =
    "property_code,discount_code,property_count,loan_value,floor_price,payment_type,target_price";

// =============================================================================
// Assertions
// =============================================================================

/// Assert that two `f32` values are within `tolerance` of each other.
///
/// ```
/// # use price_boost::assert_approx_eq;
/// assert_approx_eq!(1.0f32, 1.0001f32, 0.001);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let left_val: f32 = $left;
        let right_val: f32 = $right;
        let tol: f32 = $tolerance;
        let diff = (left_val - right_val).abs();
        if !(diff <= tol) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`\n right: `{:?}`\n  diff: `{:?}` > tolerance `{:?}`",
                left_val, right_val, diff, tol
            );
        }
    }};
    ($left:expr, $right:expr, $tolerance:expr, $($arg:tt)+) => {{
        let left_val: f32 = $left;
        let right_val: f32 = $right;
        let tol: f32 = $tolerance;
        let diff = (left_val - right_val).abs();
        if !(diff <= tol) {
            panic!(
                "assertion failed: `(left ≈ right)` - {}\n  left: `{:?}`\n right: `{:?}`\n  diff: `{:?}` > tolerance `{:?}`",
                format_args!($($arg)+), left_val, right_val, diff, tol
            );
        }
    }};
}

// =============================================================================
// Fixtures
// =============================================================================

/// `[("building","1",2,1000,1200,"CRD",7), ("house","2",3,1500,1800,"DBT",12)]`
pub fn scenario_records() -> Vec<PriceRecord> {
    vec![
        PriceRecord::new("building", "1", 2.0, 1000.0, 1200.0, "CRD").with_target(7.0),
        PriceRecord::new("house", "2", 3.0, 1500.0, 1800.0, "DBT").with_target(12.0),
    ]
}

/// The first scenario row with a zero label, as given at inference.
pub fn scenario_query() -> PriceRecord {
    PriceRecord::new("building", "1", 2.0, 1000.0, 1200.0, "CRD").with_target(0.0)
}

const PROPERTY_CODES: [(&str, f32); 5] = [
    ("building", 40.0),
    ("house", 55.0),
    ("flat", 30.0),
    ("villa", 90.0),
    ("studio", 20.0),
];
const PAYMENT_TYPES: [(&str, f32); 3] = [("CRD", 0.0), ("DBT", -2.0), ("CSH", -5.0)];

/// `n` labeled records drawn from a fixed price model plus noise.
///
/// The same `(n, seed)` always yields the same records.
pub fn synthetic_records(n: usize, seed: u64) -> Vec<PriceRecord> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let &(property, base) = PROPERTY_CODES.choose(&mut rng).unwrap_or(&PROPERTY_CODES[0]);
            let &(payment, adjust) = PAYMENT_TYPES.choose(&mut rng).unwrap_or(&PAYMENT_TYPES[0]);
            let discount: u32 = rng.gen_range(0..8);
            let count = rng.gen_range(1..=6) as f32;
            let loan = rng.gen_range(500.0f32..5000.0).round();
            let floor = (loan * 1.2).round();
            let noise: f32 = rng.gen_range(-1.0..1.0);

            let target =
                base + count * 1.5 + loan / 1000.0 - discount as f32 * 0.75 + adjust + noise;
            PriceRecord::new(property, discount.to_string(), count, loan, floor, payment)
                .with_target(target)
        })
        .collect()
}

/// Render records in the input text format, header included.
///
/// Records without a label are written with six fields.
pub fn to_csv(records: &[PriceRecord]) -> String {
    let delimiter = RecordSchema::DELIMITER;
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for r in records {
        let mut fields = vec![
            r.property_code.clone(),
            r.discount_code.clone(),
            r.property_count.to_string(),
            r.loan_value.to_string(),
            r.floor_price.to_string(),
            r.payment_type.clone(),
        ];
        if let Some(target) = r.target_price {
            fields.push(target.to_string());
        }
        out.push_str(&fields.join(&delimiter.to_string()));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{parse_records, RowKind};

    #[test]
    fn synthetic_is_seeded() {
        assert_eq!(synthetic_records(30, 1), synthetic_records(30, 1));
        assert_ne!(synthetic_records(30, 1), synthetic_records(30, 2));
        assert!(synthetic_records(30, 1).iter().all(|r| r.target_price.is_some()));
    }

    #[test]
    fn csv_parses_back() {
        let records = synthetic_records(25, 4);
        let parsed =
            parse_records(&to_csv(&records), &RecordSchema::price(), RowKind::Labeled).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    #[should_panic(expected = "tolerance")]
    fn approx_macro_panics_outside_tolerance() {
        assert_approx_eq!(1.0, 1.1, 0.01);
    }
}
