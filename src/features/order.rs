//! Fixed feature layout and its compatibility fingerprint.

use crate::data::{ColumnType, Field, RecordSchema};

/// Number of model features.
pub const N_FEATURES: usize = 5;

/// Bumped whenever the meaning of a feature slot changes.
pub const LAYOUT_VERSION: u32 = 1;

/// One slot of the feature vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeatureSpec {
    pub name: &'static str,
    pub field: Field,
    pub feature_type: ColumnType,
}

impl FeatureSpec {
    const fn new(name: &'static str, field: Field) -> Self {
        Self {
            name,
            field,
            feature_type: field.column_type(),
        }
    }

    #[inline]
    pub fn is_categorical(&self) -> bool {
        self.feature_type == ColumnType::Categorical
    }
}

const PRICE_FEATURES: [FeatureSpec; N_FEATURES] = [
    FeatureSpec::new("property_code", Field::PropertyCode),
    FeatureSpec::new("discount_code", Field::DiscountCode),
    FeatureSpec::new("property_count", Field::PropertyCount),
    FeatureSpec::new("loan_value", Field::LoanValue),
    FeatureSpec::new("payment_type", Field::PaymentType),
];

/// The column order of the feature vector.
///
/// Training and inference share this order. Any change to it invalidates
/// persisted artifacts, which is detected through [`fingerprint`](Self::fingerprint).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeatureOrder {
    features: &'static [FeatureSpec; N_FEATURES],
}

impl Default for FeatureOrder {
    fn default() -> Self {
        Self::price()
    }
}

impl FeatureOrder {
    /// `[property_code, discount_code, property_count, loan_value, payment_type]`
    pub const fn price() -> Self {
        Self {
            features: &PRICE_FEATURES,
        }
    }

    #[inline]
    pub fn features(&self) -> &'static [FeatureSpec] {
        self.features
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.features.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        self.features.iter().map(|f| f.name)
    }

    pub fn types(&self) -> impl Iterator<Item = ColumnType> {
        self.features.iter().map(|f| f.feature_type)
    }

    /// Indices of categorical slots.
    pub fn categorical_indices(&self) -> impl Iterator<Item = usize> {
        self.features
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_categorical())
            .map(|(i, _)| i)
    }

    pub fn is_categorical(&self, feature: usize) -> bool {
        self.features.get(feature).is_some_and(FeatureSpec::is_categorical)
    }

    /// CRC32 over the layout version and the `name:type` list.
    pub fn fingerprint(&self) -> u32 {
        fingerprint_of(self.features.iter().map(|f| (f.name, f.feature_type)))
    }

    /// Whether every feature slot is a feature column of `schema`.
    pub fn matches_schema(&self, schema: &RecordSchema) -> bool {
        self.features.iter().all(|f| {
            schema
                .features()
                .any(|c| c.name == f.name && c.field == f.field)
        })
    }
}

/// Fingerprint of an arbitrary feature list, used when validating
/// persisted layouts.
pub fn fingerprint_of<'a, I>(features: I) -> u32
where
    I: IntoIterator<Item = (&'a str, ColumnType)>,
{
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&LAYOUT_VERSION.to_le_bytes());
    for (name, feature_type) in features {
        let tag = match feature_type {
            ColumnType::Categorical => "categorical",
            ColumnType::Numeric => "numeric",
        };
        hasher.update(name.as_bytes());
        hasher.update(b":");
        hasher.update(tag.as_bytes());
        hasher.update(b";");
    }
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_is_fixed() {
        let names: Vec<_> = FeatureOrder::price().names().collect();
        assert_eq!(
            names,
            ["property_code", "discount_code", "property_count", "loan_value", "payment_type"]
        );
        let cats: Vec<_> = FeatureOrder::price().categorical_indices().collect();
        assert_eq!(cats, [0, 1, 4]);
    }

    #[test]
    fn fingerprint_is_stable() {
        assert_eq!(FeatureOrder::price().fingerprint(), FeatureOrder::price().fingerprint());
    }

    #[test]
    fn fingerprint_depends_on_order_and_type() {
        let base = FeatureOrder::price().fingerprint();

        let swapped = fingerprint_of([
            ("discount_code", ColumnType::Categorical),
            ("property_code", ColumnType::Categorical),
            ("property_count", ColumnType::Numeric),
            ("loan_value", ColumnType::Numeric),
            ("payment_type", ColumnType::Categorical),
        ]);
        assert_ne!(base, swapped);

        let retyped = fingerprint_of([
            ("property_code", ColumnType::Categorical),
            ("discount_code", ColumnType::Numeric),
            ("property_count", ColumnType::Numeric),
            ("loan_value", ColumnType::Numeric),
            ("payment_type", ColumnType::Categorical),
        ]);
        assert_ne!(base, retyped);
    }

    #[test]
    fn order_matches_price_schema() {
        assert!(FeatureOrder::price().matches_schema(&RecordSchema::price()));
    }
}
