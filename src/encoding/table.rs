//! Per-column encoders for every categorical feature.

use crate::data::{ColumnType, PriceRecord, RecordSchema};
use crate::utils::Parallelism;

use super::category::CategoryEncoder;

/// One [`CategoryEncoder`] per categorical feature column, in feature order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EncodingTable {
    columns: Vec<(String, CategoryEncoder)>,
}

impl EncodingTable {
    /// Fit encoders for every categorical feature column of `schema`.
    ///
    /// Columns are independent, so they may be fitted in parallel; the result
    /// is the same either way.
    pub fn fit(records: &[PriceRecord], schema: &RecordSchema, parallelism: Parallelism) -> Self {
        let specs: Vec<_> = schema
            .features()
            .filter(|c| c.column_type() == ColumnType::Categorical)
            .collect();

        let columns = parallelism.maybe_par_map(specs, |spec| {
            let values = records.iter().filter_map(|r| r.category(spec.field));
            (spec.name.to_string(), CategoryEncoder::fit(values))
        });

        tracing::debug!(
            columns = columns.len(),
            rows = records.len(),
            "fitted encoding table"
        );
        Self { columns }
    }

    /// Build a table from already fitted encoders.
    pub fn from_columns(columns: Vec<(String, CategoryEncoder)>) -> Self {
        Self { columns }
    }

    /// Encoder for a column.
    pub fn encoder(&self, column: &str) -> Option<&CategoryEncoder> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, encoder)| encoder)
    }

    /// Encode `value` for `column`.
    ///
    /// Returns `None` only when the table has no encoder for `column`; unseen
    /// values map to the column's unknown code.
    pub fn encode(&self, column: &str, value: &str) -> Option<u32> {
        self.encoder(column).map(|encoder| encoder.encode(value))
    }

    /// Column names and encoders in feature order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &CategoryEncoder)> {
        self.columns
            .iter()
            .map(|(name, encoder)| (name.as_str(), encoder))
    }

    #[inline]
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
