//! Record to feature vector assembly.
//!
//! The same [`FeatureAssembler::assemble`] runs at training and at inference
//! time; matrix assembly is just a loop over it.

use std::ops::Index;

use ndarray::Array2;

use crate::data::{FieldValue, PriceRecord};
use crate::encoding::EncodingTable;

use super::order::{FeatureOrder, N_FEATURES};

/// Fixed-order numeric representation of one record.
///
/// Categorical slots hold the encoder code as an exact small integer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeatureVector([f32; N_FEATURES]);

impl FeatureVector {
    #[inline]
    pub fn new(values: [f32; N_FEATURES]) -> Self {
        Self(values)
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> [f32; N_FEATURES] {
        self.0
    }
}

impl Index<usize> for FeatureVector {
    type Output = f32;

    #[inline]
    fn index(&self, index: usize) -> &f32 {
        &self.0[index]
    }
}

impl AsRef<[f32]> for FeatureVector {
    fn as_ref(&self) -> &[f32] {
        &self.0
    }
}

/// Encodes records with a fitted [`EncodingTable`] in a [`FeatureOrder`].
#[derive(Clone, Copy, Debug)]
pub struct FeatureAssembler<'a> {
    table: &'a EncodingTable,
    order: FeatureOrder,
}

impl<'a> FeatureAssembler<'a> {
    pub fn new(table: &'a EncodingTable, order: FeatureOrder) -> Self {
        Self { table, order }
    }

    pub fn order(&self) -> FeatureOrder {
        self.order
    }

    /// Assemble one record.
    ///
    /// A categorical column without an encoder behaves like an encoder fitted
    /// on no values: every value maps to code `0`.
    pub fn assemble(&self, record: &PriceRecord) -> FeatureVector {
        let mut values = [0.0f32; N_FEATURES];
        for (slot, spec) in values.iter_mut().zip(self.order.features()) {
            *slot = match record.value(spec.field) {
                FieldValue::Category(value) => {
                    self.table.encode(spec.name, value).unwrap_or(0) as f32
                }
                FieldValue::Number(value) => value,
                FieldValue::Missing => f32::NAN,
            };
        }
        FeatureVector(values)
    }

    /// Assemble a row-major `[n_records, n_features]` matrix.
    pub fn assemble_matrix(&self, records: &[PriceRecord]) -> Array2<f32> {
        let mut matrix = Array2::zeros((records.len(), N_FEATURES));
        for (mut row, record) in matrix.rows_mut().into_iter().zip(records) {
            let features = self.assemble(record);
            for (dst, src) in row.iter_mut().zip(features.as_slice()) {
                *dst = *src;
            }
        }
        matrix
    }
}

/// Assemble one record with `table` in `order`.
pub fn assemble(record: &PriceRecord, table: &EncodingTable, order: FeatureOrder) -> FeatureVector {
    FeatureAssembler::new(table, order).assemble(record)
}

/// Assemble every record into a feature matrix.
pub fn assemble_matrix(
    records: &[PriceRecord],
    table: &EncodingTable,
    order: FeatureOrder,
) -> Array2<f32> {
    FeatureAssembler::new(table, order).assemble_matrix(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RecordSchema;
    use crate::testing::scenario_records;
    use crate::utils::Parallelism;

    fn fitted_table() -> EncodingTable {
        EncodingTable::fit(&scenario_records(), &RecordSchema::price(), Parallelism::Sequential)
    }

    #[test]
    fn assembles_in_fixed_order() {
        let table = fitted_table();
        let records = scenario_records();
        let fv = assemble(&records[1], &table, FeatureOrder::price());
        assert_eq!(fv.as_slice(), &[1.0, 1.0, 3.0, 1500.0, 1.0]);
    }

    #[test]
    fn floor_price_and_label_do_not_leak() {
        let table = fitted_table();
        let mut record = scenario_records()[0].clone();
        let before = assemble(&record, &table, FeatureOrder::price());
        record.floor_price = 99_999.0;
        record.target_price = None;
        let after = assemble(&record, &table, FeatureOrder::price());
        assert_eq!(before, after);
    }

    #[test]
    fn unseen_category_uses_unknown_code() {
        let table = fitted_table();
        let record = PriceRecord::new("building", "9", 2.0, 1000.0, 1200.0, "CRD");
        let fv = assemble(&record, &table, FeatureOrder::price());
        assert_eq!(fv[1], 2.0);
    }

    #[test]
    fn matrix_rows_equal_single_assembly() {
        let table = fitted_table();
        let records = scenario_records();
        let assembler = FeatureAssembler::new(&table, FeatureOrder::price());
        let matrix = assembler.assemble_matrix(&records);
        assert_eq!(matrix.dim(), (2, N_FEATURES));
        for (i, record) in records.iter().enumerate() {
            let row: Vec<f32> = matrix.row(i).to_vec();
            assert_eq!(row.as_slice(), assembler.assemble(record).as_slice());
        }
    }

    #[test]
    fn missing_encoder_maps_to_zero() {
        let table = EncodingTable::default();
        let record = PriceRecord::new("house", "2", 3.0, 1500.0, 1800.0, "DBT");
        let fv = assemble(&record, &table, FeatureOrder::price());
        assert_eq!(fv.as_slice(), &[0.0, 0.0, 3.0, 1500.0, 0.0]);
    }
}
