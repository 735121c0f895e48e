//! Record schema: an explicit, ordered column list.
//!
//! Columns are bound to file positions by data, not by per-field annotations.
//! The canonical price schema is [`RecordSchema::price`].

use thiserror::Error;

use super::record::PriceRecord;

// =============================================================================
// Column metadata
// =============================================================================

/// Logical value type of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnType {
    /// Unordered string values, encoded before model use.
    Categorical,
    /// Finite floating point values.
    Numeric,
}

/// How the model uses a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnRole {
    /// Part of the feature vector.
    Feature,
    /// Present in the source data but not used by the model.
    Ignored,
    /// Regression target.
    Label,
}

/// Typed fields of a [`PriceRecord`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    PropertyCode,
    DiscountCode,
    PropertyCount,
    LoanValue,
    FloorPrice,
    PaymentType,
    TargetPrice,
}

impl Field {
    /// Value type stored in this field.
    pub const fn column_type(self) -> ColumnType {
        match self {
            Field::PropertyCode | Field::DiscountCode | Field::PaymentType => {
                ColumnType::Categorical
            }
            Field::PropertyCount | Field::LoanValue | Field::FloorPrice | Field::TargetPrice => {
                ColumnType::Numeric
            }
        }
    }
}

/// One column of the schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Column name (matches the header of the source file).
    pub name: &'static str,
    /// Zero-based position in a row.
    pub position: usize,
    /// Record field the column populates.
    pub field: Field,
    /// How the model uses the column.
    pub role: ColumnRole,
}

impl ColumnSpec {
    const fn new(name: &'static str, position: usize, field: Field, role: ColumnRole) -> Self {
        Self {
            name,
            position,
            field,
            role,
        }
    }

    /// Value type of the column.
    #[inline]
    pub const fn column_type(&self) -> ColumnType {
        self.field.column_type()
    }
}

const PRICE_COLUMNS: [ColumnSpec; 7] = [
    ColumnSpec::new("property_code", 0, Field::PropertyCode, ColumnRole::Feature),
    ColumnSpec::new("discount_code", 1, Field::DiscountCode, ColumnRole::Feature),
    ColumnSpec::new("property_count", 2, Field::PropertyCount, ColumnRole::Feature),
    ColumnSpec::new("loan_value", 3, Field::LoanValue, ColumnRole::Feature),
    ColumnSpec::new("floor_price", 4, Field::FloorPrice, ColumnRole::Ignored),
    ColumnSpec::new("payment_type", 5, Field::PaymentType, ColumnRole::Feature),
    ColumnSpec::new("target_price", 6, Field::TargetPrice, ColumnRole::Label),
];

// =============================================================================
// Errors
// =============================================================================

/// A row that does not conform to the schema.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: column `{column}` is not a number: {raw:?}")]
    InvalidNumber {
        line: usize,
        column: &'static str,
        raw: String,
    },

    #[error("line {line}: column `{column}` is not finite: {value}")]
    NonFinite {
        line: usize,
        column: &'static str,
        value: f32,
    },

    /// A training record without a label. `line` is the 1-based record index.
    #[error("record {line}: missing label `{column}`")]
    MissingLabel { line: usize, column: &'static str },
}

// =============================================================================
// RecordSchema
// =============================================================================

/// Whether a row must carry the label column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowKind {
    /// Training row: every column, label included.
    Labeled,
    /// Inference row: the trailing label may be omitted; if present it is ignored.
    Unlabeled,
}

/// Ordered column list describing one input row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordSchema {
    columns: &'static [ColumnSpec],
}

impl Default for RecordSchema {
    fn default() -> Self {
        Self::price()
    }
}

impl RecordSchema {
    /// Field separator for delimited text.
    pub const DELIMITER: char = ',';

    /// The price schema: 7 columns, label last.
    pub const fn price() -> Self {
        Self {
            columns: &PRICE_COLUMNS,
        }
    }

    /// All columns in position order.
    #[inline]
    pub fn columns(&self) -> &'static [ColumnSpec] {
        self.columns
    }

    /// Number of columns in a labeled row.
    #[inline]
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&'static ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Columns with [`ColumnRole::Feature`], in position order.
    pub fn features(&self) -> impl Iterator<Item = &'static ColumnSpec> {
        self.columns
            .iter()
            .filter(|c| c.role == ColumnRole::Feature)
    }

    /// The label column.
    pub fn label(&self) -> Option<&'static ColumnSpec> {
        self.columns.iter().find(|c| c.role == ColumnRole::Label)
    }

    /// Parse one delimited row.
    ///
    /// `line` is the 1-based line number used in error messages.
    pub fn parse_row(
        &self,
        text: &str,
        line: usize,
        kind: RowKind,
    ) -> Result<PriceRecord, SchemaError> {
        let parts: Vec<&str> = text.split(Self::DELIMITER).map(str::trim).collect();
        let found = parts.len();
        let full = self.n_columns();

        let accepted = match kind {
            RowKind::Labeled => found == full,
            RowKind::Unlabeled => found == full || found + 1 == full,
        };
        if !accepted {
            let expected = match kind {
                RowKind::Labeled => full,
                RowKind::Unlabeled => full - 1,
            };
            return Err(SchemaError::FieldCount {
                line,
                expected,
                found,
            });
        }

        let mut record = PriceRecord::default();
        for (column, raw) in self.columns.iter().zip(parts) {
            if kind == RowKind::Unlabeled && column.role == ColumnRole::Label {
                continue;
            }
            match column.column_type() {
                ColumnType::Categorical => record.set_category(column.field, raw),
                ColumnType::Numeric => {
                    let value = parse_number(column, raw, line)?;
                    record.set_number(column.field, value);
                }
            }
        }

        Ok(record)
    }
}

fn parse_number(column: &ColumnSpec, raw: &str, line: usize) -> Result<f32, SchemaError> {
    let value: f32 = raw.parse().map_err(|_| SchemaError::InvalidNumber {
        line,
        column: column.name,
        raw: raw.to_string(),
    })?;
    if !value.is_finite() {
        return Err(SchemaError::NonFinite {
            line,
            column: column.name,
            value,
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_match_order() {
        let schema = RecordSchema::price();
        for (i, column) in schema.columns().iter().enumerate() {
            assert_eq!(column.position, i, "column {}", column.name);
        }
    }

    #[test]
    fn feature_columns_skip_ignored_and_label() {
        let names: Vec<_> = RecordSchema::price().features().map(|c| c.name).collect();
        assert_eq!(
            names,
            ["property_code", "discount_code", "property_count", "loan_value", "payment_type"]
        );
        assert_eq!(RecordSchema::price().label().map(|c| c.name), Some("target_price"));
    }

    #[test]
    fn parse_labeled_row() {
        let record = RecordSchema::price()
            .parse_row("building, 1,2,1000.0,1200.0,CRD,7.0", 2, RowKind::Labeled)
            .unwrap();
        assert_eq!(record.property_code, "building");
        assert_eq!(record.discount_code, "1");
        assert_eq!(record.property_count, 2.0);
        assert_eq!(record.loan_value, 1000.0);
        assert_eq!(record.floor_price, 1200.0);
        assert_eq!(record.payment_type, "CRD");
        assert_eq!(record.target_price, Some(7.0));
    }

    #[test]
    fn unlabeled_row_may_omit_label() {
        let schema = RecordSchema::price();
        let record = schema
            .parse_row("house,2,3,1500,1800,DBT", 1, RowKind::Unlabeled)
            .unwrap();
        assert_eq!(record.target_price, None);

        let record = schema
            .parse_row("house,2,3,1500,1800,DBT,12", 1, RowKind::Unlabeled)
            .unwrap();
        assert_eq!(record.target_price, None, "label is ignored at inference");
    }

    #[test]
    fn labeled_row_requires_label() {
        let err = RecordSchema::price()
            .parse_row("house,2,3,1500,1800,DBT", 4, RowKind::Labeled)
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::FieldCount {
                line: 4,
                expected: 7,
                found: 6
            }
        );
    }

    #[test]
    fn five_fields_rejected() {
        let err = RecordSchema::price()
            .parse_row("house,2,3,1500,DBT", 2, RowKind::Unlabeled)
            .unwrap_err();
        assert!(matches!(err, SchemaError::FieldCount { found: 5, .. }));
    }

    #[test]
    fn bad_number_names_column() {
        let err = RecordSchema::price()
            .parse_row("house,2,three,1500,1800,DBT,12", 9, RowKind::Labeled)
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::InvalidNumber {
                line: 9,
                column: "property_count",
                raw: "three".into()
            }
        );
    }

    #[test]
    fn non_finite_rejected() {
        let err = RecordSchema::price()
            .parse_row("house,2,3,inf,1800,DBT,12", 2, RowKind::Labeled)
            .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::NonFinite {
                column: "loan_value",
                ..
            }
        ));
    }
}
