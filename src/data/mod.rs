//! Input records and the schema that binds them to delimited text.
//!
//! # Overview
//!
//! - [`RecordSchema`]: ordered list of [`ColumnSpec`]s (name, position, type, role)
//! - [`PriceRecord`]: one typed input row
//! - [`read_records`] / [`parse_records`]: header-skipping comma-separated reader
//!
//! Rows whose field count does not match the schema, or whose numeric fields
//! do not parse to finite floats, are rejected with [`SchemaError`].

mod reader;
mod record;
mod schema;

pub use reader::{parse_records, read_records};
pub use record::{FieldValue, Prediction, PriceRecord};
pub use schema::{ColumnRole, ColumnSpec, ColumnType, Field, RecordSchema, RowKind, SchemaError};
