//! Comma-separated record reader.
//!
//! The first line is a header and is always skipped. Blank lines are ignored.
//! Quoted fields are not supported: every comma separates two fields.

use std::fs;
use std::path::Path;

use crate::error::Result;

use super::record::PriceRecord;
use super::schema::{RecordSchema, RowKind, SchemaError};

/// Parse delimited text into records.
///
/// Fails on the first row that does not match `schema`.
pub fn parse_records(
    text: &str,
    schema: &RecordSchema,
    kind: RowKind,
) -> Result<Vec<PriceRecord>, SchemaError> {
    let mut records = Vec::new();
    for (idx, line) in text.lines().enumerate().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        records.push(schema.parse_row(line, idx + 1, kind)?);
    }
    Ok(records)
}

/// Read labeled training records from a file.
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<PriceRecord>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let records = parse_records(&content, &RecordSchema::price(), RowKind::Labeled)?;
    tracing::debug!(path = %path.display(), rows = records.len(), "read training records");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "property_code,discount_code,property_count,loan_value,floor_price,payment_type,target_price";

    #[test]
    fn header_is_skipped() {
        let text = format!("{HEADER}\nbuilding,1,2,1000,1200,CRD,7\nhouse,2,3,1500,1800,DBT,12\n");
        let records = parse_records(&text, &RecordSchema::price(), RowKind::Labeled).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].payment_type, "DBT");
        assert_eq!(records[1].target_price, Some(12.0));
    }

    #[test]
    fn blank_lines_and_crlf_are_tolerated() {
        let text = format!("{HEADER}\r\n\r\nbuilding,1,2,1000,1200,CRD,7\r\n\n");
        let records = parse_records(&text, &RecordSchema::price(), RowKind::Labeled).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].target_price, Some(7.0));
    }

    #[test]
    fn header_only_yields_no_rows() {
        let records = parse_records(HEADER, &RecordSchema::price(), RowKind::Labeled).unwrap();
        assert!(records.is_empty());
        let records = parse_records("", &RecordSchema::price(), RowKind::Labeled).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn malformed_row_reports_line_number() {
        let text = format!("{HEADER}\nbuilding,1,2,1000,1200,CRD,7\nhouse,2,3,1500,DBT\n");
        let err = parse_records(&text, &RecordSchema::price(), RowKind::Labeled).unwrap_err();
        assert_eq!(
            err,
            SchemaError::FieldCount {
                line: 3,
                expected: 7,
                found: 5
            }
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_records("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, crate::PipelineError::Io(_)));
    }
}
