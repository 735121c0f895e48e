//! Top-level error type for the pricing pipeline.
//!
//! Each subsystem owns a focused error enum ([`SchemaError`], [`ConfigError`],
//! [`ReadError`], [`WriteError`]). [`PipelineError`] folds them into the four
//! failure kinds callers reason about: schema mismatch, empty training set,
//! corrupt artifact, and plain I/O or configuration problems.
//!
//! An unseen categorical value is never an error; see
//! [`CategoryEncoder::encode`](crate::encoding::CategoryEncoder::encode).

use thiserror::Error;

use crate::data::SchemaError;
use crate::model::ConfigError;
use crate::persist::{ReadError, WriteError};

/// Errors surfaced by the public pipeline entry points.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A row did not match the record schema.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(#[from] SchemaError),

    /// Training was requested over zero rows.
    #[error("training set is empty")]
    EmptyTrainingSet,

    /// A persisted artifact could not be loaded.
    #[error("corrupt artifact: {0}")]
    CorruptArtifact(#[from] ReadError),

    /// A trained artifact could not be written.
    #[error("failed to write artifact: {0}")]
    Write(#[from] WriteError),

    /// The training configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// I/O failure while reading training data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used by the pipeline entry points.
pub type Result<T, E = PipelineError> = std::result::Result<T, E>;

impl PipelineError {
    /// Returns true if this error came from a malformed input row.
    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self, Self::SchemaMismatch(_))
    }

    /// Returns true if the artifact on disk was unusable.
    pub fn is_corrupt_artifact(&self) -> bool {
        matches!(self, Self::CorruptArtifact(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_converts() {
        let err: PipelineError = SchemaError::FieldCount {
            line: 3,
            expected: 7,
            found: 5,
        }
        .into();
        assert!(err.is_schema_mismatch());
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn read_error_converts() {
        let err: PipelineError = ReadError::NotAnArtifact.into();
        assert!(err.is_corrupt_artifact());
    }

    #[test]
    fn empty_training_set_message() {
        assert_eq!(
            PipelineError::EmptyTrainingSet.to_string(),
            "training set is empty"
        );
    }
}
