//! Entry points used by callers such as the CLI.
//!
//! Stages are plain functions: read → train → save, and load → predict.
//! None of them hold state between calls.

use std::path::Path;

use crate::data::{read_records, PriceRecord, RecordSchema, RowKind};
use crate::error::{PipelineError, Result};
use crate::persist;

use super::artifact::ModelArtifact;
use super::config::TrainConfig;

/// Read labeled records from `data_path` and train a model.
pub fn train(data_path: impl AsRef<Path>, config: &TrainConfig) -> Result<ModelArtifact> {
    let records = read_records(data_path)?;
    ModelArtifact::train(&records, config)
}

/// Train with the default configuration and persist the result.
///
/// On any failure no new artifact is left at `artifact_path`; an existing
/// artifact is either replaced whole or left untouched.
pub fn train_and_save(
    data_path: impl AsRef<Path>,
    artifact_path: impl AsRef<Path>,
) -> Result<ModelArtifact> {
    train_and_save_with(data_path, artifact_path, &TrainConfig::default())
}

/// [`train_and_save`] with an explicit configuration.
pub fn train_and_save_with(
    data_path: impl AsRef<Path>,
    artifact_path: impl AsRef<Path>,
    config: &TrainConfig,
) -> Result<ModelArtifact> {
    let artifact = train(data_path, config)?;
    save(&artifact, artifact_path)?;
    Ok(artifact)
}

/// Persist `artifact`, replacing any file at `path`.
pub fn save(artifact: &ModelArtifact, path: impl AsRef<Path>) -> Result<()> {
    persist::save(artifact, path.as_ref())?;
    Ok(())
}

/// Load a persisted artifact.
///
/// Every failure is reported as [`PipelineError::CorruptArtifact`].
pub fn load(path: impl AsRef<Path>) -> Result<ModelArtifact> {
    persist::load(path.as_ref()).map_err(PipelineError::CorruptArtifact)
}

/// Score one record.
#[inline]
pub fn predict(artifact: &ModelArtifact, record: &PriceRecord) -> f32 {
    artifact.predict(record)
}

/// Parse one comma-separated inference row (label optional).
pub fn parse_record(line: &str) -> Result<PriceRecord> {
    let record = RecordSchema::price().parse_row(line.trim(), 1, RowKind::Unlabeled)?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_record_accepts_six_or_seven_fields() {
        let six = parse_record("house,2,3,1500,1800,DBT").unwrap();
        assert_eq!(six.target_price, None);
        let seven = parse_record(" building,1,2,1000,1200,CRD,0 ").unwrap();
        assert_eq!(seven.property_code, "building");
    }

    #[test]
    fn parse_record_rejects_five_fields() {
        let err = parse_record("house,2,3,1500,DBT").unwrap_err();
        assert!(err.is_schema_mismatch());
    }

    #[test]
    fn missing_data_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = train(dir.path().join("absent.csv"), &TrainConfig::default()).unwrap_err();
        assert!(matches!(err, PipelineError::Io(_)));
    }

    #[test]
    fn missing_artifact_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(dir.path().join("absent.prcm")).unwrap_err();
        assert!(err.is_corrupt_artifact());
    }
}
