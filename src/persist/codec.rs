//! Reading and writing artifact files.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::model::ModelArtifact;

use super::header::{FormatFlags, FormatHeader, ModelKind, HEADER_SIZE};
use super::schema::ArtifactSchema;
use super::{ReadError, WriteError};

/// Encode an artifact into header + payload bytes.
pub fn to_bytes(artifact: &ModelArtifact) -> Result<Vec<u8>, WriteError> {
    let payload = postcard::to_allocvec(&ArtifactSchema::from(artifact))?;

    let order = artifact.order();
    let mut header = FormatHeader::new(ModelKind::Gbdt, order.n_features() as u32, order.fingerprint());
    if artifact.forest().has_categorical() {
        header.flags.set(FormatFlags::HAS_CATEGORICAL);
    }
    header.payload_size = payload.len() as u32;
    header.checksum = crc32fast::hash(&payload);

    let mut bytes = Vec::with_capacity(HEADER_SIZE + payload.len());
    bytes.extend_from_slice(&header.to_bytes());
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

/// Decode and validate an artifact.
pub fn from_bytes(bytes: &[u8]) -> Result<ModelArtifact, ReadError> {
    let header_bytes: &[u8; HEADER_SIZE] = bytes
        .get(..HEADER_SIZE)
        .and_then(|slice| slice.try_into().ok())
        .ok_or(ReadError::Truncated {
            expected: HEADER_SIZE,
            found: bytes.len(),
        })?;
    let header = FormatHeader::from_bytes(header_bytes)?;

    let expected = HEADER_SIZE + header.payload_size as usize;
    if bytes.len() < expected {
        return Err(ReadError::Truncated {
            expected,
            found: bytes.len(),
        });
    }
    if bytes.len() > expected {
        return Err(ReadError::TrailingData {
            extra: bytes.len() - expected,
        });
    }
    let payload = &bytes[HEADER_SIZE..];

    let actual = crc32fast::hash(payload);
    if actual != header.checksum {
        return Err(ReadError::ChecksumMismatch {
            expected: header.checksum,
            actual,
        });
    }

    let compiled = crate::features::FeatureOrder::price().fingerprint();
    if header.fingerprint != compiled {
        return Err(ReadError::FingerprintMismatch {
            expected: compiled,
            found: header.fingerprint,
        });
    }

    let schema: ArtifactSchema = postcard::from_bytes(payload)?;
    Ok(schema.into_artifact(header.n_features)?)
}

/// Write `artifact` to `path`, replacing any existing file.
///
/// Bytes go to a temporary file in the destination directory which is then
/// renamed over `path`. A failure leaves `path` as it was.
pub fn save(artifact: &ModelArtifact, path: &Path) -> Result<(), WriteError> {
    let bytes = to_bytes(artifact)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(&bytes)?;
    file.as_file().sync_all()?;
    file.persist(path)?;

    tracing::info!(path = %path.display(), bytes = bytes.len(), "saved model artifact");
    Ok(())
}

/// Read and validate the artifact at `path`.
pub fn load(path: &Path) -> Result<ModelArtifact, ReadError> {
    let bytes = fs::read(path)?;
    let artifact = from_bytes(&bytes)?;
    tracing::info!(
        path = %path.display(),
        trees = artifact.forest().n_trees(),
        "loaded model artifact"
    );
    Ok(artifact)
}

/// Pretty JSON dump of the payload, for inspection only.
pub fn to_json_string(artifact: &ModelArtifact) -> Result<String, WriteError> {
    Ok(serde_json::to_string_pretty(&ArtifactSchema::from(artifact))?)
}
