//! Native binary artifact format.
//!
//! A 32-byte [`FormatHeader`] is followed by a `postcard`-encoded
//! [`ArtifactSchema`]. The header carries a CRC32 of the payload and the
//! fingerprint of the feature order the model was trained with; both are
//! checked before the payload is decoded, and the decoded model is fully
//! validated before it is handed out.
//!
//! ```text
//! ┌──────────────────────────┐
//! │ Header (32 bytes)        │
//! ├──────────────────────────┤
//! │ Payload (postcard)       │
//! └──────────────────────────┘
//! ```

mod codec;
mod convert;
mod header;
mod schema;

use thiserror::Error;

pub use codec::{from_bytes, load, save, to_bytes, to_json_string};
pub use convert::ValidationError;
pub use header::{
    FormatFlags, FormatHeader, ModelKind, CURRENT_VERSION_MAJOR, CURRENT_VERSION_MINOR,
    HEADER_SIZE, MAGIC,
};
pub use schema::ArtifactSchema;

/// Errors while loading an artifact.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a pricing model artifact")]
    NotAnArtifact,

    #[error("artifact format {major}.{minor} is newer than this build supports")]
    UnsupportedVersion { major: u8, minor: u8 },

    #[error("unknown model kind {0}")]
    UnknownModelKind(u8),

    #[error("artifact truncated: expected {expected} bytes, found {found}")]
    Truncated { expected: usize, found: usize },

    #[error("{extra} unexpected bytes after the payload")]
    TrailingData { extra: usize },

    #[error("checksum mismatch: expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("feature order fingerprint {found:#010x} does not match {expected:#010x}")]
    FingerprintMismatch { expected: u32, found: u32 },

    #[error("decoding error: {0}")]
    Decoding(#[from] postcard::Error),

    #[error("invalid model: {0}")]
    Validation(#[from] ValidationError),
}

/// Errors while saving an artifact.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("encoding error: {0}")]
    Encoding(#[from] postcard::Error),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not replace artifact: {0}")]
    Persist(#[from] tempfile::PersistError),
}
