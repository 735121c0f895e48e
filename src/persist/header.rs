//! Fixed 32-byte artifact header.
//!
//! ```text
//! Offset  Size  Field
//! ------  ----  -----
//! 0       4     Magic ("PRCM")
//! 4       1     Version major
//! 5       1     Version minor
//! 6       1     Model kind
//! 7       1     Reserved
//! 8       2     Flags (bitfield)
//! 10      2     Reserved
//! 12      4     Payload size (bytes)
//! 16      4     CRC32 of payload
//! 20      4     Number of features
//! 24      4     Feature order fingerprint
//! 28      4     Reserved
//! ```
//!
//! All multi-byte fields are little-endian.

use super::ReadError;

/// Magic bytes identifying a pricing model artifact.
pub const MAGIC: &[u8; 4] = b"PRCM";

pub const CURRENT_VERSION_MAJOR: u8 = 1;
pub const CURRENT_VERSION_MINOR: u8 = 0;

pub const HEADER_SIZE: usize = 32;

// ============================================================================
// Model Kind
// ============================================================================

/// Model family stored in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ModelKind {
    /// Gradient-boosted regression trees.
    Gbdt = 0,
}

impl ModelKind {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Gbdt),
            _ => None,
        }
    }
}

// ============================================================================
// Flags
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatFlags(u16);

impl FormatFlags {
    /// Some tree has a categorical split.
    pub const HAS_CATEGORICAL: u16 = 1 << 0;

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn contains(self, flag: u16) -> bool {
        (self.0 & flag) != 0
    }

    pub fn set(&mut self, flag: u16) {
        self.0 |= flag;
    }
}

// ============================================================================
// Header
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatHeader {
    pub version_major: u8,
    pub version_minor: u8,
    pub model_kind: ModelKind,
    pub flags: FormatFlags,
    pub payload_size: u32,
    pub checksum: u32,
    pub n_features: u32,
    pub fingerprint: u32,
}

impl FormatHeader {
    /// Header at the current version; payload fields are filled by the codec.
    pub fn new(model_kind: ModelKind, n_features: u32, fingerprint: u32) -> Self {
        Self {
            version_major: CURRENT_VERSION_MAJOR,
            version_minor: CURRENT_VERSION_MINOR,
            model_kind,
            flags: FormatFlags::empty(),
            payload_size: 0,
            checksum: 0,
            n_features,
            fingerprint,
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        buf[0..4].copy_from_slice(MAGIC);
        buf[4] = self.version_major;
        buf[5] = self.version_minor;
        buf[6] = self.model_kind as u8;
        buf[8..10].copy_from_slice(&self.flags.bits().to_le_bytes());
        buf[12..16].copy_from_slice(&self.payload_size.to_le_bytes());
        buf[16..20].copy_from_slice(&self.checksum.to_le_bytes());
        buf[20..24].copy_from_slice(&self.n_features.to_le_bytes());
        buf[24..28].copy_from_slice(&self.fingerprint.to_le_bytes());
        buf
    }

    /// Parse and check magic, version and model kind.
    pub fn from_bytes(buf: &[u8; HEADER_SIZE]) -> Result<Self, ReadError> {
        if &buf[0..4] != MAGIC {
            return Err(ReadError::NotAnArtifact);
        }

        let version_major = buf[4];
        let version_minor = buf[5];
        if version_major > CURRENT_VERSION_MAJOR {
            return Err(ReadError::UnsupportedVersion {
                major: version_major,
                minor: version_minor,
            });
        }

        let model_kind = ModelKind::from_u8(buf[6]).ok_or(ReadError::UnknownModelKind(buf[6]))?;

        Ok(Self {
            version_major,
            version_minor,
            model_kind,
            flags: FormatFlags::from_bits(u16::from_le_bytes([buf[8], buf[9]])),
            payload_size: read_u32(buf, 12),
            checksum: read_u32(buf, 16),
            n_features: read_u32(buf, 20),
            fingerprint: read_u32(buf, 24),
        })
    }
}

#[inline]
fn read_u32(buf: &[u8; HEADER_SIZE], offset: usize) -> u32 {
    u32::from_le_bytes([buf[offset], buf[offset + 1], buf[offset + 2], buf[offset + 3]])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FormatHeader {
        let mut header = FormatHeader::new(ModelKind::Gbdt, 5, 0xDEAD_BEEF);
        header.flags.set(FormatFlags::HAS_CATEGORICAL);
        header.payload_size = 1234;
        header.checksum = 0x0102_0304;
        header
    }

    #[test]
    fn layout_offsets() {
        let bytes = sample().to_bytes();
        assert_eq!(&bytes[0..4], b"PRCM");
        assert_eq!(bytes[4], CURRENT_VERSION_MAJOR);
        assert_eq!(u16::from_le_bytes([bytes[8], bytes[9]]), 1);
        assert_eq!(u32::from_le_bytes(bytes[12..16].try_into().unwrap()), 1234);
        assert_eq!(u32::from_le_bytes(bytes[24..28].try_into().unwrap()), 0xDEAD_BEEF);
        assert_eq!(&bytes[28..32], &[0, 0, 0, 0]);
    }

    #[test]
    fn parses_what_it_writes() {
        let header = sample();
        assert_eq!(FormatHeader::from_bytes(&header.to_bytes()).unwrap(), header);
    }

    #[test]
    fn bad_magic() {
        let mut bytes = sample().to_bytes();
        bytes[0] = b'X';
        assert!(matches!(
            FormatHeader::from_bytes(&bytes),
            Err(ReadError::NotAnArtifact)
        ));
    }

    #[test]
    fn newer_major_version() {
        let mut bytes = sample().to_bytes();
        bytes[4] = CURRENT_VERSION_MAJOR + 1;
        assert!(matches!(
            FormatHeader::from_bytes(&bytes),
            Err(ReadError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn newer_minor_version_is_accepted() {
        let mut bytes = sample().to_bytes();
        bytes[5] = CURRENT_VERSION_MINOR + 3;
        assert!(FormatHeader::from_bytes(&bytes).is_ok());
    }

    #[test]
    fn unknown_model_kind() {
        let mut bytes = sample().to_bytes();
        bytes[6] = 9;
        assert!(matches!(
            FormatHeader::from_bytes(&bytes),
            Err(ReadError::UnknownModelKind(9))
        ));
    }
}
