//! Table image file.
//!
//! A file form of the transition table, for offline inspection and for
//! loading with other tools.
//!
//! Header (32 bytes, little-endian):
//! - 0-3: magic `b"DFAM"`
//! - 4-7: format version
//! - 8-11: CRC32 of the record section
//! - 12-15: entry count
//! - 16-19: key size, value size (2 × u16)
//! - 20-31: reserved
//!
//! Records follow the header, `key || value` each, encoded exactly as the
//! map stores them. Records are sorted by `(state, unit)`.

use std::io;
use std::path::Path;

use super::layout::{KEY_SIZE, LayoutError, TableEntry, TableKey, TableValue, VALUE_SIZE};

pub const IMAGE_MAGIC: [u8; 4] = *b"DFAM";
pub const IMAGE_VERSION: u32 = 1;
pub const HEADER_SIZE: usize = 32;

const RECORD_SIZE: usize = KEY_SIZE + VALUE_SIZE;

/// Image header, the first 32 bytes of the file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageHeader {
    pub magic: [u8; 4],
    pub version: u32,
    /// CRC32 of everything after the header.
    pub checksum: u32,
    pub entry_count: u32,
    pub key_size: u16,
    pub value_size: u16,
    pub _reserved: [u8; 12],
}

impl Default for ImageHeader {
    fn default() -> Self {
        Self {
            magic: IMAGE_MAGIC,
            version: IMAGE_VERSION,
            checksum: 0,
            entry_count: 0,
            key_size: KEY_SIZE as u16,
            value_size: VALUE_SIZE as u16,
            _reserved: [0; 12],
        }
    }
}

impl ImageHeader {
    /// Decode a header from the first 32 bytes.
    pub fn from_bytes(bytes: &[u8; HEADER_SIZE]) -> Self {
        let mut reserved = [0u8; 12];
        reserved.copy_from_slice(&bytes[20..32]);

        Self {
            magic: [bytes[0], bytes[1], bytes[2], bytes[3]],
            version: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            checksum: u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
            entry_count: u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]),
            key_size: u16::from_le_bytes([bytes[16], bytes[17]]),
            value_size: u16::from_le_bytes([bytes[18], bytes[19]]),
            _reserved: reserved,
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4..8].copy_from_slice(&self.version.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.checksum.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.entry_count.to_le_bytes());
        bytes[16..18].copy_from_slice(&self.key_size.to_le_bytes());
        bytes[18..20].copy_from_slice(&self.value_size.to_le_bytes());
        bytes[20..32].copy_from_slice(&self._reserved);
        bytes
    }

    pub fn validate_magic(&self) -> bool {
        self.magic == IMAGE_MAGIC
    }

    pub fn validate_version(&self) -> bool {
        self.version == IMAGE_VERSION
    }
}

/// Image load error.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("invalid magic: expected DFAM")]
    InvalidMagic,
    #[error("unsupported version: {0} (expected {IMAGE_VERSION})")]
    UnsupportedVersion(u32),
    #[error("file too small: {0} bytes (minimum {HEADER_SIZE})")]
    FileTooSmall(usize),
    #[error(
        "record layout mismatch: key {key_size} bytes, value {value_size} bytes \
         (expected {KEY_SIZE} and {VALUE_SIZE})"
    )]
    RecordLayout { key_size: u16, value_size: u16 },
    #[error("size mismatch: header declares {entries} entries ({expected} bytes), got {actual}")]
    SizeMismatch {
        entries: u32,
        expected: usize,
        actual: usize,
    },
    #[error("checksum mismatch: header {header:#010x}, computed {computed:#010x}")]
    Checksum { header: u32, computed: u32 },
    #[error("invalid record {index}: {source}")]
    Record {
        index: usize,
        #[source]
        source: LayoutError,
    },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Decoded table image.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableImage {
    entries: Vec<TableEntry>,
}

impl TableImage {
    /// Build an image, ordering entries by key.
    pub fn new(mut entries: Vec<TableEntry>) -> Self {
        entries.sort_by_key(|e| e.key);
        Self { entries }
    }

    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<TableEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encode header and records.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut records = Vec::with_capacity(self.entries.len() * RECORD_SIZE);
        for entry in &self.entries {
            records.extend_from_slice(&entry.key.to_bytes());
            records.extend_from_slice(&entry.value.to_bytes());
        }

        let header = ImageHeader {
            checksum: crc32fast::hash(&records),
            entry_count: self.entries.len() as u32,
            ..Default::default()
        };

        let mut out = Vec::with_capacity(HEADER_SIZE + records.len());
        out.extend_from_slice(&header.to_bytes());
        out.extend_from_slice(&records);
        out
    }

    /// Decode and validate an image.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ImageError> {
        let Some((head, records)) = bytes.split_first_chunk::<HEADER_SIZE>() else {
            return Err(ImageError::FileTooSmall(bytes.len()));
        };

        let header = ImageHeader::from_bytes(head);
        if !header.validate_magic() {
            return Err(ImageError::InvalidMagic);
        }
        if !header.validate_version() {
            return Err(ImageError::UnsupportedVersion(header.version));
        }
        if header.key_size as usize != KEY_SIZE || header.value_size as usize != VALUE_SIZE {
            return Err(ImageError::RecordLayout {
                key_size: header.key_size,
                value_size: header.value_size,
            });
        }

        let expected = header.entry_count as usize * RECORD_SIZE;
        if records.len() != expected {
            return Err(ImageError::SizeMismatch {
                entries: header.entry_count,
                expected,
                actual: records.len(),
            });
        }

        let computed = crc32fast::hash(records);
        if computed != header.checksum {
            return Err(ImageError::Checksum {
                header: header.checksum,
                computed,
            });
        }

        let mut entries = Vec::with_capacity(header.entry_count as usize);
        for (index, record) in records.chunks_exact(RECORD_SIZE).enumerate() {
            let (key, value) = record.split_at(KEY_SIZE);
            let key = TableKey::from_bytes(key).map_err(|source| ImageError::Record { index, source })?;
            let value =
                TableValue::from_bytes(value).map_err(|source| ImageError::Record { index, source })?;
            entries.push(TableEntry::new(key, value));
        }

        Ok(Self { entries })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ImageError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn write_to_path(&self, path: impl AsRef<Path>) -> io::Result<()> {
        std::fs::write(path, self.to_bytes())
    }
}
