//! Tests for the table image format.

use super::image::{HEADER_SIZE, IMAGE_MAGIC, ImageError, ImageHeader, TableImage};
use super::layout::{LayoutError, StateId, TableEntry, TableKey, TableValue};

fn entry(state: u16, unit: u8, target: u16, accepting: bool) -> TableEntry {
    TableEntry::new(
        TableKey::new(StateId::new(state), unit),
        TableValue::new(StateId::new(target), accepting),
    )
}

fn sample() -> TableImage {
    TableImage::new(vec![
        entry(1, b'z', 0, false),
        entry(0, b'y', 2, false),
        entry(0, b'x', 1, true),
    ])
}

#[test]
fn header_layout() {
    let header = ImageHeader {
        checksum: 0xdead_beef,
        entry_count: 3,
        ..Default::default()
    };
    let bytes = header.to_bytes();

    assert_eq!(&bytes[0..4], &IMAGE_MAGIC);
    assert_eq!(&bytes[4..8], &1u32.to_le_bytes());
    assert_eq!(&bytes[8..12], &0xdead_beefu32.to_le_bytes());
    assert_eq!(&bytes[12..16], &3u32.to_le_bytes());
    assert_eq!(&bytes[16..18], &4u16.to_le_bytes());
    assert_eq!(&bytes[18..20], &4u16.to_le_bytes());
    assert!(bytes[20..].iter().all(|&b| b == 0));
    assert_eq!(ImageHeader::from_bytes(&bytes), header);
}

#[test]
fn entries_are_sorted_by_key() {
    let image = sample();
    let keys: Vec<(u16, u8)> = image
        .entries()
        .iter()
        .map(|e| (e.key.state.get(), e.key.unit))
        .collect();
    assert_eq!(keys, vec![(0, b'x'), (0, b'y'), (1, b'z')]);
}

#[test]
fn encode_decode() {
    let image = sample();
    let bytes = image.to_bytes();

    assert_eq!(bytes.len(), HEADER_SIZE + 3 * 8);
    assert_eq!(&bytes[HEADER_SIZE..HEADER_SIZE + 4], &image.entries()[0].key.to_bytes());

    let decoded = TableImage::from_bytes(&bytes).unwrap();
    assert_eq!(decoded, image);
}

#[test]
fn empty_image() {
    let image = TableImage::new(Vec::new());
    let bytes = image.to_bytes();

    assert_eq!(bytes.len(), HEADER_SIZE);
    assert!(TableImage::from_bytes(&bytes).unwrap().is_empty());
}

#[test]
fn rejects_short_file() {
    let err = TableImage::from_bytes(&[0u8; 10]).unwrap_err();
    assert!(matches!(err, ImageError::FileTooSmall(10)));
}

#[test]
fn rejects_bad_magic() {
    let mut bytes = sample().to_bytes();
    bytes[0] = b'X';
    let err = TableImage::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, ImageError::InvalidMagic));
    assert_eq!(err.to_string(), "invalid magic: expected DFAM");
}

#[test]
fn rejects_unknown_version() {
    let mut bytes = sample().to_bytes();
    bytes[4..8].copy_from_slice(&9u32.to_le_bytes());
    let err = TableImage::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, ImageError::UnsupportedVersion(9)));
}

#[test]
fn rejects_other_record_layout() {
    let mut bytes = sample().to_bytes();
    bytes[16..18].copy_from_slice(&8u16.to_le_bytes());
    let err = TableImage::from_bytes(&bytes).unwrap_err();
    assert!(matches!(
        err,
        ImageError::RecordLayout {
            key_size: 8,
            value_size: 4
        }
    ));
}

#[test]
fn rejects_truncated_records() {
    let mut bytes = sample().to_bytes();
    bytes.truncate(bytes.len() - 3);
    let err = TableImage::from_bytes(&bytes).unwrap_err();
    assert!(matches!(
        err,
        ImageError::SizeMismatch {
            entries: 3,
            expected: 24,
            actual: 21
        }
    ));
}

#[test]
fn rejects_corrupted_records() {
    let mut bytes = sample().to_bytes();
    bytes[HEADER_SIZE + 2] ^= 0x01;
    let err = TableImage::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, ImageError::Checksum { .. }));
}

#[test]
fn rejects_nonzero_padding_with_valid_checksum() {
    let mut bytes = sample().to_bytes();
    bytes[HEADER_SIZE + 8 + 3] = 1;
    let checksum = crc32fast::hash(&bytes[HEADER_SIZE..]);
    bytes[8..12].copy_from_slice(&checksum.to_le_bytes());

    let err = TableImage::from_bytes(&bytes).unwrap_err();
    match err {
        ImageError::Record { index, source } => {
            assert_eq!(index, 1);
            assert_eq!(source, LayoutError::NonZeroPadding(1));
        }
        other => panic!("unexpected error: {other}"),
    }
}
