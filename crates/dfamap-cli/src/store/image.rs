use std::collections::BTreeMap;

use dfamap_compiler::{MapStore, StoreError};
use dfamap_table::{ImageError, KEY_SIZE, TableEntry, TableImage, TableKey, TableValue, VALUE_SIZE};

/// Collects map updates for a table image file.
///
/// Later writes to a key replace earlier ones, as in a hash map.
#[derive(Debug, Default)]
pub struct ImageStore {
    records: BTreeMap<[u8; KEY_SIZE], [u8; VALUE_SIZE]>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Decode the collected records into an image.
    pub fn to_image(&self) -> Result<TableImage, ImageError> {
        let entries = self
            .records
            .iter()
            .enumerate()
            .map(|(index, (key, value))| -> Result<TableEntry, ImageError> {
                let record = |source| ImageError::Record { index, source };
                Ok(TableEntry::new(
                    TableKey::from_bytes(key).map_err(record)?,
                    TableValue::from_bytes(value).map_err(record)?,
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TableImage::new(entries))
    }
}

impl MapStore for ImageStore {
    fn key_size(&self) -> usize {
        KEY_SIZE
    }

    fn value_size(&self) -> usize {
        VALUE_SIZE
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        let key: [u8; KEY_SIZE] = key.try_into().map_err(|_| StoreError::SizeMismatch {
            what: "key",
            expected: KEY_SIZE,
            actual: key.len(),
        })?;
        let value: [u8; VALUE_SIZE] = value.try_into().map_err(|_| StoreError::SizeMismatch {
            what: "value",
            expected: VALUE_SIZE,
            actual: value.len(),
        })?;
        self.records.insert(key, value);
        Ok(())
    }
}
