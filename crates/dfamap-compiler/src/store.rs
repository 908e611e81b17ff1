//! Key/value store boundary.
//!
//! The compiler borrows an already-open store and only ever calls `put`.
//! Opening, pinning and closing belong to the caller.

use std::collections::HashMap;

use dfamap_table::{KEY_SIZE, LayoutError, TableEntry, TableKey, TableValue, VALUE_SIZE};

/// A fixed-schema key/value store that accepts single-entry writes.
pub trait MapStore {
    /// Key size the store was created with.
    fn key_size(&self) -> usize;

    /// Value size the store was created with.
    fn value_size(&self) -> usize;

    /// Whether the handle can take writes at all.
    fn check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    /// Insert or overwrite one entry.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;
}

impl<T: MapStore + ?Sized> MapStore for &mut T {
    fn key_size(&self) -> usize {
        (**self).key_size()
    }

    fn value_size(&self) -> usize {
        (**self).value_size()
    }

    fn check(&self) -> Result<(), StoreError> {
        (**self).check()
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        (**self).put(key, value)
    }
}

/// Error reported by a store.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("store handle is closed")]
    Closed,
    #[error("{what} size is {actual} bytes, expected {expected}")]
    SizeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("map is full ({max_entries} entries)")]
    CapacityExceeded { max_entries: usize },
    #[error("err({code}): {message}")]
    Os { code: i32, message: String },
    #[error("{0}")]
    Io(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        match err.raw_os_error() {
            Some(code) => Self::Os {
                code,
                message: err.to_string(),
            },
            None => Self::Io(err.to_string()),
        }
    }
}

/// Check that `store` is open and was created for the table layout.
pub fn check_layout<S: MapStore + ?Sized>(store: &S) -> Result<(), StoreError> {
    store.check()?;
    if store.key_size() != KEY_SIZE {
        return Err(StoreError::SizeMismatch {
            what: "key",
            expected: KEY_SIZE,
            actual: store.key_size(),
        });
    }
    if store.value_size() != VALUE_SIZE {
        return Err(StoreError::SizeMismatch {
            what: "value",
            expected: VALUE_SIZE,
            actual: store.value_size(),
        });
    }
    Ok(())
}

/// In-process store with BPF hash map semantics.
///
/// With a capacity limit, inserting a new key into a full map fails while
/// overwriting an existing key still succeeds.
#[derive(Clone, Debug)]
pub struct MemoryStore {
    entries: HashMap<Vec<u8>, Vec<u8>>,
    key_size: usize,
    value_size: usize,
    max_entries: Option<usize>,
    closed: bool,
    attempts: usize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_layout(KEY_SIZE, VALUE_SIZE)
    }

    /// A store declared with other key/value sizes.
    pub fn with_layout(key_size: usize, value_size: usize) -> Self {
        Self {
            entries: HashMap::new(),
            key_size,
            value_size,
            max_entries: None,
            closed: false,
            attempts: 0,
        }
    }

    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries);
        self
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of `put` calls, successful or not.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Raw entries sorted by key bytes.
    pub fn entries(&self) -> Vec<(Vec<u8>, Vec<u8>)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        entries.sort();
        entries
    }

    /// Entries decoded with the table layout, sorted by `(state, unit)`.
    pub fn decoded(&self) -> Result<Vec<TableEntry>, LayoutError> {
        let mut decoded = self
            .entries
            .iter()
            .map(|(k, v)| -> Result<TableEntry, LayoutError> {
                Ok(TableEntry::new(
                    TableKey::from_bytes(k)?,
                    TableValue::from_bytes(v)?,
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;
        decoded.sort_by_key(|e| e.key);
        Ok(decoded)
    }
}

impl MapStore for MemoryStore {
    fn key_size(&self) -> usize {
        self.key_size
    }

    fn value_size(&self) -> usize {
        self.value_size
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.closed {
            return Err(StoreError::Closed);
        }
        Ok(())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.attempts += 1;
        self.check()?;
        if key.len() != self.key_size {
            return Err(StoreError::SizeMismatch {
                what: "key",
                expected: self.key_size,
                actual: key.len(),
            });
        }
        if value.len() != self.value_size {
            return Err(StoreError::SizeMismatch {
                what: "value",
                expected: self.value_size,
                actual: value.len(),
            });
        }
        if let Some(max_entries) = self.max_entries
            && self.entries.len() >= max_entries
            && !self.entries.contains_key(key)
        {
            return Err(StoreError::CapacityExceeded { max_entries });
        }
        self.entries.insert(key.to_vec(), value.to_vec());
        Ok(())
    }
}
