//! Key/value layout of the inspection map.
//!
//! The XDP program declares the map with these C structs:
//!
//! ```c
//! struct ids_inspect_map_key {
//!     __u16 state;
//!     __u8 unit;
//!     __u8 padding;
//! };
//!
//! struct ids_inspect_map_value {
//!     __u16 final_state;
//!     __u16 state;
//! };
//! ```
//!
//! The Rust mirrors below are `repr(C)` with every byte named. Fields are
//! encoded in host byte order, since the kernel reads the map on the same machine.

use std::fmt;

/// Encoded key size in bytes.
pub const KEY_SIZE: usize = 4;

/// Encoded value size in bytes.
pub const VALUE_SIZE: usize = 4;

/// Number of distinct IDs a 16-bit state field can carry.
pub const MAX_STATES: usize = u16::MAX as usize + 1;

/// Canonical state ID, dense in `0..N` for one compilation run.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[repr(transparent)]
pub struct StateId(u16);

impl StateId {
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Convert an enumeration index, or `None` if it does not fit the field.
    pub fn from_index(index: usize) -> Option<Self> {
        u16::try_from(index).ok().map(Self)
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

/// One input byte, rendered `'x'` when printable and `0xNN` otherwise.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Unit(pub u8);

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            b'\'' => f.write_str("'\\''"),
            b'\\' => f.write_str("'\\\\'"),
            b if b.is_ascii_graphic() || b == b' ' => write!(f, "'{}'", b as char),
            b => write!(f, "0x{b:02x}"),
        }
    }
}

/// Map key: `(state, unit)` followed by one zero byte.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(C)]
pub struct TableKey {
    pub state: StateId,
    pub unit: u8,
    /// Always zero. The kernel hashes all four key bytes.
    pub padding: u8,
}

const _: () = assert!(std::mem::size_of::<TableKey>() == KEY_SIZE);
const _: () = assert!(std::mem::align_of::<TableKey>() == 2);

impl TableKey {
    pub fn new(state: StateId, unit: u8) -> Self {
        Self {
            state,
            unit,
            padding: 0,
        }
    }

    pub fn to_bytes(&self) -> [u8; KEY_SIZE] {
        let mut bytes = [0u8; KEY_SIZE];
        bytes[0..2].copy_from_slice(&self.state.get().to_ne_bytes());
        bytes[2] = self.unit;
        bytes[3] = self.padding;
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LayoutError> {
        let bytes: [u8; KEY_SIZE] = bytes.try_into().map_err(|_| LayoutError::Length {
            what: "key",
            expected: KEY_SIZE,
            actual: bytes.len(),
        })?;
        if bytes[3] != 0 {
            return Err(LayoutError::NonZeroPadding(bytes[3]));
        }
        Ok(Self::new(
            StateId(u16::from_ne_bytes([bytes[0], bytes[1]])),
            bytes[2],
        ))
    }
}

/// Map value: accepting flag of the target state, then the target state.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(C)]
pub struct TableValue {
    /// 1 when `state` is accepting, else 0.
    pub final_state: u16,
    pub state: StateId,
}

const _: () = assert!(std::mem::size_of::<TableValue>() == VALUE_SIZE);
const _: () = assert!(std::mem::align_of::<TableValue>() == 2);

impl TableValue {
    pub fn new(state: StateId, accepting: bool) -> Self {
        Self {
            final_state: u16::from(accepting),
            state,
        }
    }

    pub fn is_accepting(&self) -> bool {
        self.final_state != 0
    }

    pub fn to_bytes(&self) -> [u8; VALUE_SIZE] {
        let mut bytes = [0u8; VALUE_SIZE];
        bytes[0..2].copy_from_slice(&self.final_state.to_ne_bytes());
        bytes[2..4].copy_from_slice(&self.state.get().to_ne_bytes());
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LayoutError> {
        let bytes: [u8; VALUE_SIZE] = bytes.try_into().map_err(|_| LayoutError::Length {
            what: "value",
            expected: VALUE_SIZE,
            actual: bytes.len(),
        })?;
        let final_state = u16::from_ne_bytes([bytes[0], bytes[1]]);
        if final_state > 1 {
            return Err(LayoutError::InvalidFlag(final_state));
        }
        Ok(Self {
            final_state,
            state: StateId(u16::from_ne_bytes([bytes[2], bytes[3]])),
        })
    }
}

/// One `(key, value)` pair of the table.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TableEntry {
    pub key: TableKey,
    pub value: TableValue,
}

impl TableEntry {
    pub fn new(key: TableKey, value: TableValue) -> Self {
        Self { key, value }
    }
}

/// Error decoding a key or value.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("{what} must be {expected} bytes, got {actual}")]
    Length {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("key padding must be zero, got {0:#04x}")]
    NonZeroPadding(u8),
    #[error("accepting flag must be 0 or 1, got {0}")]
    InvalidFlag(u16),
}
