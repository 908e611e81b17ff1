use dfamap_table::{StateId, TableKey, TableValue};

use crate::store::{MapStore, MemoryStore, StoreError, check_layout};

fn key(state: u16, unit: u8) -> [u8; 4] {
    TableKey::new(StateId::new(state), unit).to_bytes()
}

fn value(state: u16, accepting: bool) -> [u8; 4] {
    TableValue::new(StateId::new(state), accepting).to_bytes()
}

#[test]
fn put_and_get() {
    let mut store = MemoryStore::new();
    store.put(&key(0, b'x'), &value(1, true)).unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(store.get(&key(0, b'x')), Some(&value(1, true)[..]));
    assert_eq!(store.get(&key(0, b'y')), None);
    assert_eq!(store.attempts(), 1);
}

#[test]
fn put_overwrites() {
    let mut store = MemoryStore::new();
    store.put(&key(0, b'x'), &value(1, false)).unwrap();
    store.put(&key(0, b'x'), &value(2, true)).unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(store.get(&key(0, b'x')), Some(&value(2, true)[..]));
}

#[test]
fn full_store_rejects_new_keys_only() {
    let mut store = MemoryStore::new().with_max_entries(2);
    store.put(&key(0, b'a'), &value(1, false)).unwrap();
    store.put(&key(0, b'b'), &value(1, false)).unwrap();

    let err = store.put(&key(0, b'c'), &value(1, false)).unwrap_err();
    assert_eq!(err, StoreError::CapacityExceeded { max_entries: 2 });
    assert_eq!(err.to_string(), "map is full (2 entries)");

    store.put(&key(0, b'a'), &value(2, true)).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.attempts(), 4);
}

#[test]
fn closed_store_rejects_everything() {
    let mut store = MemoryStore::new();
    store.close();

    assert_eq!(store.check(), Err(StoreError::Closed));
    assert_eq!(store.put(&key(0, 0), &value(0, false)), Err(StoreError::Closed));
    assert!(store.is_empty());
}

#[test]
fn wrong_sized_writes_are_rejected() {
    let mut store = MemoryStore::new();

    let err = store.put(&[0, 0, 0], &value(0, false)).unwrap_err();
    assert_eq!(
        err,
        StoreError::SizeMismatch {
            what: "key",
            expected: 4,
            actual: 3
        }
    );
    let err = store.put(&key(0, 0), &[0; 8]).unwrap_err();
    assert_eq!(err.to_string(), "value size is 8 bytes, expected 4");
}

#[test]
fn layout_check() {
    assert_eq!(check_layout(&MemoryStore::new()), Ok(()));

    let err = check_layout(&MemoryStore::with_layout(8, 4)).unwrap_err();
    assert_eq!(err.to_string(), "key size is 8 bytes, expected 4");

    let err = check_layout(&MemoryStore::with_layout(4, 2)).unwrap_err();
    assert_eq!(err.to_string(), "value size is 2 bytes, expected 4");

    let mut closed = MemoryStore::new();
    closed.close();
    assert_eq!(check_layout(&closed), Err(StoreError::Closed));
}

#[test]
fn entries_are_sorted() {
    let mut store = MemoryStore::new();
    store.put(&key(1, b'z'), &value(0, false)).unwrap();
    store.put(&key(0, b'y'), &value(2, false)).unwrap();
    store.put(&key(0, b'x'), &value(1, true)).unwrap();

    let decoded = store.decoded().unwrap();
    let keys: Vec<(u16, u8)> = decoded.iter().map(|e| (e.key.state.get(), e.key.unit)).collect();
    assert_eq!(keys, vec![(0, b'x'), (0, b'y'), (1, b'z')]);
    assert_eq!(store.entries().len(), 3);
}

#[test]
fn os_errors_keep_code() {
    let err = StoreError::from(std::io::Error::from_raw_os_error(7));
    assert!(matches!(err, StoreError::Os { code: 7, .. }));
    assert!(err.to_string().starts_with("err(7): "));

    let err = StoreError::from(std::io::Error::other("boom"));
    assert_eq!(err, StoreError::Io("boom".to_string()));
}

#[test]
fn mutable_reference_forwards() {
    let mut store = MemoryStore::new();
    {
        let mut by_ref = &mut store;
        MapStore::put(&mut by_ref, &key(3, b'q'), &value(4, true)).unwrap();
        assert_eq!(MapStore::key_size(&by_ref), 4);
    }
    assert_eq!(store.len(), 1);
}
