//! Test fixtures.

use dfamap_table::{Colors, TableEntry};

use crate::automaton::{Dfa, StateRef};
use crate::store::{MapStore, MemoryStore, StoreError};

/// `A(start) --x--> B(accepting)`, `A --y--> C`, `B --z--> A`.
pub fn three_state() -> Dfa {
    let mut b = Dfa::builder();
    let a = b.add_state(false);
    let bb = b.add_state(true);
    let c = b.add_state(false);
    b.add_transition(a, b'x', bb)
        .add_transition(a, b'y', c)
        .add_transition(bb, b'z', a);
    b.build(a)
}

/// Same graph as [`three_state`], with the arena filled in reverse.
pub fn three_state_reversed() -> Dfa {
    let mut b = Dfa::builder();
    let c = b.add_state(false);
    let bb = b.add_state(true);
    let a = b.add_state(false);
    b.add_transition(bb, b'z', a)
        .add_transition(a, b'x', bb)
        .add_transition(a, b'y', c);
    b.build(a)
}

/// `n` states linked `0 -> 1 -> ... -> n-1` on byte `'a'`, last one accepting.
pub fn chain(n: usize) -> Dfa {
    let mut b = Dfa::builder();
    let states: Vec<StateRef> = (0..n).map(|i| b.add_state(i + 1 == n)).collect();
    for pair in states.windows(2) {
        b.add_transition(pair[0], b'a', pair[1]);
    }
    b.build(states[0])
}

/// Plain dump text of `entries`.
pub fn dump_text(entries: &[TableEntry]) -> String {
    dfamap_table::dump(entries, Colors::OFF)
}

/// Store that rejects chosen writes, counted from 1.
pub struct FlakyStore {
    pub inner: MemoryStore,
    fail_on: Vec<usize>,
    calls: usize,
}

impl FlakyStore {
    pub fn new(fail_on: &[usize]) -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_on: fail_on.to_vec(),
            calls: 0,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl MapStore for FlakyStore {
    fn key_size(&self) -> usize {
        self.inner.key_size()
    }

    fn value_size(&self) -> usize {
        self.inner.value_size()
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.calls += 1;
        if self.fail_on.contains(&self.calls) {
            return Err(StoreError::Os {
                code: 7,
                message: "Argument list too long".to_string(),
            });
        }
        self.inner.put(key, value)
    }
}
