//! Best-effort write aggregation.
//!
//! A failed write is recorded and the run moves on. There is no retry and no
//! rollback: callers that need all-or-nothing check [`WriteSummary::is_complete`]
//! and discard the table themselves.

use std::fmt;

use dfamap_table::{TableEntry, TableKey};

use crate::store::{MapStore, StoreError};

/// One rejected write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteFailure {
    pub key: TableKey,
    pub error: StoreError,
}

/// Outcome of writing a table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteSummary {
    attempted: usize,
    failures: Vec<WriteFailure>,
}

impl WriteSummary {
    pub fn attempted(&self) -> usize {
        self.attempted
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn written(&self) -> usize {
        self.attempted - self.failures.len()
    }

    pub fn failures(&self) -> &[WriteFailure] {
        &self.failures
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for WriteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "attempted={} failed={}", self.attempted, self.failed())
    }
}

/// Issues writes against a borrowed store and tallies the results.
pub(crate) struct WriteAggregator<'s, S: ?Sized> {
    store: &'s mut S,
    summary: WriteSummary,
}

impl<'s, S: MapStore + ?Sized> WriteAggregator<'s, S> {
    pub(crate) fn new(store: &'s mut S) -> Self {
        Self {
            store,
            summary: WriteSummary::default(),
        }
    }

    pub(crate) fn write(&mut self, entry: &TableEntry) {
        let TableEntry { key, value } = entry;
        self.summary.attempted += 1;
        tracing::trace!(
            state = key.state.get(),
            unit = key.unit,
            target = value.state.get(),
            accepting = value.is_accepting(),
            "map update"
        );
        if let Err(error) = self.store.put(&key.to_bytes(), &value.to_bytes()) {
            tracing::warn!(
                state = key.state.get(),
                unit = key.unit,
                %error,
                "failed to update map entry"
            );
            self.summary.failures.push(WriteFailure { key: *key, error });
        }
    }

    pub(crate) fn finish(self) -> WriteSummary {
        self.summary
    }
}
