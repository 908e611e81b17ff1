//! Transition table construction.

use dfamap_table::{TableEntry, TableKey, TableValue, Unit};

use crate::automaton::Automaton;
use crate::error::CompileError;
use crate::ids::CanonicalIds;
use crate::store::{self, MapStore};
use crate::summary::{WriteAggregator, WriteSummary};

/// Every transition of an automaton, encoded and ready to write.
///
/// Entries follow state ID order, then each state's own transition order.
/// Writing consumes the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionTable {
    entries: Vec<TableEntry>,
    state_count: usize,
}

impl TransitionTable {
    /// Encode one entry per transition.
    ///
    /// Fails on the first state with two transitions on one symbol, and on a
    /// target that has no ID.
    pub fn build<A: Automaton>(
        automaton: &A,
        ids: &CanonicalIds<A::State>,
    ) -> Result<Self, CompileError> {
        let mut entries = Vec::new();

        for (id, state) in ids.iter() {
            let mut seen = [false; 256];
            for (symbol, target) in automaton.transitions_of(state) {
                if std::mem::replace(&mut seen[usize::from(symbol)], true) {
                    return Err(CompileError::NonDeterministic {
                        state: id,
                        origin: automaton.describe(state),
                        symbol: Unit(symbol),
                    });
                }
                let target_id = ids.get(target).ok_or(CompileError::UnknownTarget {
                    state: id,
                    symbol: Unit(symbol),
                })?;
                entries.push(TableEntry::new(
                    TableKey::new(id, symbol),
                    TableValue::new(target_id, automaton.is_accepting(target)),
                ));
            }
        }

        Ok(Self {
            entries,
            state_count: ids.len(),
        })
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

    /// Number of states the IDs were assigned to.
    pub fn state_count(&self) -> usize {
        self.state_count
    }

    /// Number of distinct accepting transition targets.
    pub fn accepting_targets(&self) -> usize {
        let mut targets: Vec<_> = self
            .entries
            .iter()
            .filter(|e| e.value.is_accepting())
            .map(|e| e.value.state)
            .collect();
        targets.sort_unstable();
        targets.dedup();
        targets.len()
    }

    /// Write every entry once, in table order.
    ///
    /// The store is validated before the first write. After that, write
    /// failures do not stop the run; they end up in the summary.
    pub fn write_to<S: MapStore + ?Sized>(
        self,
        store: &mut S,
    ) -> Result<WriteSummary, CompileError> {
        store::check_layout(store).map_err(CompileError::InvalidStore)?;

        let mut aggregator = WriteAggregator::new(store);
        for entry in &self.entries {
            aggregator.write(entry);
        }
        let summary = aggregator.finish();

        tracing::info!(
            states = self.state_count,
            attempted = summary.attempted(),
            failed = summary.failed(),
            "wrote transition table"
        );
        Ok(summary)
    }
}
