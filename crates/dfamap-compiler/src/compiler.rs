use serde::{Deserialize, Serialize};

use dfamap_table::MAX_STATES;

use crate::automaton::Automaton;
use crate::enumerate::enumerate_states;
use crate::error::CompileError;
use crate::ids::CanonicalIds;
use crate::store::{self, MapStore};
use crate::summary::WriteSummary;
use crate::table::TransitionTable;

/// Compilation settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Largest accepted reachable state count. Values above [`MAX_STATES`]
    /// behave as [`MAX_STATES`].
    pub max_states: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            max_states: MAX_STATES,
        }
    }
}

/// Automaton to map compiler.
///
/// One call is one run: enumerate, assign IDs, build the table, write it.
/// Every check that can abort the run happens before the first write.
#[derive(Clone, Debug, Default)]
pub struct TableCompiler {
    options: CompileOptions,
}

impl TableCompiler {
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Build the table without touching any store.
    pub fn plan<A: Automaton>(&self, automaton: &A) -> Result<TransitionTable, CompileError> {
        let states = enumerate_states(automaton);
        let ids = CanonicalIds::assign(states, self.options.max_states)?;
        let table = TransitionTable::build(automaton, &ids)?;

        tracing::debug!(
            states = table.state_count(),
            entries = table.len(),
            "planned transition table"
        );
        Ok(table)
    }

    /// Compile `automaton` into `store`.
    ///
    /// Returns `Err` only when nothing was written. Individual write failures
    /// are reported in the summary.
    pub fn compile<A: Automaton, S: MapStore + ?Sized>(
        &self,
        automaton: &A,
        store: &mut S,
    ) -> Result<WriteSummary, CompileError> {
        store::check_layout(store).map_err(CompileError::InvalidStore)?;
        self.plan(automaton)?.write_to(store)
    }
}
