use dfamap_table::{StateId, Unit};

use crate::store::StoreError;

/// Errors that abort a compilation run.
///
/// All of these are raised before the first write. Individual write failures
/// are not errors; they are collected in [`crate::WriteSummary`].
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// A state has two transitions on the same symbol.
    /// `origin` is the automaton's own name for the state.
    #[error("state {state} ({origin}) has more than one transition on {symbol}")]
    NonDeterministic {
        state: StateId,
        origin: String,
        symbol: Unit,
    },

    /// More reachable states than the ID field can carry.
    #[error("automaton has {count} reachable states, at most {max} are representable")]
    TooManyStates { count: usize, max: usize },

    /// A transition target was not seen during enumeration.
    #[error("transition from {state} on {symbol} leads to a state outside the enumeration")]
    UnknownTarget { state: StateId, symbol: Unit },

    /// The store handle cannot take writes.
    #[error("store rejected before compilation: {0}")]
    InvalidStore(#[source] StoreError),
}
