//! dfamap compiler: turns a deterministic automaton into transition map entries.
//!
//! The pipeline is a single synchronous pass:
//! - `enumerate` - reachable states in a deterministic breadth-first order
//! - `ids` - dense canonical state IDs in enumeration order
//! - `table` - fixed-width keys and values for every transition
//! - `summary` - best-effort write aggregation
//!
//! Automata come in through the [`Automaton`] trait; entries go out through
//! the [`MapStore`] trait.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod automaton;
mod compiler;
pub mod enumerate;
mod error;
pub mod ids;
pub mod store;
pub mod summary;
pub mod table;

#[cfg(test)]
mod store_tests;
#[cfg(test)]
pub mod test_utils;

pub use automaton::{
    Automaton, Dfa, DfaBuilder, DfaSpec, RegexAutomaton, RegexOptions, SourceError, StateRef,
};
pub use compiler::{CompileOptions, TableCompiler};
pub use enumerate::enumerate_states;
pub use error::CompileError;
pub use ids::CanonicalIds;
pub use store::{MapStore, MemoryStore, StoreError};
pub use summary::{WriteFailure, WriteSummary};
pub use table::TransitionTable;

pub use dfamap_table::{MAX_STATES, StateId, TableEntry, TableKey, TableValue};

/// Result type for compilation.
pub type Result<T> = std::result::Result<T, CompileError>;
