//! Automaton boundary and automaton sources.
//!
//! The compiler only reads automata through [`Automaton`]. Three sources
//! implement it:
//! - `graph` - an arena automaton built in code ([`Dfa`])
//! - `json` - a JSON description that builds a [`Dfa`]
//! - `regex` - a pattern compiled by regex-automata ([`RegexAutomaton`])

mod graph;
mod json;
mod regex;

#[cfg(test)]
mod regex_tests;

use std::fmt::Debug;
use std::hash::Hash;

pub use graph::{Dfa, DfaBuilder, StateRef};
pub use json::{DfaSpec, StateSpec, SymbolSpec};
pub use regex::{RegexAutomaton, RegexOptions};

/// Read-only view of a deterministic automaton.
///
/// State identity is the `State` value itself: two states are the same state
/// exactly when they compare equal.
pub trait Automaton {
    type State: Copy + Eq + Hash + Debug;

    fn start_state(&self) -> Self::State;

    /// Outgoing transitions as `(symbol, target)`, in the state's own order.
    fn transitions_of(&self, state: Self::State) -> Vec<(u8, Self::State)>;

    fn is_accepting(&self, state: Self::State) -> bool;

    /// How `state` is named in diagnostics.
    fn describe(&self, state: Self::State) -> String {
        format!("{state:?}")
    }
}

impl<A: Automaton + ?Sized> Automaton for &A {
    type State = A::State;

    fn start_state(&self) -> Self::State {
        (**self).start_state()
    }

    fn transitions_of(&self, state: Self::State) -> Vec<(u8, Self::State)> {
        (**self).transitions_of(state)
    }

    fn is_accepting(&self, state: Self::State) -> bool {
        (**self).is_accepting(state)
    }

    fn describe(&self, state: Self::State) -> String {
        (**self).describe(state)
    }
}

/// Error producing an automaton from a description or pattern.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to compile pattern `{pattern}`: {message}")]
    Regex { pattern: String, message: String },
    #[error("invalid automaton description: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown state `{0}`")]
    UnknownState(String),
    #[error("duplicate state `{0}`")]
    DuplicateState(String),
    #[error("invalid symbol {0:?}: expected one character up to U+00FF")]
    InvalidSymbol(String),
}
