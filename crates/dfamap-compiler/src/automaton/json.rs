//! JSON automaton descriptions.
//!
//! ```json
//! {
//!   "start": "A",
//!   "states": [
//!     { "name": "A", "transitions": [["x", "B"], ["y", "C"]] },
//!     { "name": "B", "accepting": true, "transitions": [["z", "A"]] },
//!     { "name": "C" }
//!   ]
//! }
//! ```
//!
//! A symbol is a one-character string (up to U+00FF) or an integer byte.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::graph::{Dfa, DfaBuilder, StateRef};
use super::SourceError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DfaSpec {
    pub start: String,
    pub states: Vec<StateSpec>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSpec {
    pub name: String,
    #[serde(default)]
    pub accepting: bool,
    #[serde(default)]
    pub transitions: Vec<(SymbolSpec, String)>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SymbolSpec {
    Byte(u8),
    Char(String),
}

impl SymbolSpec {
    pub fn to_byte(&self) -> Result<u8, SourceError> {
        match self {
            Self::Byte(b) => Ok(*b),
            Self::Char(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => {
                        u8::try_from(c).map_err(|_| SourceError::InvalidSymbol(s.clone()))
                    }
                    _ => Err(SourceError::InvalidSymbol(s.clone())),
                }
            }
        }
    }
}

impl DfaSpec {
    pub fn parse(text: &str) -> Result<Self, SourceError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Build the arena automaton. States keep their declaration order.
    pub fn to_dfa(&self) -> Result<Dfa, SourceError> {
        let mut builder = DfaBuilder::new();
        let mut by_name: IndexMap<&str, StateRef> = IndexMap::new();

        for state in &self.states {
            let id = builder.add_named_state(state.name.as_str(), state.accepting);
            if by_name.insert(state.name.as_str(), id).is_some() {
                return Err(SourceError::DuplicateState(state.name.clone()));
            }
        }

        let lookup = |name: &str| {
            by_name
                .get(name)
                .copied()
                .ok_or_else(|| SourceError::UnknownState(name.to_string()))
        };

        for state in &self.states {
            let from = lookup(&state.name)?;
            for (symbol, target) in &state.transitions {
                let to = lookup(target)?;
                builder.add_transition(from, symbol.to_byte()?, to);
            }
        }

        let start = lookup(&self.start)?;
        Ok(builder.build(start))
    }
}

impl Dfa {
    /// Parse a JSON description straight into an automaton.
    pub fn from_json(text: &str) -> Result<Self, SourceError> {
        DfaSpec::parse(text)?.to_dfa()
    }
}
