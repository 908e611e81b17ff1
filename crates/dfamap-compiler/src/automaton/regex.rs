//! Pattern source backed by regex-automata.
//!
//! Compiles a pattern to a dense DFA and exposes it through [`Automaton`].
//! regex-automata reports matches one byte late: a match state means the
//! match ended *before* the byte that led into it. Acceptance is therefore
//! read from the end-of-input transition, which restores "accepting after the
//! last consumed byte". States that only exist to report that delayed match
//! (not accepting, no live transitions) are left out, together with dead and
//! quit states. A missing transition means "no match continues from here".

use regex_automata::dfa::{Automaton as _, StartKind, dense};
use regex_automata::util::primitives::StateID;
use regex_automata::{Anchored, Input};
use serde::{Deserialize, Serialize};

use super::{Automaton, SourceError};

/// Options for compiling a pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegexOptions {
    /// Match only at the start of the input. Unanchored automata carry a
    /// self-loop on every byte from the start state.
    pub anchored: bool,
    /// Minimize the DFA before exposing it.
    pub minimize: bool,
}

impl Default for RegexOptions {
    fn default() -> Self {
        Self {
            anchored: true,
            minimize: true,
        }
    }
}

/// A compiled pattern, walkable as an [`Automaton`].
#[derive(Clone, Debug)]
pub struct RegexAutomaton {
    pattern: String,
    dfa: dense::DFA<Vec<u32>>,
    start: StateID,
}

impl RegexAutomaton {
    pub fn new(pattern: &str) -> Result<Self, SourceError> {
        Self::with_options(pattern, RegexOptions::default())
    }

    pub fn with_options(pattern: &str, options: RegexOptions) -> Result<Self, SourceError> {
        let regex_err = |message: String| SourceError::Regex {
            pattern: pattern.to_string(),
            message,
        };

        let start_kind = if options.anchored {
            StartKind::Anchored
        } else {
            StartKind::Unanchored
        };
        let dfa = dense::DFA::builder()
            .configure(
                dense::DFA::config()
                    .start_kind(start_kind)
                    .minimize(options.minimize),
            )
            .build(pattern)
            .map_err(|e| regex_err(e.to_string()))?;

        let anchored = if options.anchored {
            Anchored::Yes
        } else {
            Anchored::No
        };
        let start = dfa
            .start_state_forward(&Input::new("").anchored(anchored))
            .map_err(|e| regex_err(e.to_string()))?;

        tracing::debug!(pattern, ?options, "compiled pattern to DFA");

        Ok(Self {
            pattern: pattern.to_string(),
            dfa,
            start,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Target of `state` on `byte`, or `None` when no match can continue.
    fn live_next(&self, state: StateID, byte: u8) -> Option<StateID> {
        let next = self.dfa.next_state(state, byte);
        if self.dfa.is_dead_state(next) || self.dfa.is_quit_state(next) {
            return None;
        }
        if !self.is_accepting(next) && self.is_dead_end(next) {
            return None;
        }
        Some(next)
    }

    fn is_dead_end(&self, state: StateID) -> bool {
        (0..=u8::MAX).all(|byte| {
            let next = self.dfa.next_state(state, byte);
            self.dfa.is_dead_state(next) || self.dfa.is_quit_state(next)
        })
    }
}

impl Automaton for RegexAutomaton {
    type State = StateID;

    fn start_state(&self) -> StateID {
        self.start
    }

    fn transitions_of(&self, state: StateID) -> Vec<(u8, StateID)> {
        (0..=u8::MAX)
            .filter_map(|byte| self.live_next(state, byte).map(|next| (byte, next)))
            .collect()
    }

    fn is_accepting(&self, state: StateID) -> bool {
        let eoi = self.dfa.next_eoi_state(state);
        self.dfa.is_match_state(eoi)
    }

    fn describe(&self, state: StateID) -> String {
        format!("dfa state {}", state.as_usize())
    }
}
