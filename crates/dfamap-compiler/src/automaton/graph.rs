//! Arena automaton.
//!
//! States live in a `Vec` and are referred to by index, so identity is a
//! plain integer instead of a pointer.

use super::Automaton;

/// Index of a state in a [`Dfa`] arena.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct StateRef(u32);

impl StateRef {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug, Default)]
struct StateData {
    name: Option<String>,
    accepting: bool,
    transitions: Vec<(u8, StateRef)>,
}

/// Automaton stored as an arena of states.
///
/// Construction does not check determinism; a state may carry two
/// transitions on the same byte, and the table compiler rejects it.
#[derive(Clone, Debug)]
pub struct Dfa {
    states: Vec<StateData>,
    start: StateRef,
}

impl Dfa {
    pub fn builder() -> DfaBuilder {
        DfaBuilder::new()
    }

    pub fn start(&self) -> StateRef {
        self.start
    }

    /// Number of states in the arena, reachable or not.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn transition_count(&self) -> usize {
        self.states.iter().map(|s| s.transitions.len()).sum()
    }

    /// Name given with [`DfaBuilder::add_named_state`].
    pub fn name(&self, state: StateRef) -> Option<&str> {
        self.states.get(state.index())?.name.as_deref()
    }
}

impl Automaton for Dfa {
    type State = StateRef;

    fn start_state(&self) -> StateRef {
        self.start
    }

    // A StateRef from another builder has no transitions and never accepts.
    fn transitions_of(&self, state: StateRef) -> Vec<(u8, StateRef)> {
        self.states
            .get(state.index())
            .map(|s| s.transitions.clone())
            .unwrap_or_default()
    }

    fn is_accepting(&self, state: StateRef) -> bool {
        self.states
            .get(state.index())
            .is_some_and(|s| s.accepting)
    }

    fn describe(&self, state: StateRef) -> String {
        match self.name(state) {
            Some(name) => format!("`{name}`"),
            None => format!("#{}", state.index()),
        }
    }
}

/// Incremental [`Dfa`] construction.
#[derive(Debug, Default)]
pub struct DfaBuilder {
    states: Vec<StateData>,
}

impl DfaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_state(&mut self, accepting: bool) -> StateRef {
        // u32 indices outlast any arena that fits in memory
        let id = StateRef(self.states.len() as u32);
        self.states.push(StateData {
            name: None,
            accepting,
            transitions: Vec::new(),
        });
        id
    }

    /// Like [`add_state`](Self::add_state), with a name used in diagnostics.
    pub fn add_named_state(&mut self, name: impl Into<String>, accepting: bool) -> StateRef {
        let id = self.add_state(accepting);
        self.states[id.index()].name = Some(name.into());
        id
    }

    /// Append a transition; order of calls is the state's transition order.
    ///
    /// # Panics
    ///
    /// If `from` was not created by this builder.
    pub fn add_transition(&mut self, from: StateRef, symbol: u8, to: StateRef) -> &mut Self {
        self.states[from.index()].transitions.push((symbol, to));
        self
    }

    pub fn set_accepting(&mut self, state: StateRef, accepting: bool) -> &mut Self {
        self.states[state.index()].accepting = accepting;
        self
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn build(self, start: StateRef) -> Dfa {
        Dfa {
            states: self.states,
            start,
        }
    }
}
