//! Canonical state IDs.

use std::hash::Hash;

use indexmap::IndexSet;

use dfamap_table::{MAX_STATES, StateId};

use crate::error::CompileError;

/// Dense IDs `0..N` for enumerated states, in enumeration order.
///
/// The ID of a state is its position in the set, so lookups go both ways in
/// O(1) and the assignment is a bijection by construction.
#[derive(Clone, Debug)]
pub struct CanonicalIds<S> {
    states: IndexSet<S>,
}

impl<S: Copy + Eq + Hash> CanonicalIds<S> {
    /// Assign IDs to `states`, failing if there are more than `limit`.
    ///
    /// `limit` is clamped to [`MAX_STATES`]. Repeated states keep their first
    /// position.
    pub fn assign(
        states: impl IntoIterator<Item = S>,
        limit: usize,
    ) -> Result<Self, CompileError> {
        let max = limit.min(MAX_STATES);
        let states: IndexSet<S> = states.into_iter().collect();
        if states.len() > max {
            return Err(CompileError::TooManyStates {
                count: states.len(),
                max,
            });
        }
        Ok(Self { states })
    }

    pub fn get(&self, state: S) -> Option<StateId> {
        self.states.get_index_of(&state).and_then(StateId::from_index)
    }

    pub fn state(&self, id: StateId) -> Option<S> {
        self.states.get_index(id.index()).copied()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// `(id, state)` pairs in ID order.
    pub fn iter(&self) -> impl Iterator<Item = (StateId, S)> + '_ {
        self.states
            .iter()
            .enumerate()
            .filter_map(|(index, &state)| StateId::from_index(index).map(|id| (id, state)))
    }
}
