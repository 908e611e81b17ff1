//! Reachable-state enumeration.

use indexmap::IndexSet;

use crate::automaton::Automaton;

/// Every state reachable from the start state, start first, each exactly once.
///
/// Breadth-first: the set doubles as the work queue, so the cursor walks
/// states in insertion order while new targets are appended behind it.
/// Transitions are followed in the state's own order, so a fixed automaton
/// always yields the same sequence.
pub fn enumerate_states<A: Automaton>(automaton: &A) -> Vec<A::State> {
    let mut seen: IndexSet<A::State> = IndexSet::new();
    seen.insert(automaton.start_state());

    let mut cursor = 0;
    while let Some(&state) = seen.get_index(cursor) {
        cursor += 1;
        for (_, target) in automaton.transitions_of(state) {
            seen.insert(target);
        }
    }

    tracing::trace!(states = seen.len(), "enumerated reachable states");
    seen.into_iter().collect()
}
