//! Epsilon closures.

use crate::automaton::epsilon_nfa::EpsilonNFA;
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::EPSILON;
use std::collections::VecDeque;

/// States reachable from `states` through zero or more epsilon transitions.
///
/// Breadth-first; every state is visited at most once and the seeds are
/// always part of the result.
pub fn epsilon_closure(nfa: &EpsilonNFA, states: &StateSet) -> StateSet {
    let mut closure = StateSet::default();
    let mut queue: VecDeque<StateId> = VecDeque::new();

    for state in states.iter() {
        if closure.insert(state) {
            queue.push_back(state);
        }
    }

    while let Some(current) = queue.pop_front() {
        if let Some(destinations) = nfa.successors(current, EPSILON) {
            for &next in destinations {
                if closure.insert(next) {
                    queue.push_back(next);
                }
            }
        }
    }

    closure
}

/// Per-state epsilon closures, computed once for an automaton.
///
/// Each closure is kept as a sorted list; most hold a handful of states, and
/// a bit set per state would cost quadratic memory.
#[derive(Debug, Clone)]
pub struct EpsilonClosures {
    closures: Vec<Vec<StateId>>,
}

impl EpsilonClosures {
    pub fn new(nfa: &EpsilonNFA) -> Self {
        // One marker set shared by every search, cleared member by member.
        let mut seen = StateSet::with_capacity(nfa.num_states() as usize);
        let closures = (0..nfa.num_states())
            .map(|state| {
                let mut members = vec![state];
                seen.insert(state);
                let mut next = 0;
                while let Some(&current) = members.get(next) {
                    next += 1;
                    for &target in nfa.successors(current, EPSILON).unwrap_or_default() {
                        if seen.insert(target) {
                            members.push(target);
                        }
                    }
                }
                for &member in &members {
                    seen.remove(member);
                }
                members.sort_unstable();
                members
            })
            .collect();
        Self { closures }
    }

    /// The closure of a single state, sorted.
    pub fn of_state(&self, state: StateId) -> Option<&[StateId]> {
        self.closures.get(state as usize).map(Vec::as_slice)
    }

    /// The closure of a set of states, as the union of per-state closures.
    pub fn closure(&self, states: &StateSet) -> StateSet {
        let mut closure = StateSet::default();
        for state in states.iter() {
            if let Some(cached) = self.of_state(state) {
                closure.extend(cached.iter().copied());
            }
        }
        closure
    }
}
