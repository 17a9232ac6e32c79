//! Subset construction algorithm for converting ε-NFA to DFA.

use crate::automaton::closure::EpsilonClosures;
use crate::automaton::dfa::DFA;
use crate::automaton::epsilon_nfa::EpsilonNFA;
use crate::automaton::state::{StateId, StateSet};
use crate::config::Config;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::{debug, trace};
use std::collections::VecDeque;

/// Convert an epsilon-NFA to a DFA using the powerset construction algorithm.
///
/// DFA states are numbered in discovery order, so the closure of the start
/// states is always `S0`. The worklist is first in, first out and symbols are
/// tried in alphabet order, which makes the numbering reproducible.
pub fn subset_construction(nfa: &EpsilonNFA, config: &Config) -> Result<DFA> {
    let closures = EpsilonClosures::new(nfa);

    // Each DFA state corresponds to a set of NFA states, keyed by its
    // sorted members. A state's id is its index in this map.
    let mut state_mapping: IndexMap<Vec<StateId>, StateId> = IndexMap::new();
    let mut dfa = DFA::with_alphabet(nfa.symbols().clone());
    let mut worklist: VecDeque<(StateSet, StateId)> = VecDeque::new();

    let initial_set = closures.closure(nfa.start_states());
    if initial_set.is_empty() {
        // No start state - return empty DFA
        dfa.set_state_mapping(Vec::new());
        return Ok(dfa);
    }

    let initial_dfa_state = allocate(&mut dfa, &initial_set, nfa, config)?;
    state_mapping.insert(initial_set.to_vec(), initial_dfa_state);
    dfa.set_start_state(initial_dfa_state);
    worklist.push_back((initial_set, initial_dfa_state));

    while let Some((current_nfa_set, current_dfa_state)) = worklist.pop_front() {
        for symbol in nfa.alphabet() {
            let moved = nfa.move_on_symbol(&current_nfa_set, symbol);
            let next_nfa_set = closures.closure(&moved);

            if next_nfa_set.is_empty() {
                // No transition on this symbol
                continue;
            }

            let next_vec = next_nfa_set.to_vec();
            let next_dfa_state = match state_mapping.get(&next_vec) {
                Some(&existing) => existing,
                None => {
                    let new_state = allocate(&mut dfa, &next_nfa_set, nfa, config)?;
                    trace!("discovered S{new_state} = {next_nfa_set:?}");
                    state_mapping.insert(next_vec, new_state);
                    worklist.push_back((next_nfa_set, new_state));
                    new_state
                }
            };

            dfa.add_transition(current_dfa_state, symbol, next_dfa_state);
        }
    }

    debug!(
        "subset construction: {} NFA states -> {} DFA states",
        nfa.num_states(),
        dfa.num_states()
    );

    dfa.set_state_mapping(state_mapping.into_keys().collect());
    Ok(dfa)
}

/// Allocate the DFA state for `nfa_set`, marking it final when the set holds
/// an NFA final state.
fn allocate(dfa: &mut DFA, nfa_set: &StateSet, nfa: &EpsilonNFA, config: &Config) -> Result<StateId> {
    if let Some(limit) = config.max_dfa_states {
        if dfa.num_states() as usize >= limit {
            return Err(Error::ResourceExhausted {
                what: "DFA states",
                limit,
            });
        }
    }

    let state = dfa.add_state();
    if nfa_set.intersects(nfa.final_states()) {
        dfa.add_final_state(state);
    }
    Ok(state)
}
