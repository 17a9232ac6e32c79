//! Deterministic Finite Automaton (DFA) implementation.

use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::{Alphabet, SymbolId};
use indexmap::IndexMap;
use std::collections::VecDeque;

/// A Deterministic Finite Automaton.
///
/// States are named `S0`, `S1`, ... after their id. The transition function
/// is partial: a missing `(state, symbol)` entry rejects.
#[derive(Debug, Clone, Default)]
pub struct DFA {
    /// Number of states
    num_states: StateId,
    /// Start state (None if empty)
    start_state: Option<StateId>,
    /// Final (accepting) states
    final_states: StateSet,
    /// Transitions: (source, symbol) -> destination
    transitions: IndexMap<(StateId, SymbolId), StateId>,
    /// Labels of the input symbols
    symbols: Alphabet,
    /// NFA states behind each DFA state, indexed by DFA state id
    state_mapping: Option<Vec<Vec<StateId>>>,
}

impl DFA {
    /// Create a new empty DFA.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty DFA over an existing alphabet.
    pub fn with_alphabet(symbols: Alphabet) -> Self {
        Self {
            symbols,
            ..Self::default()
        }
    }

    /// Add a new state and return its ID.
    pub fn add_state(&mut self) -> StateId {
        let id = self.num_states;
        self.num_states += 1;
        id
    }

    /// Set the start state.
    pub fn set_start_state(&mut self, state: StateId) {
        self.start_state = Some(state);
    }

    /// Add a final (accepting) state.
    pub fn add_final_state(&mut self, state: StateId) {
        self.final_states.insert(state);
    }

    /// Add a transition, returning the destination it replaced, if any.
    pub fn add_transition(
        &mut self,
        source: StateId,
        symbol: SymbolId,
        destination: StateId,
    ) -> Option<StateId> {
        self.transitions.insert((source, symbol), destination)
    }

    /// Get the transition from a state on a symbol.
    pub fn transition(&self, source: StateId, symbol: SymbolId) -> Option<StateId> {
        self.transitions.get(&(source, symbol)).copied()
    }

    /// Get the number of states.
    pub fn num_states(&self) -> StateId {
        self.num_states
    }

    /// Get the start state.
    pub fn start_state(&self) -> Option<StateId> {
        self.start_state
    }

    /// Get the final states.
    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    pub fn is_final(&self, state: StateId) -> bool {
        self.final_states.contains(state)
    }

    pub fn state_name(&self, state: StateId) -> String {
        format!("S{state}")
    }

    /// Labels of the input symbols.
    pub fn symbols(&self) -> &Alphabet {
        &self.symbols
    }

    /// Get the alphabet, in first-seen order.
    pub fn alphabet(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.symbols.iter().map(|(id, _)| id)
    }

    /// Record the NFA states behind each DFA state.
    pub fn set_state_mapping(&mut self, mapping: Vec<Vec<StateId>>) {
        self.state_mapping = Some(mapping);
    }

    /// The sorted NFA states behind each DFA state, indexed by DFA state.
    pub fn state_mapping(&self) -> Option<&[Vec<StateId>]> {
        self.state_mapping.as_deref()
    }

    /// Follow `word`, a sequence of symbol labels, from the start state.
    /// `None` when some symbol has no transition.
    pub fn run<'a, I>(&self, word: I) -> Option<StateId>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut state = self.start_state?;
        for label in word {
            let symbol = self.symbols.get(label)?;
            state = self.transition(state, symbol)?;
        }
        Some(state)
    }

    /// Like [`DFA::run`], one symbol per character.
    pub fn run_str(&self, word: &str) -> Option<StateId> {
        let labels: Vec<String> = word.chars().map(String::from).collect();
        self.run(labels.iter().map(String::as_str))
    }

    pub fn accepts<'a, I>(&self, word: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.run(word).is_some_and(|state| self.is_final(state))
    }

    pub fn accepts_str(&self, word: &str) -> bool {
        self.run_str(word).is_some_and(|state| self.is_final(state))
    }

    /// Check if the DFA is empty (accepts no strings).
    pub fn is_empty(&self) -> bool {
        let Some(start) = self.start_state else {
            return true;
        };

        if self.final_states.is_empty() {
            return true;
        }

        // BFS to find if any final state is reachable
        let mut visited = StateSet::with_capacity(self.num_states as usize);
        let mut queue = VecDeque::new();
        queue.push_back(start);

        while let Some(state) = queue.pop_front() {
            if !visited.insert(state) {
                continue;
            }

            if self.final_states.contains(state) {
                return false;
            }

            for symbol in self.alphabet() {
                if let Some(next) = self.transition(state, symbol) {
                    if !visited.contains(next) {
                        queue.push_back(next);
                    }
                }
            }
        }

        true
    }

    /// Get all transitions as an iterator, in insertion order.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, SymbolId, StateId)> + '_ {
        self.transitions
            .iter()
            .map(|(&(src, sym), &dst)| (src, sym, dst))
    }
}
