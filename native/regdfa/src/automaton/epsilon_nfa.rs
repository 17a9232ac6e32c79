//! Epsilon Non-deterministic Finite Automaton (ε-NFA) implementation.

use crate::automaton::closure::epsilon_closure;
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::{Alphabet, EPSILON, SymbolId, is_epsilon};
use indexmap::{IndexMap, IndexSet};
use std::collections::VecDeque;

/// An Epsilon Non-deterministic Finite Automaton.
///
/// States are numbered densely in creation order and carry a unique name.
/// The alphabet is every symbol interned into [`EpsilonNFA::symbols`], in
/// first-seen order, whether or not a transition uses it.
#[derive(Debug, Clone, Default)]
pub struct EpsilonNFA {
    /// State names; a state's id is its index.
    state_names: IndexSet<String>,
    /// Start states
    start_states: StateSet,
    /// Final (accepting) states
    final_states: StateSet,
    /// Transitions: (source, symbol) -> sorted destination states
    /// For epsilon transitions, symbol == EPSILON
    transitions: IndexMap<(StateId, SymbolId), Vec<StateId>>,
    /// Labels of the input symbols
    symbols: Alphabet,
}

impl EpsilonNFA {
    /// Create a new empty epsilon-NFA.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a state called `name`, or return the id of the existing one.
    pub fn add_state(&mut self, name: &str) -> StateId {
        if let Some(id) = self.state_id(name) {
            return id;
        }
        let (index, _) = self.state_names.insert_full(name.to_owned());
        index as StateId
    }

    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.state_names.get_index_of(name).map(|i| i as StateId)
    }

    pub fn state_name(&self, state: StateId) -> Option<&str> {
        self.state_names.get_index(state as usize).map(String::as_str)
    }

    /// Intern a symbol label so it belongs to the alphabet.
    pub fn declare_symbol(&mut self, label: &str) -> SymbolId {
        self.symbols.intern(label)
    }

    pub fn declare_char(&mut self, c: char) -> SymbolId {
        self.symbols.intern_char(c)
    }

    /// Add a transition from source to destination on the given symbol.
    pub fn add_transition(&mut self, source: StateId, symbol: SymbolId, destination: StateId) {
        debug_assert!((source as usize) < self.state_names.len());
        debug_assert!((destination as usize) < self.state_names.len());

        let destinations = self.transitions.entry((source, symbol)).or_default();
        if let Err(index) = destinations.binary_search(&destination) {
            destinations.insert(index, destination);
        }
    }

    /// Add an epsilon transition from source to destination.
    pub fn add_epsilon_transition(&mut self, source: StateId, destination: StateId) {
        self.add_transition(source, EPSILON, destination);
    }

    /// Add a start state.
    pub fn add_start_state(&mut self, state: StateId) {
        self.start_states.insert(state);
    }

    /// Add a final (accepting) state.
    pub fn add_final_state(&mut self, state: StateId) {
        self.final_states.insert(state);
    }

    /// Get the number of states.
    pub fn num_states(&self) -> StateId {
        self.state_names.len() as StateId
    }

    /// Get the start states.
    pub fn start_states(&self) -> &StateSet {
        &self.start_states
    }

    /// Get the final states.
    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    pub fn is_final(&self, state: StateId) -> bool {
        self.final_states.contains(state)
    }

    /// Labels of the input symbols.
    pub fn symbols(&self) -> &Alphabet {
        &self.symbols
    }

    /// Get the alphabet (all symbols except epsilon), in first-seen order.
    pub fn alphabet(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.symbols.iter().map(|(id, _)| id)
    }

    /// Whether any transition is spontaneous.
    pub fn has_epsilon_transitions(&self) -> bool {
        self.transitions.keys().any(|&(_, symbol)| is_epsilon(symbol))
    }

    /// Destinations of `state` on `symbol`, sorted.
    pub fn successors(&self, state: StateId, symbol: SymbolId) -> Option<&[StateId]> {
        self.transitions.get(&(state, symbol)).map(Vec::as_slice)
    }

    /// Get the epsilon closure of a set of states.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        epsilon_closure(self, states)
    }

    /// Get the states reachable from a set of states on a given symbol,
    /// without following epsilon transitions afterwards.
    pub fn move_on_symbol(&self, states: &StateSet, symbol: SymbolId) -> StateSet {
        assert!(!is_epsilon(symbol), "Use epsilon_closure for epsilon moves");

        let mut reached = StateSet::default();

        for state in states.iter() {
            if let Some(destinations) = self.successors(state, symbol) {
                reached.extend(destinations.iter().copied());
            }
        }

        reached
    }

    /// Check if the NFA accepts no string at all.
    /// Uses BFS from start states following all transitions.
    pub fn is_empty(&self) -> bool {
        if self.start_states.is_empty() {
            return true;
        }

        let mut visited = StateSet::with_capacity(self.num_states() as usize);
        let mut queue: VecDeque<StateId> = self.start_states.iter().collect();

        while let Some(state) = queue.pop_front() {
            if !visited.insert(state) {
                continue;
            }

            if self.final_states.contains(state) {
                return false;
            }

            for (&(src, _), destinations) in &self.transitions {
                if src == state {
                    queue.extend(destinations.iter().copied().filter(|&d| !visited.contains(d)));
                }
            }
        }

        true
    }

    /// Simulate the automaton on `word`, one symbol per character.
    pub fn accepts_str(&self, word: &str) -> bool {
        let mut current = self.epsilon_closure(&self.start_states);
        for c in word.chars() {
            let mut buf = [0u8; 4];
            // `ε` in a word is an ordinary character that no automaton reads.
            let Some(symbol) = self
                .symbols
                .get(c.encode_utf8(&mut buf))
                .filter(|&symbol| !is_epsilon(symbol))
            else {
                return false;
            };
            current = self.epsilon_closure(&self.move_on_symbol(&current, symbol));
            if current.is_empty() {
                return false;
            }
        }
        current.intersects(&self.final_states)
    }

    /// Get all transitions as an iterator, in insertion order.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, SymbolId, StateId)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(&(src, sym), dests)| dests.iter().map(move |&dst| (src, sym, dst)))
    }
}
