//! Finite automata for pattern compilation.
//!
//! This module provides epsilon-NFA and DFA implementations with:
//! - Thompson construction from a pattern AST
//! - Epsilon closure computation
//! - Subset construction (NFA to DFA conversion)
//! - PyO3 bindings for Python interoperability (`python` feature)

mod closure;
mod dfa;
mod epsilon_nfa;
#[cfg(feature = "python")]
mod python_bindings;
mod state;
mod subset_construction;
mod symbol;
mod thompson;

pub use closure::{EpsilonClosures, epsilon_closure};
pub use dfa::DFA;
pub use epsilon_nfa::EpsilonNFA;
#[cfg(feature = "python")]
pub use python_bindings::automaton;
pub use state::{StateId, StateSet};
pub use subset_construction::subset_construction;
pub use symbol::{Alphabet, EPSILON, EPSILON_GLYPH, SymbolId, is_epsilon};
pub use thompson::NfaBuilder;
