//! PyO3 bindings for the automaton module.

use crate::automaton::dfa::DFA;
use crate::automaton::epsilon_nfa::EpsilonNFA as RustEpsilonNFA;
use crate::automaton::subset_construction::subset_construction;
use crate::config::Config;
use crate::error::Error;
use crate::table::{Table, decode, encode_dfa, encode_nfa};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PySet;

fn to_py_err(err: Error) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// An Epsilon Non-deterministic Finite Automaton.
#[pyclass(name = "EpsilonNFA", module = "regdfa.automaton")]
pub struct PyEpsilonNFA {
    /// The underlying Rust NFA
    nfa: RustEpsilonNFA,
}

#[pymethods]
impl PyEpsilonNFA {
    /// Build the Thompson NFA of a pattern.
    #[staticmethod]
    fn from_regex(pattern: &str) -> PyResult<Self> {
        let nfa = crate::regex_to_nfa(pattern, &Config::default()).map_err(to_py_err)?;
        Ok(Self { nfa })
    }

    /// Read an NFA from the semicolon-separated table format.
    #[staticmethod]
    fn from_table(text: &str) -> PyResult<Self> {
        let nfa = Table::parse(text)
            .and_then(|table| decode(&table))
            .map_err(|e| to_py_err(e.into()))?;
        Ok(Self { nfa })
    }

    #[getter]
    fn num_states(&self) -> u32 {
        self.nfa.num_states()
    }

    /// Check if the NFA's language is empty.
    fn is_empty(&self) -> bool {
        self.nfa.is_empty()
    }

    fn accepts(&self, word: &str) -> bool {
        self.nfa.accepts_str(word)
    }

    fn to_table(&self) -> String {
        encode_nfa(&self.nfa).to_string()
    }

    /// Convert to a DFA via subset construction.
    #[pyo3(signature = (max_states = None))]
    fn determinize(&self, max_states: Option<usize>) -> PyResult<PyDFA> {
        let config = Config {
            max_dfa_states: max_states,
            ..Config::default()
        };
        let dfa = subset_construction(&self.nfa, &config).map_err(to_py_err)?;
        Ok(PyDFA { dfa })
    }
}

/// A Deterministic Finite Automaton.
#[pyclass(name = "DeterministicFiniteAutomaton", module = "regdfa.automaton")]
pub struct PyDFA {
    /// The underlying Rust DFA
    dfa: DFA,
}

#[pymethods]
impl PyDFA {
    /// Get the start state as an integer index.
    #[getter]
    fn start_state(&self) -> Option<u32> {
        self.dfa.start_state()
    }

    /// Get the final states as a set of integer indices.
    #[getter]
    fn final_states(&self, py: Python<'_>) -> PyResult<Py<PySet>> {
        let set = PySet::empty(py)?;
        for state in self.dfa.final_states().iter() {
            set.add(state)?;
        }
        Ok(set.unbind())
    }

    #[getter]
    fn num_states(&self) -> u32 {
        self.dfa.num_states()
    }

    /// Check if the DFA's language is empty.
    fn is_empty(&self) -> bool {
        self.dfa.is_empty()
    }

    fn accepts(&self, word: &str) -> bool {
        self.dfa.accepts_str(word)
    }

    fn to_table(&self) -> String {
        encode_dfa(&self.dfa).to_string()
    }
}

/// Register the automaton submodule.
pub fn automaton(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyEpsilonNFA>()?;
    m.add_class::<PyDFA>()?;
    Ok(())
}
