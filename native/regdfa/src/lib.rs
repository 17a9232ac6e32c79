//! Regular expressions to deterministic finite automata.
//!
//! A pattern is parsed into an [`Ast`], turned into an ε-NFA by Thompson
//! construction, and determinized by subset construction. Automata move
//! between stages as semicolon-separated [`Table`]s.
//!
//! ```
//! let dfa = regdfa::regex_to_dfa("(ab)*", &regdfa::Config::default()).unwrap();
//! assert!(dfa.accepts_str("abab"));
//! assert!(!dfa.accepts_str("aba"));
//! ```
//!
//! Parsing, construction and teardown use explicit work stacks, so pattern
//! size and nesting are bounded by memory rather than the call stack.
//! [`Config::max_nesting_depth`] caps group and operator nesting. Subset
//! construction may discover up to 2^n states for an n-state NFA; set
//! [`Config::max_dfa_states`] to bound it.

pub mod automaton;
pub mod config;
pub mod error;
pub mod regex;
pub mod table;

pub use automaton::{DFA, EpsilonNFA, NfaBuilder, subset_construction};
pub use config::Config;
pub use error::{Error, MalformedTableError, Result, SyntaxError};
pub use regex::{Ast, parse};
pub use table::Table;

/// Parse `pattern` and build its Thompson NFA.
pub fn regex_to_nfa(pattern: &str, config: &Config) -> Result<EpsilonNFA> {
    let ast = regex::Parser::new(pattern, config).parse()?;
    Ok(NfaBuilder::new().build(&ast))
}

/// Parse `pattern` and build the equivalent DFA.
pub fn regex_to_dfa(pattern: &str, config: &Config) -> Result<DFA> {
    let nfa = regex_to_nfa(pattern, config)?;
    subset_construction(&nfa, config)
}

/// Determinize an NFA given in table form and return the DFA table.
pub fn determinize_table(nfa_table: &Table, config: &Config) -> Result<Table> {
    let nfa = table::decode(nfa_table)?;
    let dfa = subset_construction(&nfa, config)?;
    Ok(table::encode_dfa(&dfa))
}

#[cfg(feature = "python")]
mod python {
    use pyo3::prelude::*;

    fn import_submodule<'py>(
        py: Python<'py>,
        m: &Bound<'py, PyModule>,
        package: &str,
        name: &str,
        import_func: impl FnOnce(&Bound<'py, PyModule>) -> PyResult<()>,
    ) -> PyResult<()> {
        let submodule = PyModule::new(py, name)?;
        import_func(&submodule)?;

        // Add the submodule to sys.modules
        let sys_modules = PyModule::import(py, "sys")?.getattr("modules")?;
        sys_modules.set_item(format!("{}.{}", package, name), submodule.clone())?;

        m.add_submodule(&submodule)?;
        Ok(())
    }

    #[pymodule]
    fn regdfa(m: &Bound<'_, PyModule>) -> PyResult<()> {
        import_submodule(m.py(), m, "regdfa", "automaton", crate::automaton::automaton)
    }
}
