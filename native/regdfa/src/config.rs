//! Resource limits for a single conversion.

/// Default bound on group and operator nesting in a pattern.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 1000;

/// Limits applied while parsing and determinizing.
///
/// Subset construction can produce up to 2^n DFA states for an n-state NFA;
/// `max_dfa_states` is unbounded unless a caller sets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    pub max_nesting_depth: usize,
    pub max_dfa_states: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            max_dfa_states: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    pub fn with_max_dfa_states(mut self, states: usize) -> Self {
        self.max_dfa_states = Some(states);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_setters() {
        let config = Config::new().with_max_nesting_depth(8).with_max_dfa_states(3);
        assert_eq!(config.max_nesting_depth, 8);
        assert_eq!(config.max_dfa_states, Some(3));
        assert_eq!(Config::default().max_dfa_states, None);
    }
}
