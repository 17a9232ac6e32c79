//! Symbol types for automata transitions.

use indexmap::IndexSet;

/// A symbol identifier represented as a u32.
/// The special value `EPSILON` represents an epsilon (empty) transition.
pub type SymbolId = u32;

/// Special symbol ID representing epsilon (empty) transitions.
/// We use u32::MAX as the epsilon marker.
pub const EPSILON: SymbolId = u32::MAX;

/// How epsilon is written in tables and accepted in patterns.
pub const EPSILON_GLYPH: &str = "ε";

/// Check if a symbol is an epsilon transition.
#[inline]
pub fn is_epsilon(symbol: SymbolId) -> bool {
    symbol == EPSILON
}

/// Interns symbol labels to dense ids, in first-seen order.
///
/// The epsilon glyph is never interned; it always maps to [`EPSILON`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alphabet {
    labels: IndexSet<String>,
}

impl Alphabet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id for `label`, allocating one on first sight.
    pub fn intern(&mut self, label: &str) -> SymbolId {
        if label == EPSILON_GLYPH {
            return EPSILON;
        }
        let (index, _) = self.labels.insert_full(label.to_owned());
        index as SymbolId
    }

    pub fn intern_char(&mut self, c: char) -> SymbolId {
        let mut buf = [0u8; 4];
        self.intern(c.encode_utf8(&mut buf))
    }

    /// Look up an already interned label.
    pub fn get(&self, label: &str) -> Option<SymbolId> {
        if label == EPSILON_GLYPH {
            return Some(EPSILON);
        }
        self.labels.get_index_of(label).map(|i| i as SymbolId)
    }

    /// The label of `symbol`; epsilon renders as its glyph.
    pub fn label(&self, symbol: SymbolId) -> Option<&str> {
        if is_epsilon(symbol) {
            return Some(EPSILON_GLYPH);
        }
        self.labels.get_index(symbol as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate `(id, label)` pairs in interning order.
    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &str)> + '_ {
        self.labels
            .iter()
            .enumerate()
            .map(|(i, label)| (i as SymbolId, label.as_str()))
    }
}
