//! Error types shared by every stage of the pipeline.

use thiserror::Error;

/// A regular expression that cannot be parsed. Positions are character
/// offsets into the pattern.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("empty pattern")]
    EmptyPattern,
    #[error("unclosed parenthesis opened at position {position}")]
    UnclosedParenthesis { position: usize },
    #[error("unexpected ')' at position {position}")]
    UnexpectedParenthesis { position: usize },
    #[error("operator '{operator}' at position {position} has no operand")]
    MissingOperand { operator: char, position: usize },
    #[error("empty alternative next to '|' at position {position}")]
    EmptyAlternative { position: usize },
}

/// A transition table that does not describe an automaton.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedTableError {
    #[error("unreadable table: {0}")]
    Unreadable(String),
    #[error("table needs a finality row and a state-name row")]
    MissingHeader,
    #[error("table declares no states")]
    NoStates,
    #[error("row {row} has {found} columns, expected {expected}")]
    ColumnMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("state name in column {column} is empty")]
    EmptyStateName { column: usize },
    #[error("state '{name}' is declared twice")]
    DuplicateState { name: String },
    #[error("row {row} references undeclared state '{name}'")]
    UndeclaredState { row: usize, name: String },
    #[error("invalid final marker '{marker}' in column {column}")]
    InvalidFinalMarker { column: usize, marker: String },
    #[error("row {row} has no symbol")]
    EmptySymbol { row: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("malformed table: {0}")]
    MalformedTable(#[from] MalformedTableError),
    #[error("resource exhausted: {what} exceeded the limit of {limit}")]
    ResourceExhausted { what: &'static str, limit: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
