//! Pattern syntax: the AST and the parser that produces it.

pub mod ast;
pub mod parser;

pub use ast::Ast;
pub use parser::{Parser, parse};
