//! Abstract syntax tree of a parsed pattern.

use std::fmt;
use std::mem;

/// A regular expression over single-character symbols.
///
/// Children are uniquely owned; a tree is never shared or mutated after the
/// parser returns it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Ast {
    Literal(char),
    Epsilon,
    Concat(Box<Ast>, Box<Ast>),
    Or(Box<Ast>, Box<Ast>),
    /// Zero or more (`*`).
    Repeat(Box<Ast>),
    /// One or more (`+`).
    Plus(Box<Ast>),
}

impl Ast {
    pub fn concat(left: Ast, right: Ast) -> Self {
        Ast::Concat(Box::new(left), Box::new(right))
    }

    pub fn or(left: Ast, right: Ast) -> Self {
        Ast::Or(Box::new(left), Box::new(right))
    }

    pub fn repeat(inner: Ast) -> Self {
        Ast::Repeat(Box::new(inner))
    }

    pub fn plus(inner: Ast) -> Self {
        Ast::Plus(Box::new(inner))
    }

    /// Fold `nodes` into a right-leaning chain with `combine`, so that
    /// `[a, b, c]` becomes `combine(a, combine(b, c))`.
    pub(crate) fn fold_right(nodes: Vec<Ast>, combine: fn(Ast, Ast) -> Ast) -> Option<Ast> {
        nodes
            .into_iter()
            .rev()
            .reduce(|right, left| combine(left, right))
    }

    fn is_leaf(&self) -> bool {
        matches!(self, Ast::Literal(_) | Ast::Epsilon)
    }

    /// Move the non-leaf children of this node onto `pending`, leaving
    /// `Epsilon` in their place.
    fn detach_children(&mut self, pending: &mut Vec<Ast>) {
        let mut detach = |child: &mut Box<Ast>| {
            if !child.is_leaf() {
                pending.push(mem::replace(child.as_mut(), Ast::Epsilon));
            }
        };
        match self {
            Ast::Literal(_) | Ast::Epsilon => {}
            Ast::Concat(left, right) | Ast::Or(left, right) => {
                detach(left);
                detach(right);
            }
            Ast::Repeat(inner) | Ast::Plus(inner) => detach(inner),
        }
    }

    fn is_atomic(&self) -> bool {
        matches!(
            self,
            Ast::Literal(_) | Ast::Epsilon | Ast::Repeat(_) | Ast::Plus(_)
        )
    }
}

// A long pattern folds into a chain one node deeper per character; tear it
// down with a work list so dropping never recurses.
impl Drop for Ast {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.detach_children(&mut pending);
        }
    }
}

/// Prints the tree in pattern syntax.
///
/// There is no escape syntax, so a `Literal` holding one of `(`, `)`, `|`,
/// `*`, `+` or `ε` prints as that operator and does not parse back to the
/// same tree.
impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ast::Literal(c) => write!(f, "{c}"),
            Ast::Epsilon => write!(f, "()"),
            Ast::Concat(left, right) => {
                for side in [left, right] {
                    if matches!(**side, Ast::Or(..)) {
                        write!(f, "({side})")?;
                    } else {
                        write!(f, "{side}")?;
                    }
                }
                Ok(())
            }
            Ast::Or(left, right) => write!(f, "{left}|{right}"),
            Ast::Repeat(inner) | Ast::Plus(inner) => {
                let op = if matches!(self, Ast::Repeat(_)) { '*' } else { '+' };
                if inner.is_atomic() {
                    write!(f, "{inner}{op}")
                } else {
                    write!(f, "({inner}){op}")
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_right() {
        let nodes = vec![Ast::Literal('a'), Ast::Literal('b'), Ast::Literal('c')];
        let folded = Ast::fold_right(nodes, Ast::or).unwrap();
        assert_eq!(
            folded,
            Ast::or(
                Ast::Literal('a'),
                Ast::or(Ast::Literal('b'), Ast::Literal('c'))
            )
        );
        assert_eq!(Ast::fold_right(Vec::new(), Ast::concat), None);
    }

    #[test]
    fn test_display_parenthesizes_by_precedence() {
        let ast = Ast::concat(
            Ast::repeat(Ast::concat(Ast::Literal('a'), Ast::Literal('b'))),
            Ast::or(Ast::Literal('c'), Ast::Epsilon),
        );
        assert_eq!(ast.to_string(), "(ab)*(c|())");
        assert_eq!(Ast::plus(Ast::repeat(Ast::Literal('x'))).to_string(), "x*+");
    }

    #[test]
    fn test_operator_literals_print_unescaped() {
        let ast = Ast::concat(Ast::Literal('a'), Ast::Literal('|'));
        assert_eq!(ast.to_string(), "a|");
        assert!(crate::regex::parse(&ast.to_string()).is_err());

        let star = Ast::repeat(Ast::Literal('*'));
        assert_eq!(star.to_string(), "**");
        assert!(crate::regex::parse(&star.to_string()).is_err());
    }

    #[test]
    fn test_dropping_a_long_chain() {
        let nodes = vec![Ast::Literal('a'); 1_000_000];
        let chain = Ast::fold_right(nodes, Ast::concat).unwrap();
        drop(chain);

        let mut nested = Ast::Literal('a');
        for _ in 0..1_000_000 {
            nested = Ast::repeat(nested);
        }
        drop(nested);
    }
}
