//! Operator-precedence parser for the supported pattern syntax.
//!
//! Postfix `*` and `+` bind tightest, then juxtaposition, then `|`. Both
//! concatenation and alternation nest to the right. `()` and `ε` denote the
//! empty string; every other character outside `()|*+` is a literal.
//!
//! Open groups live on an explicit stack, so deeply nested patterns are
//! bounded by [`Config::max_nesting_depth`] rather than the call stack.

use log::trace;

use crate::automaton::EPSILON_GLYPH;
use crate::config::Config;
use crate::error::{Error, Result, SyntaxError};
use crate::regex::ast::Ast;

/// Parse `pattern` with the default limits.
pub fn parse(pattern: &str) -> Result<Ast> {
    Parser::new(pattern, &Config::default()).parse()
}

/// A subtree together with how deeply groups and postfix operators nest in it.
type Node = (Ast, usize);

/// One group being parsed, or the whole pattern.
#[derive(Debug, Default)]
struct Group {
    /// Position of the opening `(`; `None` for the top level.
    open: Option<usize>,
    /// Finished alternatives, left to right.
    branches: Vec<Node>,
    /// Pieces of the alternative being read.
    parts: Vec<Node>,
    /// Position of the last `|` seen.
    last_bar: usize,
}

impl Group {
    fn opened_at(position: usize) -> Self {
        Self {
            open: Some(position),
            ..Self::default()
        }
    }

    fn concat(parts: Vec<Node>) -> Option<Node> {
        let height = parts.iter().map(|&(_, h)| h).max().unwrap_or(0);
        let nodes = parts.into_iter().map(|(ast, _)| ast).collect();
        Ast::fold_right(nodes, Ast::concat).map(|ast| (ast, height))
    }

    /// Close the current alternative at the `|` found at `bar`.
    fn split(&mut self, bar: usize) -> Result<()> {
        let parts = std::mem::take(&mut self.parts);
        let Some(branch) = Self::concat(parts) else {
            let position = if self.branches.is_empty() {
                bar
            } else {
                self.last_bar
            };
            return Err(SyntaxError::EmptyAlternative { position }.into());
        };
        self.branches.push(branch);
        self.last_bar = bar;
        Ok(())
    }

    /// The alternation of every branch, or `None` if the group is empty.
    fn finish(self) -> Result<Option<Node>> {
        let Group {
            mut branches,
            parts,
            last_bar,
            ..
        } = self;
        match Self::concat(parts) {
            Some(branch) => branches.push(branch),
            None if branches.is_empty() => return Ok(None),
            None => return Err(SyntaxError::EmptyAlternative { position: last_bar }.into()),
        }
        let height = branches.iter().map(|&(_, h)| h).max().unwrap_or(0);
        let nodes = branches.into_iter().map(|(ast, _)| ast).collect();
        Ok(Ast::fold_right(nodes, Ast::or).map(|ast| (ast, height)))
    }
}

pub struct Parser {
    chars: Vec<char>,
    pos: usize,
    max_depth: usize,
}

impl Parser {
    pub fn new(pattern: &str, config: &Config) -> Self {
        Self {
            chars: pattern.chars().collect(),
            pos: 0,
            max_depth: config.max_nesting_depth,
        }
    }

    pub fn parse(mut self) -> Result<Ast> {
        if self.chars.is_empty() {
            return Err(SyntaxError::EmptyPattern.into());
        }

        let mut enclosing: Vec<Group> = Vec::new();
        let mut current = Group::default();

        while let Some(c) = self.peek() {
            match c {
                '(' => {
                    self.check_depth(enclosing.len() + 1)?;
                    enclosing.push(std::mem::replace(
                        &mut current,
                        Group::opened_at(self.pos),
                    ));
                }
                ')' => {
                    let Some(outer) = enclosing.pop() else {
                        current.finish()?;
                        return Err(SyntaxError::UnexpectedParenthesis { position: self.pos }.into());
                    };
                    let (ast, height) = std::mem::replace(&mut current, outer)
                        .finish()?
                        .unwrap_or((Ast::Epsilon, 0));
                    current.parts.push((ast, height + 1));
                }
                '|' => current.split(self.pos)?,
                '*' | '+' => {
                    let (operand, height) =
                        current.parts.pop().ok_or(SyntaxError::MissingOperand {
                            operator: c,
                            position: self.pos,
                        })?;
                    self.check_depth(height + 1)?;
                    let node = if c == '*' {
                        Ast::repeat(operand)
                    } else {
                        Ast::plus(operand)
                    };
                    current.parts.push((node, height + 1));
                }
                _ => {
                    let node = if EPSILON_GLYPH.starts_with(c) {
                        Ast::Epsilon
                    } else {
                        Ast::Literal(c)
                    };
                    current.parts.push((node, 0));
                }
            }
            self.pos += 1;
        }

        let open = current.open;
        let root = current.finish()?;
        if let Some(position) = open {
            return Err(SyntaxError::UnclosedParenthesis { position }.into());
        }
        let (ast, height) = root.ok_or(SyntaxError::EmptyPattern)?;
        trace!("parsed {} characters, nesting {height}", self.chars.len());
        Ok(ast)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            return Err(Error::ResourceExhausted {
                what: "pattern nesting depth",
                limit: self.max_depth,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(c: char) -> Ast {
        Ast::Literal(c)
    }

    fn syntax_error(pattern: &str) -> SyntaxError {
        match parse(pattern) {
            Err(Error::Syntax(e)) => e,
            other => panic!("expected a syntax error for {pattern:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_literal_and_concat() {
        assert_eq!(parse("a").unwrap(), lit('a'));
        assert_eq!(
            parse("abc").unwrap(),
            Ast::concat(lit('a'), Ast::concat(lit('b'), lit('c')))
        );
    }

    #[test]
    fn test_alternation_is_right_associative() {
        assert_eq!(
            parse("a|b|c").unwrap(),
            Ast::or(lit('a'), Ast::or(lit('b'), lit('c')))
        );
    }

    #[test]
    fn test_postfix_binds_tighter_than_concat() {
        assert_eq!(
            parse("ab*").unwrap(),
            Ast::concat(lit('a'), Ast::repeat(lit('b')))
        );
        assert_eq!(
            parse("(ab)+").unwrap(),
            Ast::plus(Ast::concat(lit('a'), lit('b')))
        );
        assert_eq!(parse("a*+").unwrap(), Ast::plus(Ast::repeat(lit('a'))));
    }

    #[test]
    fn test_concat_binds_tighter_than_alternation() {
        assert_eq!(
            parse("ab|c*").unwrap(),
            Ast::or(Ast::concat(lit('a'), lit('b')), Ast::repeat(lit('c')))
        );
    }

    #[test]
    fn test_epsilon_forms() {
        assert_eq!(parse("()").unwrap(), Ast::Epsilon);
        assert_eq!(parse("ε").unwrap(), Ast::Epsilon);
        assert_eq!(parse("a|()").unwrap(), Ast::or(lit('a'), Ast::Epsilon));
    }

    #[test]
    fn test_unknown_characters_are_literals() {
        assert_eq!(
            parse("a.b").unwrap(),
            Ast::concat(lit('a'), Ast::concat(lit('.'), lit('b')))
        );
        assert_eq!(parse(" ").unwrap(), lit(' '));
    }

    #[test]
    fn test_syntax_errors() {
        assert_eq!(syntax_error(""), SyntaxError::EmptyPattern);
        assert_eq!(
            syntax_error("(ab"),
            SyntaxError::UnclosedParenthesis { position: 0 }
        );
        assert_eq!(
            syntax_error("a(b(c)"),
            SyntaxError::UnclosedParenthesis { position: 1 }
        );
        assert_eq!(
            syntax_error("ab)"),
            SyntaxError::UnexpectedParenthesis { position: 2 }
        );
        assert_eq!(
            syntax_error("*a"),
            SyntaxError::MissingOperand {
                operator: '*',
                position: 0
            }
        );
        assert_eq!(
            syntax_error("(+a)"),
            SyntaxError::MissingOperand {
                operator: '+',
                position: 1
            }
        );
        assert_eq!(
            syntax_error("a|*"),
            SyntaxError::MissingOperand {
                operator: '*',
                position: 2
            }
        );
        assert_eq!(syntax_error("a|"), SyntaxError::EmptyAlternative { position: 1 });
        assert_eq!(syntax_error("|a"), SyntaxError::EmptyAlternative { position: 0 });
        assert_eq!(
            syntax_error("(a||b)"),
            SyntaxError::EmptyAlternative { position: 2 }
        );
    }

    #[test]
    fn test_nesting_limit() {
        let config = Config::new().with_max_nesting_depth(3);
        assert!(Parser::new("((a))*", &config).parse().is_ok());
        assert_eq!(
            Parser::new("(((a)))*", &config).parse(),
            Err(Error::ResourceExhausted {
                what: "pattern nesting depth",
                limit: 3
            })
        );
        assert!(Parser::new("a****", &config).parse().is_err());
    }

    #[test]
    fn test_deep_groups_stay_off_the_call_stack() {
        let depth = 200_000;
        let pattern = format!("{}a{}", "(".repeat(depth), ")".repeat(depth));
        let config = Config::new().with_max_nesting_depth(depth);
        assert_eq!(Parser::new(&pattern, &config).parse().unwrap(), lit('a'));
        assert!(matches!(
            parse(&pattern),
            Err(Error::ResourceExhausted { .. })
        ));
    }

    #[test]
    fn test_unclosed_inner_group_reports_innermost() {
        assert_eq!(
            syntax_error("((a)(b"),
            SyntaxError::UnclosedParenthesis { position: 4 }
        );
        assert_eq!(
            syntax_error("(a|"),
            SyntaxError::EmptyAlternative { position: 2 }
        );
    }
}
