//! Thompson construction: one ε-NFA fragment per AST node.

use crate::automaton::epsilon_nfa::EpsilonNFA;
use crate::automaton::state::StateId;
use crate::regex::Ast;
use log::debug;

/// The entry and exit state of a partially built automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fragment {
    entry: StateId,
    exit: StateId,
}

/// Builds an [`EpsilonNFA`] from a pattern AST.
///
/// States are named `q0`, `q1`, ... in creation order. The numbering belongs
/// to the builder, so separate builds never observe each other.
#[derive(Debug, Default)]
pub struct NfaBuilder {
    nfa: EpsilonNFA,
}

impl NfaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the automaton for `ast`. The result has exactly one start state
    /// and one final state.
    pub fn build(mut self, ast: &Ast) -> EpsilonNFA {
        let Fragment { entry, exit } = self.fragment(ast);
        self.nfa.add_start_state(entry);
        self.nfa.add_final_state(exit);
        debug!(
            "thompson construction: {} states, start {entry}, final {exit}",
            self.nfa.num_states()
        );
        self.nfa
    }

    fn new_state(&mut self) -> StateId {
        let name = format!("q{}", self.nfa.num_states());
        self.nfa.add_state(&name)
    }

    /// Build `root` bottom-up. Children are finished before their parent
    /// and left before right, so states are numbered exactly as a recursive
    /// build would number them, without using the call stack.
    fn fragment(&mut self, root: &Ast) -> Fragment {
        let mut tasks = vec![Task::Visit(root)];
        let mut built: Vec<Fragment> = Vec::new();

        while let Some(task) = tasks.pop() {
            match task {
                Task::Visit(node) => match node {
                    Ast::Literal(c) => {
                        let entry = self.new_state();
                        let exit = self.new_state();
                        let symbol = self.nfa.declare_char(*c);
                        self.nfa.add_transition(entry, symbol, exit);
                        built.push(Fragment { entry, exit });
                    }
                    Ast::Epsilon => {
                        let entry = self.new_state();
                        let exit = self.new_state();
                        self.nfa.add_epsilon_transition(entry, exit);
                        built.push(Fragment { entry, exit });
                    }
                    Ast::Concat(left, right) => {
                        tasks.push(Task::Combine(Op::Concat));
                        tasks.push(Task::Visit(right));
                        tasks.push(Task::Visit(left));
                    }
                    Ast::Or(left, right) => {
                        tasks.push(Task::Combine(Op::Or));
                        tasks.push(Task::Visit(right));
                        tasks.push(Task::Visit(left));
                    }
                    Ast::Repeat(inner) => {
                        tasks.push(Task::Combine(Op::Repeat));
                        tasks.push(Task::Visit(inner));
                    }
                    Ast::Plus(inner) => {
                        tasks.push(Task::Combine(Op::Plus));
                        tasks.push(Task::Visit(inner));
                    }
                },
                Task::Combine(op) => {
                    let fragment = self.combine(op, &mut built);
                    built.push(fragment);
                }
            }
        }

        pop_operand(&mut built)
    }

    fn combine(&mut self, op: Op, built: &mut Vec<Fragment>) -> Fragment {
        match op {
            Op::Concat => {
                let right = pop_operand(built);
                let left = pop_operand(built);
                self.nfa.add_epsilon_transition(left.exit, right.entry);
                Fragment {
                    entry: left.entry,
                    exit: right.exit,
                }
            }
            Op::Or => {
                let right = pop_operand(built);
                let left = pop_operand(built);
                let entry = self.new_state();
                let exit = self.new_state();
                self.nfa.add_epsilon_transition(entry, left.entry);
                self.nfa.add_epsilon_transition(left.exit, exit);
                self.nfa.add_epsilon_transition(entry, right.entry);
                self.nfa.add_epsilon_transition(right.exit, exit);
                Fragment { entry, exit }
            }
            Op::Repeat => {
                let body = pop_operand(built);
                let fragment = self.loop_around(body);
                self.nfa.add_epsilon_transition(fragment.entry, fragment.exit);
                fragment
            }
            Op::Plus => {
                let body = pop_operand(built);
                self.loop_around(body)
            }
        }
    }

    /// Wrap `body` in a fresh entry/exit pair with a back edge, shared by `*`
    /// and `+`.
    fn loop_around(&mut self, body: Fragment) -> Fragment {
        let entry = self.new_state();
        let exit = self.new_state();
        self.nfa.add_epsilon_transition(entry, body.entry);
        self.nfa.add_epsilon_transition(body.exit, body.entry);
        self.nfa.add_epsilon_transition(body.exit, exit);
        Fragment { entry, exit }
    }
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Concat,
    Or,
    Repeat,
    Plus,
}

enum Task<'a> {
    Visit(&'a Ast),
    Combine(Op),
}

fn pop_operand(built: &mut Vec<Fragment>) -> Fragment {
    // Every operator is combined only after its operands were pushed.
    built.pop().expect("operand fragment")
}
