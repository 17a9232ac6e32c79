use crate::automaton::{DFA, EPSILON, EPSILON_GLYPH, EpsilonNFA, StateId};
use crate::error::MalformedTableError;
use crate::table::{DESTINATION_SEPARATOR, Table};
use log::debug;

/// Marks a final state in row 0.
pub const FINAL_MARKER: &str = "F";

const FINALITY_ROW: usize = 0;
const NAME_ROW: usize = 1;
const FIRST_SYMBOL_ROW: usize = 2;

/// Read an automaton out of a table.
///
/// The first state column is the start state. Symbol rows may be shorter
/// than the header (missing cells mean no transition); repeated symbol rows
/// add to each other. A row labelled `ε` holds epsilon transitions.
pub fn decode(table: &Table) -> Result<EpsilonNFA, MalformedTableError> {
    let rows = table.rows();
    if rows.len() < FIRST_SYMBOL_ROW {
        return Err(MalformedTableError::MissingHeader);
    }

    let width = rows[NAME_ROW].len();
    if width < 2 {
        return Err(MalformedTableError::NoStates);
    }
    if rows[FINALITY_ROW].len() != width {
        return Err(MalformedTableError::ColumnMismatch {
            row: FINALITY_ROW,
            expected: width,
            found: rows[FINALITY_ROW].len(),
        });
    }

    let mut nfa = EpsilonNFA::new();
    for column in 1..width {
        let name = table.cell(NAME_ROW, column);
        if name.is_empty() {
            return Err(MalformedTableError::EmptyStateName { column });
        }
        if nfa.state_id(name).is_some() {
            return Err(MalformedTableError::DuplicateState {
                name: name.to_owned(),
            });
        }
        let state = nfa.add_state(name);

        match table.cell(FINALITY_ROW, column) {
            FINAL_MARKER => nfa.add_final_state(state),
            "" => {}
            marker => {
                return Err(MalformedTableError::InvalidFinalMarker {
                    column,
                    marker: marker.to_owned(),
                });
            }
        }
    }
    nfa.add_start_state(0);

    for (row, cells) in rows.iter().enumerate().skip(FIRST_SYMBOL_ROW) {
        if cells.len() > width {
            return Err(MalformedTableError::ColumnMismatch {
                row,
                expected: width,
                found: cells.len(),
            });
        }
        let label = table.cell(row, 0);
        if label.is_empty() {
            return Err(MalformedTableError::EmptySymbol { row });
        }
        let symbol = nfa.declare_symbol(label);

        for column in 1..width {
            let source = (column - 1) as StateId;
            let destinations = table
                .cell(row, column)
                .split(DESTINATION_SEPARATOR)
                .map(str::trim)
                .filter(|name| !name.is_empty());
            for name in destinations {
                let destination =
                    nfa.state_id(name)
                        .ok_or_else(|| MalformedTableError::UndeclaredState {
                            row,
                            name: name.to_owned(),
                        })?;
                nfa.add_transition(source, symbol, destination);
            }
        }
    }

    debug!(
        "decoded table: {} states, {} symbols",
        nfa.num_states(),
        nfa.symbols().len()
    );
    Ok(nfa)
}

/// Write an NFA as a table: the start state first, then the rest in id
/// order; symbol rows sorted by label, with an `ε` row when the automaton
/// has epsilon transitions.
pub fn encode_nfa(nfa: &EpsilonNFA) -> Table {
    let start = nfa.start_states().iter().next();
    let columns: Vec<StateId> = start
        .into_iter()
        .chain((0..nfa.num_states()).filter(|&s| Some(s) != start))
        .collect();

    let mut symbols: Vec<_> = nfa.symbols().iter().collect();
    if nfa.has_epsilon_transitions() {
        symbols.push((EPSILON, EPSILON_GLYPH));
    }
    symbols.sort_by(|a, b| a.1.cmp(b.1));

    let name = |state: StateId| nfa.state_name(state).unwrap_or_default().to_owned();
    let mut rows = header(
        columns.iter().map(|&s| nfa.is_final(s)),
        columns.iter().map(|&s| name(s)),
    );
    for (symbol, label) in symbols {
        let mut row = vec![label.to_owned()];
        for &state in &columns {
            let cell = nfa
                .successors(state, symbol)
                .map(|dests| {
                    dests
                        .iter()
                        .map(|&dest| name(dest))
                        .collect::<Vec<_>>()
                        .join(&DESTINATION_SEPARATOR.to_string())
                })
                .unwrap_or_default();
            row.push(cell);
        }
        rows.push(row);
    }
    Table::new(rows)
}

/// Write a DFA as a table: states in id order (`S0` first), symbol rows in
/// alphabet order.
pub fn encode_dfa(dfa: &DFA) -> Table {
    let columns = 0..dfa.num_states();
    let mut rows = header(
        columns.clone().map(|s| dfa.is_final(s)),
        columns.clone().map(|s| dfa.state_name(s)),
    );
    for (symbol, label) in dfa.symbols().iter() {
        let mut row = vec![label.to_owned()];
        row.extend(columns.clone().map(|state| {
            dfa.transition(state, symbol)
                .map(|dest| dfa.state_name(dest))
                .unwrap_or_default()
        }));
        rows.push(row);
    }
    Table::new(rows)
}

fn header(
    finals: impl Iterator<Item = bool>,
    names: impl Iterator<Item = String>,
) -> Vec<Vec<String>> {
    let markers = finals.map(|is_final| {
        if is_final {
            FINAL_MARKER.to_owned()
        } else {
            String::new()
        }
    });
    vec![
        std::iter::once(String::new()).chain(markers).collect(),
        std::iter::once(String::new()).chain(names).collect(),
    ]
}
