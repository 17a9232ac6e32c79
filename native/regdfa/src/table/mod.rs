//! The semicolon-separated transition table shared by every stage.
//!
//! ```text
//! ;;F          <- finality marker per state column
//! ;q0;q1       <- state names, start state first
//! a;q1;        <- one row per symbol: destinations, comma separated
//! ```

mod codec;

pub use codec::{FINAL_MARKER, decode, encode_dfa, encode_nfa};

use std::fmt;

use csv::{ReaderBuilder, WriterBuilder};

use crate::error::MalformedTableError;

pub const CELL_SEPARATOR: u8 = b';';
pub const DESTINATION_SEPARATOR: char = ',';

/// A grid of cells. Row 0 holds finality markers, row 1 state names, and
/// every further row one input symbol.
///
/// The text form quotes cells the way CSV does, so any symbol label,
/// including `;`, `"`, blanks and line breaks, survives a round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Split `text` into rows and cells. Blank lines are skipped and cells
    /// are kept byte for byte. Structure is checked by [`decode`], not here.
    pub fn parse(text: &str) -> Result<Self, MalformedTableError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(CELL_SEPARATOR)
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());
        let rows = reader
            .records()
            .map(|record| {
                record
                    .map(|cells| cells.iter().map(str::to_owned).collect())
                    .map_err(|err| MalformedTableError::Unreadable(err.to_string()))
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// The cell at `(row, column)`; cells past the end of a row are empty.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map_or("", String::as_str)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut writer = WriterBuilder::new()
            .delimiter(CELL_SEPARATOR)
            .flexible(true)
            .from_writer(Vec::new());
        for row in &self.rows {
            writer.write_record(row).map_err(|_| fmt::Error)?;
        }
        let bytes = writer.into_inner().map_err(|_| fmt::Error)?;
        f.write_str(std::str::from_utf8(&bytes).map_err(|_| fmt::Error)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_render() {
        let text = ";;F\r\n;q0;q1\r\n\na;q1;\n";
        let table = Table::parse(text).unwrap();
        assert_eq!(table.rows().len(), 3);
        assert_eq!(table.cell(0, 2), "F");
        assert_eq!(table.cell(1, 1), "q0");
        assert_eq!(table.cell(2, 2), "");
        assert_eq!(table.cell(2, 9), "");
        assert_eq!(table.to_string(), ";;F\n;q0;q1\na;q1;\n");
    }

    #[test]
    fn test_cells_keep_blanks() {
        let table = Table::parse(" ;\tq1\t;q2\n").unwrap();
        assert_eq!(table.rows()[0], vec![" ", "\tq1\t", "q2"]);
    }

    #[test]
    fn test_separators_in_cells_are_quoted() {
        let rows = vec![
            vec![String::new(), "F".to_owned()],
            vec![";".to_owned(), "q0".to_owned()],
            vec!["\"".to_owned(), "a\nb".to_owned()],
        ];
        let table = Table::new(rows);
        let text = table.to_string();
        assert_eq!(text, ";F\n\";\";q0\n\"\"\"\";\"a\nb\"\n");
        assert_eq!(Table::parse(&text).unwrap(), table);
    }
}
