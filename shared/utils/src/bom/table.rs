//! Raw tabular extraction result, before normalization.

use super::cell::RawCell;
use super::columns::ColumnMapping;

/// Column label of a raw table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnLabel {
    /// Header text from the source document.
    Named(String),
    /// Index of a column in a headerless table; never matches a column rule.
    Positional(usize),
}

impl ColumnLabel {
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Positional(_) => None,
        }
    }
}

/// Rows and column labels as produced by a format extractor.
///
/// Every row has exactly `columns.len()` cells; constructors pad short rows
/// with [`RawCell::Null`] and drop cells past the last column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub columns: Vec<ColumnLabel>,
    pub rows: Vec<Vec<RawCell>>,
}

impl RawTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Table whose first row supplies the column names.
    pub fn with_header(header: Vec<String>, rows: Vec<Vec<RawCell>>) -> Self {
        let columns: Vec<ColumnLabel> = header.into_iter().map(ColumnLabel::Named).collect();
        let width = columns.len();

        Self {
            columns,
            rows: rows.into_iter().map(|row| fit_row(row, width)).collect(),
        }
    }

    /// Table without header names; width is the longest row.
    pub fn headerless(rows: Vec<Vec<RawCell>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);

        Self {
            columns: (0..width).map(ColumnLabel::Positional).collect(),
            rows: rows.into_iter().map(|row| fit_row(row, width)).collect(),
        }
    }

    /// Headerless table whose first row is promoted to a header when it
    /// names both a part-number column and a quantity column.
    pub fn headerless_detect(rows: Vec<Vec<RawCell>>) -> Self {
        let looks_like_header = rows.first().is_some_and(|first| {
            let names: Vec<String> = first.iter().map(RawCell::clean).collect();
            let mapping = ColumnMapping::from_names(&names);
            mapping.mpn.is_some() && mapping.quantity.is_some()
        });

        if looks_like_header {
            let mut rows = rows.into_iter();
            let header = rows
                .next()
                .map(|first| first.iter().map(RawCell::clean).collect())
                .unwrap_or_default();
            Self::with_header(header, rows.collect())
        } else {
            Self::headerless(rows)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }
}

fn fit_row(mut row: Vec<RawCell>, width: usize) -> Vec<RawCell> {
    row.resize(width, RawCell::Null);
    row
}

/// Whitespace-split a line into text cells.
pub(crate) fn split_whitespace_row(line: &str) -> Vec<RawCell> {
    line.split_whitespace().map(RawCell::from).collect()
}
