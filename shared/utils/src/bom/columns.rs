//! Header-to-canonical column mapping.
//!
//! Source headers are free text ("Mfr Part #", "QTY.", "Ref Designators").
//! Each header is lowercased and checked against an ordered rule table; the
//! first rule whose needle occurs in the header decides the column, and the
//! first source column claiming a canonical column keeps it.

use std::collections::HashSet;

use super::table::ColumnLabel;

/// The four canonical BOM columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalColumn {
    Mpn,
    Quantity,
    RefDes,
    Description,
}

impl CanonicalColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mpn => "mpn",
            Self::Quantity => "quantity",
            Self::RefDes => "ref_des",
            Self::Description => "description",
        }
    }
}

/// Substring rule mapping a header to a canonical column.
#[derive(Debug, Clone, Copy)]
pub struct ColumnRule {
    pub needles: &'static [&'static str],
    pub target: CanonicalColumn,
}

impl ColumnRule {
    pub fn matches(&self, header_lower: &str) -> bool {
        self.needles.iter().any(|needle| header_lower.contains(needle))
    }
}

/// Evaluated in order, first match wins per header.
pub const COLUMN_RULES: &[ColumnRule] = &[
    ColumnRule {
        needles: &["mpn", "part"],
        target: CanonicalColumn::Mpn,
    },
    ColumnRule {
        needles: &["qty", "quantity"],
        target: CanonicalColumn::Quantity,
    },
    ColumnRule {
        needles: &["ref"],
        target: CanonicalColumn::RefDes,
    },
    ColumnRule {
        needles: &["desc"],
        target: CanonicalColumn::Description,
    },
];

/// Classify one header against [`COLUMN_RULES`].
pub fn classify_header(header: &str) -> Option<CanonicalColumn> {
    let lower = header.trim().to_lowercase();
    COLUMN_RULES
        .iter()
        .find(|rule| rule.matches(&lower))
        .map(|rule| rule.target)
}

/// Source column index chosen for each canonical column, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    pub mpn: Option<usize>,
    pub quantity: Option<usize>,
    pub ref_des: Option<usize>,
    pub description: Option<usize>,
}

impl ColumnMapping {
    pub fn from_labels(labels: &[ColumnLabel]) -> Self {
        let mut mapping = Self::default();
        let mut seen: HashSet<&str> = HashSet::new();

        for (idx, label) in labels.iter().enumerate() {
            let Some(name) = label.name() else {
                continue;
            };
            // Duplicate header names: only the first occurrence exists.
            if !seen.insert(name) {
                continue;
            }
            if let Some(column) = classify_header(name) {
                let slot = mapping.slot_mut(column);
                if slot.is_none() {
                    *slot = Some(idx);
                }
            }
        }

        mapping
    }

    pub fn from_names(names: &[String]) -> Self {
        let labels: Vec<ColumnLabel> = names.iter().cloned().map(ColumnLabel::Named).collect();
        Self::from_labels(&labels)
    }

    pub fn get(&self, column: CanonicalColumn) -> Option<usize> {
        match column {
            CanonicalColumn::Mpn => self.mpn,
            CanonicalColumn::Quantity => self.quantity,
            CanonicalColumn::RefDes => self.ref_des,
            CanonicalColumn::Description => self.description,
        }
    }

    fn slot_mut(&mut self, column: CanonicalColumn) -> &mut Option<usize> {
        match column {
            CanonicalColumn::Mpn => &mut self.mpn,
            CanonicalColumn::Quantity => &mut self.quantity,
            CanonicalColumn::RefDes => &mut self.ref_des,
            CanonicalColumn::Description => &mut self.description,
        }
    }
}
