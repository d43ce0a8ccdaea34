//! Part record models for normalized bills of materials.
//!
//! A `CanonicalTable` is what every format extractor is reduced to; an
//! `AggregatedTable` is the same schema with one row per part number.

use serde::{Deserialize, Serialize};

/// One normalized BOM line.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PartRecord {
    /// Manufacturer part number; empty when the source had none.
    pub mpn: String,
    pub quantity: u64,
    pub ref_des: String,
    pub description: String,
}

impl PartRecord {
    pub fn new(
        mpn: impl Into<String>,
        quantity: u64,
        ref_des: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            mpn: mpn.into(),
            quantity,
            ref_des: ref_des.into(),
            description: description.into(),
        }
    }
}

/// Canonical four-column part table produced by normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CanonicalTable {
    pub rows: Vec<PartRecord>,
}

impl CanonicalTable {
    /// Fixed output column order.
    pub const COLUMNS: [&'static str; 4] = ["mpn", "quantity", "ref_des", "description"];

    pub fn new(rows: Vec<PartRecord>) -> Self {
        Self { rows }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> &'static [&'static str; 4] {
        &Self::COLUMNS
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PartRecord> {
        self.rows.iter()
    }
}

impl FromIterator<PartRecord> for CanonicalTable {
    fn from_iter<I: IntoIterator<Item = PartRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Canonical table with at most one row per `mpn`, sorted by `mpn`.
///
/// Only the aggregator constructs these through [`AggregatedTable::from_sorted_unique`];
/// deserialization is not offered so the uniqueness guarantee cannot be bypassed.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct AggregatedTable {
    rows: Vec<PartRecord>,
}

impl AggregatedTable {
    /// Caller guarantees `rows` is sorted by `mpn` with no duplicates.
    pub fn from_sorted_unique(rows: Vec<PartRecord>) -> Self {
        debug_assert!(rows.windows(2).all(|w| w[0].mpn < w[1].mpn));
        Self { rows }
    }

    pub fn rows(&self) -> &[PartRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Binary search by part number.
    pub fn get(&self, mpn: &str) -> Option<&PartRecord> {
        self.rows
            .binary_search_by(|row| row.mpn.as_str().cmp(mpn))
            .ok()
            .map(|idx| &self.rows[idx])
    }

    pub fn mpns(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.mpn.as_str())
    }
}

impl From<AggregatedTable> for CanonicalTable {
    fn from(table: AggregatedTable) -> Self {
        CanonicalTable::new(table.rows)
    }
}
