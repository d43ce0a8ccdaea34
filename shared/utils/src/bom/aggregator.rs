//! Collapse a canonical table to one row per part number.

use std::collections::{BTreeMap, BTreeSet};

use bomdiff_models::{AggregatedTable, CanonicalTable, PartRecord};

/// Accumulator for one part number group.
#[derive(Debug, Default)]
struct PartGroup<'a> {
    quantity: u64,
    ref_des: BTreeSet<&'a str>,
    description: Option<&'a str>,
}

/// Group rows by `mpn`.
///
/// Quantities are summed, each row's whole `ref_des` string is one member of
/// a sorted, de-duplicated set joined with `", "`, and the description of the
/// first row in input order is kept. Output is sorted by `mpn`.
pub fn aggregate(table: &CanonicalTable) -> AggregatedTable {
    let mut groups: BTreeMap<&str, PartGroup<'_>> = BTreeMap::new();

    for row in table.iter() {
        let group = groups.entry(row.mpn.as_str()).or_default();
        group.quantity = group.quantity.saturating_add(row.quantity);
        if !row.ref_des.is_empty() {
            group.ref_des.insert(row.ref_des.as_str());
        }
        group.description.get_or_insert(row.description.as_str());
    }

    let rows: Vec<PartRecord> = groups
        .into_iter()
        .map(|(mpn, group)| PartRecord {
            mpn: mpn.to_string(),
            quantity: group.quantity,
            ref_des: group.ref_des.into_iter().collect::<Vec<_>>().join(", "),
            description: group.description.unwrap_or_default().to_string(),
        })
        .collect();

    tracing::debug!(input_rows = table.len(), parts = rows.len(), "Aggregated BOM");
    AggregatedTable::from_sorted_unique(rows)
}
