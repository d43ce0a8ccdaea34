//! Normalization of raw extracted tables into the canonical part schema.

use bomdiff_models::{CanonicalTable, PartRecord};

use super::cell::RawCell;
use super::columns::ColumnMapping;
use super::table::RawTable;

/// Normalize an arbitrary raw table into canonical part records.
///
/// Never fails: missing columns are synthesized as empty, unusable
/// quantities become `0`, and an empty input yields an empty table.
pub fn normalize(raw: &RawTable) -> CanonicalTable {
    if raw.is_empty() {
        return CanonicalTable::empty();
    }

    let mapping = ColumnMapping::from_labels(&raw.columns);
    tracing::debug!(?mapping, rows = raw.rows.len(), "Normalizing raw table");

    raw.rows
        .iter()
        .map(|row| PartRecord {
            mpn: project(row, mapping.mpn).trim().to_string(),
            quantity: parse_quantity(&project(row, mapping.quantity)),
            ref_des: project(row, mapping.ref_des),
            description: project(row, mapping.description),
        })
        .collect()
}

/// Cleaned cell at `column`, or `""` when the column was not mapped.
fn project(row: &[RawCell], column: Option<usize>) -> String {
    column
        .and_then(|idx| row.get(idx))
        .map(RawCell::clean)
        .unwrap_or_default()
}

/// Parse a cleaned quantity cell, truncating toward zero.
///
/// Anything that is not a finite, non-negative number coerces to `0`.
pub fn parse_quantity(value: &str) -> u64 {
    match value.trim().parse::<f64>() {
        Ok(number) if number.is_finite() && number > 0.0 => number.trunc() as u64,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_empty_table_normalizes_to_empty() {
        let table = normalize(&RawTable::empty());
        assert!(table.is_empty());
        assert_eq!(table.columns(), &CanonicalTable::COLUMNS);
    }

    #[test]
    fn test_columns_are_projected_in_fixed_order() {
        let raw = RawTable::with_header(
            header(&["Description", "Ref Des", "Qty", "Manufacturer", "MPN"]),
            vec![vec![
                "Resistor 10k".into(),
                "R1,R2".into(),
                RawCell::Float(2.0),
                "Yageo".into(),
                " RC0603 ".into(),
            ]],
        );

        let table = normalize(&raw);
        assert_eq!(
            table.rows,
            vec![PartRecord::new("RC0603", 2, "R1,R2", "Resistor 10k")]
        );
    }

    #[test]
    fn test_missing_columns_are_synthesized_empty() {
        let raw = RawTable::with_header(header(&["Part"]), vec![vec!["X1".into()]]);

        let table = normalize(&raw);
        assert_eq!(table.rows, vec![PartRecord::new("X1", 0, "", "")]);
    }

    #[test]
    fn test_headerless_rows_produce_blank_records() {
        let raw = RawTable::headerless(vec![vec!["X1".into(), "2".into()]]);

        let table = normalize(&raw);
        assert_eq!(table.rows, vec![PartRecord::default()]);
    }

    #[test]
    fn test_structured_cells_are_cleaned() {
        let raw = RawTable::with_header(
            header(&["MPN", "Qty", "RefDes"]),
            vec![vec![
                RawCell::Null,
                "N/A".into(),
                RawCell::Sequence(vec!["A".into(), "B".into()]),
            ]],
        );

        let table = normalize(&raw);
        assert_eq!(table.rows, vec![PartRecord::new("", 0, "A, B", "")]);
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("3"), 3);
        assert_eq!(parse_quantity("2.9"), 2);
        assert_eq!(parse_quantity(" 10 "), 10);
        assert_eq!(parse_quantity("1e2"), 100);
        assert_eq!(parse_quantity("N/A"), 0);
        assert_eq!(parse_quantity(""), 0);
        assert_eq!(parse_quantity("-4"), 0);
        assert_eq!(parse_quantity("NaN"), 0);
        assert_eq!(parse_quantity("inf"), 0);
    }
}
