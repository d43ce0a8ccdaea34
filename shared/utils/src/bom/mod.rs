//! BOM (Bill of Materials) Comparison Module
//!
//! Normalizes BOM files of several formats into canonical part tables,
//! aggregates duplicate part numbers and diffs a master BOM against targets.
//!
//! Pipeline: bytes → [`BomParser`] → [`RawTable`] → [`normalize`] →
//! [`aggregate`] → [`compare`] / [`compare_many`].

pub mod cell;
pub mod table;
pub mod columns;
pub mod normalizer;
pub mod docx;
pub mod parser;
pub mod aggregator;
pub mod comparator;
pub mod export;

pub use cell::RawCell;
pub use table::{ColumnLabel, RawTable};
pub use columns::{classify_header, CanonicalColumn, ColumnMapping, ColumnRule, COLUMN_RULES};
pub use normalizer::{normalize, parse_quantity};
pub use parser::{BomFormat, BomParser};
pub use aggregator::aggregate;
pub use comparator::{compare, compare_many};
pub use export::{flatten, flatten_all, sheet_name, sheet_names, write_csv, FlatComparisonRow};

use bomdiff_models::AggregatedTable;

/// Parse and aggregate one BOM file in a single step.
pub fn load_bom(parser: &BomParser, data: &[u8], format: BomFormat) -> AggregatedTable {
    aggregate(&parser.parse_bytes(data, format))
}
