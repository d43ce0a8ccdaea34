//! Row-oriented export of comparison results.
//!
//! Flattens each record's nested `master`/`target` attributes into plain
//! columns, one table per target, for spreadsheet-style consumers.

use std::collections::HashSet;
use std::io::Write;

use bomdiff_models::{ComparisonRecord, ComparisonResult, MultiTargetComparison};
use serde::{Deserialize, Serialize};

use crate::error::BomDiffResult;

/// Longest sheet name spreadsheet applications accept.
pub const MAX_SHEET_NAME_LEN: usize = 31;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatComparisonRow {
    pub mpn: String,
    pub status: String,
    pub quantity_mismatch: Option<bool>,
    pub description_mismatch: Option<bool>,
    pub refdes_mismatch: Option<bool>,
    pub master_qty: Option<u64>,
    pub master_ref_des: Option<String>,
    pub master_desc: Option<String>,
    pub target_qty: Option<u64>,
    pub target_ref_des: Option<String>,
    pub target_desc: Option<String>,
}

impl From<&ComparisonRecord> for FlatComparisonRow {
    fn from(record: &ComparisonRecord) -> Self {
        let field_flag = |flag: bool| record.flags.is_common().then_some(flag);
        let master = record.master.as_ref();
        let target = record.target.as_ref();

        Self {
            mpn: record.mpn.clone(),
            status: record.flags.status.to_string(),
            quantity_mismatch: field_flag(record.flags.quantity_mismatch),
            description_mismatch: field_flag(record.flags.description_mismatch),
            refdes_mismatch: field_flag(record.flags.refdes_mismatch),
            master_qty: master.map(|m| m.quantity),
            master_ref_des: master.map(|m| m.ref_des.clone()),
            master_desc: master.map(|m| m.description.clone()),
            target_qty: target.map(|t| t.quantity),
            target_ref_des: target.map(|t| t.ref_des.clone()),
            target_desc: target.map(|t| t.description.clone()),
        }
    }
}

pub fn flatten(result: &ComparisonResult) -> Vec<FlatComparisonRow> {
    result.details.iter().map(FlatComparisonRow::from).collect()
}

/// Sheet (or file stem) name for a target, `target_<id>` capped at 31 chars.
///
/// Characters spreadsheets and file systems reject become `_`.
pub fn sheet_name(target_file_id: &str) -> String {
    format!("target_{}", target_file_id)
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '[' | ']' => '_',
            c => c,
        })
        .take(MAX_SHEET_NAME_LEN)
        .collect()
}

/// Sheet names for several targets, in order, with no two alike.
///
/// A name already taken gets a `~N` suffix, shortening the stem so the
/// result still fits in 31 chars.
pub fn sheet_names<'a, I>(target_file_ids: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut taken = HashSet::new();

    target_file_ids
        .into_iter()
        .map(|id| {
            let base = sheet_name(id);
            let mut name = base.clone();
            let mut n = 2;
            while taken.contains(&name) {
                let suffix = format!("~{}", n);
                let stem: String = base.chars().take(MAX_SHEET_NAME_LEN - suffix.len()).collect();
                name = stem + &suffix;
                n += 1;
            }
            taken.insert(name.clone());
            name
        })
        .collect()
}

/// Write one comparison's flat rows as CSV with a header line.
pub fn write_csv<W: Write>(result: &ComparisonResult, writer: W) -> BomDiffResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let rows = flatten(result);

    if rows.is_empty() {
        csv_writer.write_record(FLAT_COLUMNS)?;
    }
    for row in &rows {
        csv_writer.serialize(row)?;
    }
    csv_writer
        .flush()
        .map_err(|e| crate::error::BomDiffError::export(e.to_string()))?;
    Ok(())
}

/// Flat sheets for every target, in result order, under distinct names.
pub fn flatten_all(result: &MultiTargetComparison) -> Vec<(String, Vec<FlatComparisonRow>)> {
    let names = sheet_names(result.targets.iter().map(|t| t.target_file_id.as_str()));

    names
        .into_iter()
        .zip(&result.targets)
        .map(|(name, target)| (name, flatten(&target.comparison)))
        .collect()
}

const FLAT_COLUMNS: [&str; 11] = [
    "mpn",
    "status",
    "quantity_mismatch",
    "description_mismatch",
    "refdes_mismatch",
    "master_qty",
    "master_ref_des",
    "master_desc",
    "target_qty",
    "target_ref_des",
    "target_desc",
];
