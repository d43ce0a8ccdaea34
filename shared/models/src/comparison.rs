//! Comparison result models.
//!
//! These are the persisted shapes of a BOM comparison run. Every field is a
//! JSON primitive or a nested object/array so results survive a
//! `serde_json` round trip unchanged.

use serde::{Deserialize, Serialize};

use crate::part::PartRecord;

/// Attributes of a part on one side of a comparison.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PartAttributes {
    pub quantity: u64,
    pub ref_des: String,
    pub description: String,
}

impl From<&PartRecord> for PartAttributes {
    fn from(record: &PartRecord) -> Self {
        Self {
            quantity: record.quantity,
            ref_des: record.ref_des.clone(),
            description: record.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonStatus {
    Match,
    Mismatch,
    Missing,
    Extra,
}

impl ComparisonStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Match => "match",
            Self::Mismatch => "mismatch",
            Self::Missing => "missing",
            Self::Extra => "extra",
        }
    }
}

impl std::fmt::Display for ComparisonStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-part difference flags.
///
/// The three field mismatch flags are only set for parts present on both
/// sides; `missing_in_target` and `extra_in_target` only for one-sided parts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComparisonFlags {
    pub quantity_mismatch: bool,
    pub description_mismatch: bool,
    pub refdes_mismatch: bool,
    pub missing_in_target: bool,
    pub extra_in_target: bool,
    pub status: ComparisonStatus,
}

impl ComparisonFlags {
    pub fn common(quantity_mismatch: bool, description_mismatch: bool, refdes_mismatch: bool) -> Self {
        let status = if quantity_mismatch || description_mismatch || refdes_mismatch {
            ComparisonStatus::Mismatch
        } else {
            ComparisonStatus::Match
        };

        Self {
            quantity_mismatch,
            description_mismatch,
            refdes_mismatch,
            missing_in_target: false,
            extra_in_target: false,
            status,
        }
    }

    pub fn missing() -> Self {
        Self {
            quantity_mismatch: false,
            description_mismatch: false,
            refdes_mismatch: false,
            missing_in_target: true,
            extra_in_target: false,
            status: ComparisonStatus::Missing,
        }
    }

    pub fn extra() -> Self {
        Self {
            quantity_mismatch: false,
            description_mismatch: false,
            refdes_mismatch: false,
            missing_in_target: false,
            extra_in_target: true,
            status: ComparisonStatus::Extra,
        }
    }

    /// True when both sides were present, i.e. the field flags carry meaning.
    pub fn is_common(&self) -> bool {
        matches!(self.status, ComparisonStatus::Match | ComparisonStatus::Mismatch)
    }
}

/// One row of a comparison, keyed by part number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComparisonRecord {
    pub mpn: String,
    pub master: Option<PartAttributes>,
    pub target: Option<PartAttributes>,
    pub flags: ComparisonFlags,
}

impl ComparisonRecord {
    pub fn status(&self) -> ComparisonStatus {
        self.flags.status
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComparisonSummary {
    pub total_master_parts: usize,
    pub total_target_parts: usize,
    pub missing_parts_count: usize,
    pub extra_parts_count: usize,
    pub quantity_mismatch_count: usize,
    pub description_mismatch_count: usize,
    pub refdes_mismatch_count: usize,
}

/// Result of comparing one master BOM against one target BOM.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComparisonResult {
    pub summary: ComparisonSummary,
    pub details: Vec<ComparisonRecord>,
}

impl ComparisonResult {
    pub fn records_with_status(&self, status: ComparisonStatus) -> impl Iterator<Item = &ComparisonRecord> {
        self.details.iter().filter(move |record| record.flags.status == status)
    }

    pub fn find(&self, mpn: &str) -> Option<&ComparisonRecord> {
        self.details.iter().find(|record| record.mpn == mpn)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetComparison {
    pub target_file_id: String,
    pub comparison: ComparisonResult,
}

/// Result of comparing one master BOM against several targets.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MultiTargetComparison {
    pub targets: Vec<TargetComparison>,
}

impl MultiTargetComparison {
    pub fn get(&self, target_file_id: &str) -> Option<&ComparisonResult> {
        self.targets
            .iter()
            .find(|target| target.target_file_id == target_file_id)
            .map(|target| &target.comparison)
    }
}
