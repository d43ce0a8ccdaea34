//! # BOM Diff Domain Models
//!
//! Value types shared by the normalization pipeline and its consumers.
//!
//! ## Key Models
//!
//! - **PartRecord**: one normalized BOM line (`mpn`, `quantity`, `ref_des`, `description`)
//! - **CanonicalTable**: normalized rows straight out of a format extractor
//! - **AggregatedTable**: one row per part number, sorted by part number
//! - **ComparisonRecord**: per-part diff between a master and a target BOM
//! - **ComparisonResult** / **MultiTargetComparison**: serializable run results
//!
//! All models are plain data: constructed once, never mutated afterwards, and
//! round-trippable through `serde_json`.

pub mod part;
pub mod comparison;


pub use part::*;
pub use comparison::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_record_creation() {
        let record = PartRecord::new("R1", 2, "R1,R2", "Resistor");
        assert_eq!(record.mpn, "R1");
        assert_eq!(record.quantity, 2);
        assert_eq!(record.ref_des, "R1,R2");
    }

    #[test]
    fn test_multi_target_lookup() {
        let result = MultiTargetComparison {
            targets: vec![
                TargetComparison {
                    target_file_id: "a.csv".to_string(),
                    comparison: ComparisonResult::default(),
                },
                TargetComparison {
                    target_file_id: "b.pdf".to_string(),
                    comparison: ComparisonResult {
                        summary: ComparisonSummary {
                            total_master_parts: 3,
                            ..Default::default()
                        },
                        details: Vec::new(),
                    },
                },
            ],
        };

        assert_eq!(result.get("b.pdf").map(|c| c.summary.total_master_parts), Some(3));
        assert!(result.get("c.txt").is_none());
    }
}
