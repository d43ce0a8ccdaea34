//! Master/target BOM comparison.

use bomdiff_models::{
    AggregatedTable, ComparisonFlags, ComparisonRecord, ComparisonResult, ComparisonSummary,
    MultiTargetComparison, PartAttributes, TargetComparison,
};

/// Compare two aggregated BOMs keyed by `mpn`.
///
/// `details` lists parts present on both sides, then parts missing from the
/// target, then parts only in the target; each group is sorted by `mpn`.
pub fn compare(master: &AggregatedTable, target: &AggregatedTable) -> ComparisonResult {
    let mut common = Vec::new();
    let mut missing = Vec::new();
    let mut summary = ComparisonSummary {
        total_master_parts: master.len(),
        total_target_parts: target.len(),
        ..Default::default()
    };

    for m_row in master.rows() {
        let Some(t_row) = target.get(&m_row.mpn) else {
            missing.push(ComparisonRecord {
                mpn: m_row.mpn.clone(),
                master: Some(PartAttributes::from(m_row)),
                target: None,
                flags: ComparisonFlags::missing(),
            });
            continue;
        };

        let qty_mismatch = m_row.quantity != t_row.quantity;
        let desc_mismatch = m_row.description.trim() != t_row.description.trim();
        let refdes_mismatch = m_row.ref_des.trim() != t_row.ref_des.trim();

        summary.quantity_mismatch_count += usize::from(qty_mismatch);
        summary.description_mismatch_count += usize::from(desc_mismatch);
        summary.refdes_mismatch_count += usize::from(refdes_mismatch);

        common.push(ComparisonRecord {
            mpn: m_row.mpn.clone(),
            master: Some(PartAttributes::from(m_row)),
            target: Some(PartAttributes::from(t_row)),
            flags: ComparisonFlags::common(qty_mismatch, desc_mismatch, refdes_mismatch),
        });
    }

    let extra: Vec<ComparisonRecord> = target
        .rows()
        .iter()
        .filter(|t_row| master.get(&t_row.mpn).is_none())
        .map(|t_row| ComparisonRecord {
            mpn: t_row.mpn.clone(),
            master: None,
            target: Some(PartAttributes::from(t_row)),
            flags: ComparisonFlags::extra(),
        })
        .collect();

    summary.missing_parts_count = missing.len();
    summary.extra_parts_count = extra.len();

    tracing::debug!(
        common = common.len(),
        missing = missing.len(),
        extra = extra.len(),
        "Compared BOMs"
    );

    let mut details = common;
    details.extend(missing);
    details.extend(extra);

    ComparisonResult { summary, details }
}

/// Compare one master against each target independently.
///
/// Output order follows the iteration order of `targets`.
pub fn compare_many<'a, I, K>(master: &AggregatedTable, targets: I) -> MultiTargetComparison
where
    I: IntoIterator<Item = (K, &'a AggregatedTable)>,
    K: ToString,
{
    MultiTargetComparison {
        targets: targets
            .into_iter()
            .map(|(target_file_id, target)| TargetComparison {
                target_file_id: target_file_id.to_string(),
                comparison: compare(master, target),
            })
            .collect(),
    }
}
