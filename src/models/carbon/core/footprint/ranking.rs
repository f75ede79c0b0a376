use super::SectorContribution;

/// Number of sectors listed in top-emitter style summaries.
pub(super) const SUMMARY_LEN: usize = 5;

/// Sector indices ordered by descending value, ties by ascending index.
pub(super) fn rank_descending(values: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]).then(a.cmp(&b)));
    order
}

/// The `count` largest values with their share of the positive total.
pub(super) fn top_contributors(values: &[f64], count: usize) -> Vec<SectorContribution> {
    let total: f64 = values.iter().sum();

    rank_descending(values)
        .into_iter()
        .take(count)
        .map(|sector| SectorContribution {
            sector,
            value: values[sector],
            share: share_of(values[sector], total),
        })
        .collect()
}

/// `value / total`, or `0` when the total is not positive.
pub(super) fn share_of(value: f64, total: f64) -> f64 {
    if total > 0.0 { value / total } else { 0.0 }
}
