use crate::error::{PipelineError, Result};
use crate::models::{NormalizedTable, OverallMetrics};

/// Compute whole-table totals and averages.
///
/// Clicks and impressions are summed; CTR and position are arithmetic means over all rows.
/// A table without rows has no defined mean and yields [`PipelineError::EmptyTable`].
pub fn compute_overall(table: &NormalizedTable) -> Result<OverallMetrics> {
    if table.rows.is_empty() {
        return Err(PipelineError::EmptyTable);
    }
    let n = table.rows.len() as f64;
    let (mut clicks, mut impressions, mut ctr, mut position) = (0u64, 0u64, 0.0f64, 0.0f64);
    for r in &table.rows {
        clicks = clicks.saturating_add(r.clicks);
        impressions = impressions.saturating_add(r.impressions);
        ctr += r.ctr;
        position += r.position;
    }
    Ok(OverallMetrics {
        total_clicks: clicks,
        total_impressions: impressions,
        average_ctr: ctr / n,
        average_position: position / n,
    })
}
