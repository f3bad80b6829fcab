use std::collections::BTreeMap;

use dataset::Dataset;
use serde::Serialize;

use crate::Category;

/// One bar of the ranking chart: a category value and the fraction of the
/// promoted population carrying it, rounded to two decimals.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BreakdownRow {
    pub label: String,
    pub percentage: f64,
}

/// Percentage distribution of the chosen category among promoted employees,
/// sorted descending. Recomputed from the full table on every call; at this
/// data scale there is nothing worth caching.
pub fn promotion_breakdown(dataset: &Dataset, category: Category) -> Vec<BreakdownRow> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    let mut promoted_total = 0usize;
    for employee in dataset.iter().filter(|e| e.promoted.is_yes()) {
        promoted_total += 1;
        *counts.entry(category.value_of(employee)).or_default() += 1;
    }
    if promoted_total == 0 {
        return Vec::new();
    }
    let mut rows: Vec<BreakdownRow> = counts
        .into_iter()
        .map(|(label, count)| BreakdownRow {
            label: label.to_string(),
            percentage: (count as f64 / promoted_total as f64 * 100.0).round() / 100.0,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.percentage
            .total_cmp(&a.percentage)
            .then_with(|| a.label.cmp(&b.label))
    });
    rows
}
