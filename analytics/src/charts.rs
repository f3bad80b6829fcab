//! Plotly-compatible figure construction. Figures are plain JSON values
//! (`{ "data": [...], "layout": {...} }`) rendered client-side.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use dataset::{Dataset, Flag};
use serde_json::{Value, json};

use crate::{Category, promotion_breakdown};

/// Hires before this date are excluded from the growth chart.
pub const GROWTH_CUTOFF: NaiveDate = match NaiveDate::from_ymd_opt(2020, 9, 1) {
    Some(date) => date,
    None => unreachable!(),
};

/// Box plot of length-of-service per department, split by promotion outcome.
pub fn service_distribution_figure(dataset: &Dataset) -> Value {
    let traces: Vec<Value> = [(Flag::Yes, "tomato"), (Flag::No, "darkslateblue")]
        .into_iter()
        .map(|(outcome, color)| {
            let mut departments = Vec::new();
            let mut tenures = Vec::new();
            for employee in dataset.iter().filter(|e| e.promoted == outcome) {
                departments.push(employee.department.clone());
                tenures.push(employee.length_of_service);
            }
            json!({
                "type": "box",
                "name": outcome.as_str(),
                "x": departments,
                "y": tenures,
                "marker": { "color": color },
            })
        })
        .collect();
    json!({
        "data": traces,
        "layout": {
            "title": { "text": "Length of Service Distribution" },
            "boxmode": "group",
            "xaxis": { "title": { "text": "Department" } },
            "yaxis": { "title": { "text": "Length of Service (years)" } },
            "legend": { "title": { "text": "Is Promoted?" } },
        },
    })
}

/// Line chart of hires per join date, on or after [`GROWTH_CUTOFF`].
pub fn employee_growth_figure(dataset: &Dataset) -> Value {
    let mut hires_per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for employee in dataset.iter().filter(|e| e.join_date >= GROWTH_CUTOFF) {
        *hires_per_day.entry(employee.join_date).or_default() += 1;
    }
    let dates: Vec<String> = hires_per_day
        .keys()
        .map(|date| date.format("%Y-%m-%d").to_string())
        .collect();
    let counts: Vec<usize> = hires_per_day.values().copied().collect();
    json!({
        "data": [{
            "type": "scatter",
            "mode": "lines+markers",
            "x": dates,
            "y": counts,
        }],
        "layout": {
            "xaxis": { "title": { "text": "Join date" } },
            "yaxis": { "title": { "text": "Number of employee" } },
        },
    })
}

/// Bar chart of the promotion breakdown for the selected category.
pub fn promotion_rate_figure(dataset: &Dataset, category: Category) -> Value {
    let rows = promotion_breakdown(dataset, category);
    let labels: Vec<&str> = rows.iter().map(|row| row.label.as_str()).collect();
    let percentages: Vec<f64> = rows.iter().map(|row| row.percentage).collect();
    json!({
        "data": [{
            "type": "bar",
            "x": labels,
            "y": percentages,
        }],
        "layout": {
            "xaxis": { "title": { "text": category.label() } },
            "yaxis": { "title": { "text": "Percentage" } },
        },
    })
}
