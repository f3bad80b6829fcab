use dataset::Dataset;
use serde::Serialize;

/// The four card scalars, computed once at startup and never again for the
/// lifetime of the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_employees: usize,
    pub promoted: usize,
    pub kpi_met: usize,
    pub average_age: u32,
}

impl Summary {
    pub fn compute(dataset: &Dataset) -> Self {
        let total_employees = dataset.len();
        let promoted = dataset.iter().filter(|e| e.promoted.is_yes()).count();
        let kpi_met = dataset.iter().filter(|e| e.kpi_met.is_yes()).count();
        let average_age = if total_employees == 0 {
            0
        } else {
            let age_sum: u64 = dataset.iter().map(|e| u64::from(e.age)).sum();
            // The card shows the ceiling of the mean.
            (age_sum as f64 / total_employees as f64).ceil() as u32
        };
        Self {
            total_employees,
            promoted,
            kpi_met,
            average_age,
        }
    }
}
