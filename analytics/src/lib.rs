//! Pure aggregation over the loaded employee table.
//!
//! Everything here is a total function of `&Dataset`: the scalar card
//! summary, the per-category promotion breakdown, and the Plotly-compatible
//! chart figures the dashboard renders client-side.

pub mod breakdown;
pub mod category;
pub mod charts;
pub mod summary;

pub use breakdown::{BreakdownRow, promotion_breakdown};
pub use category::{Category, CategoryOption, ParseCategoryError};
pub use charts::{
    GROWTH_CUTOFF, employee_growth_figure, promotion_rate_figure, service_distribution_figure,
};
pub use summary::Summary;
