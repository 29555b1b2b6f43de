//! Dashboard module
//!
//! Provides an overview page with a pivot table of transaction amounts summed by group,
//! category and month.

mod handlers;
mod pivot;
mod tables;
mod transaction;

pub use handlers::get_dashboard_page;
pub use pivot::{
    Month, MonthKey, Pivot, PivotTable, PivotTransaction, UNKNOWN_CATEGORY, UNKNOWN_GROUP,
    build_pivot,
};
