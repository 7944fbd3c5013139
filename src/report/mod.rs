//! Reduces transaction lists into the summaries shown on the
//! dashboard: KPI totals, the expense breakdown, the monthly balance
//! table, drill-down hierarchies and tag summaries.
//!
//! Every function here is a pure, single-pass reduction. Empty input
//! yields zero-valued or empty aggregates, never an error.

mod category;
mod hierarchy;
mod kpi;
mod monthly;
mod tags;

pub use category::{CategoryTotal, ExpenseBreakdown, SubcategoryTotal};
pub use hierarchy::{CategoryNode, KpiKind, MonthNode, MonthlyHierarchy, SubcategoryNode};
pub use kpi::KpiTotals;
pub use monthly::{MonthRow, MonthlyBalanceTable};
pub use tags::{TagTotal, tag_detail, tag_summary};

/// The subcategory bucket for transactions without one.
pub(crate) const OTHER_SUBCATEGORY: &str = "Other";
