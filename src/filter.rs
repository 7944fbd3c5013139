//! Defines the dashboard filter state and the three views derived from
//! it.
//!
//! The filter functions are pure: they borrow the ledger slice, never
//! mutate it, and return freshly allocated vectors in the original
//! order. Callers sort for display.

use crate::transaction::{AnalyticsClass, Transaction};

/// The part of the year a view covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// A single zero-based month, between 0 (January) and 11 (December).
    Month(u8),
    /// The whole year.
    Year,
}

/// An optional restriction to a single named value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// No restriction.
    All,
    /// Only transactions with exactly this value.
    Only(String),
}

impl Selection {
    /// Whether `value` passes the selection.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }
}

/// Which analytics classes the period view includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalyticsFilter {
    /// Every class.
    #[default]
    All,
    /// Everything except transfers.
    ExcludeTransfers,
    /// Work income only.
    WorkOnly,
    /// Transfers only.
    TransfersOnly,
}

impl AnalyticsFilter {
    fn matches(&self, class: AnalyticsClass) -> bool {
        match self {
            AnalyticsFilter::All => true,
            AnalyticsFilter::ExcludeTransfers => class != AnalyticsClass::Transfer,
            AnalyticsFilter::WorkOnly => class == AnalyticsClass::Work,
            AnalyticsFilter::TransfersOnly => class == AnalyticsClass::Transfer,
        }
    }
}

/// The complete filter state of the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    /// The month or whole-year period within [FilterState::year].
    pub period: Period,
    /// The calendar year the dashboard shows.
    pub year: i32,
    /// Restricts views to a single account.
    pub account: Selection,
    /// Restricts the period and detail views to a single category.
    pub category: Selection,
    /// Restricts the period and detail views to a single event tag.
    pub event_tag: Selection,
    /// Restricts the period view to certain analytics classes.
    pub analytics: AnalyticsFilter,
}

impl FilterState {
    /// A filter showing the whole of `year` with no further
    /// restrictions.
    pub fn new(year: i32) -> Self {
        Self {
            period: Period::Year,
            year,
            account: Selection::All,
            category: Selection::All,
            event_tag: Selection::All,
            analytics: AnalyticsFilter::All,
        }
    }

    fn in_period(&self, transaction: &Transaction) -> bool {
        transaction.date.year() == self.year
            && match self.period {
                Period::Month(month) => transaction.month_index() == month,
                Period::Year => true,
            }
    }

    fn passes_selections(&self, transaction: &Transaction) -> bool {
        self.account.matches(&transaction.account)
            && self.category.matches(&transaction.category)
            && self.event_tag.matches(transaction.flag.trim())
    }
}

/// The transactions of the filter's year and account, regardless of
/// month or any other restriction.
///
/// Balance-style reports (current balance, the monthly balance table)
/// work from this view so that narrowing the month, category or
/// analytics class never changes them.
pub fn balance_view(transactions: &[Transaction], filter: &FilterState) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| {
            transaction.date.year() == filter.year && filter.account.matches(&transaction.account)
        })
        .cloned()
        .collect()
}

/// The transactions passing every restriction of the filter: period,
/// account, category, event tag and analytics class.
///
/// KPI totals and the transaction table work from this view.
pub fn period_view(transactions: &[Transaction], filter: &FilterState) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| {
            filter.in_period(transaction)
                && filter.passes_selections(transaction)
                && filter.analytics.matches(transaction.analytics)
        })
        .cloned()
        .collect()
}

/// Like [period_view] but without the analytics restriction.
///
/// Drill-down reports work from this view and decide per report which
/// analytics classes are relevant.
pub fn detail_view(transactions: &[Transaction], filter: &FilterState) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| {
            filter.in_period(transaction) && filter.passes_selections(transaction)
        })
        .cloned()
        .collect()
}
