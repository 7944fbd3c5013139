//! The month, category, subcategory drill-down behind the expense,
//! income and work KPIs.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::{
    report::OTHER_SUBCATEGORY,
    transaction::{AnalyticsClass, Transaction},
};

/// Which KPI the drill-down was opened from.
///
/// Each kind selects a disjoint slice of the ledger and fixes the sign
/// convention of the amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KpiKind {
    /// Ordinary spending: transfers and work excluded, negative values
    /// only, reported as positive magnitudes.
    Expense,
    /// Ordinary income: transfers and work excluded, positive values
    /// only.
    Income,
    /// Work money, kept signed so repayments show as negative.
    Work,
}

impl KpiKind {
    /// The amount a transaction contributes under this kind, or `None`
    /// when the transaction is not selected.
    fn amount(&self, transaction: &Transaction) -> Option<Decimal> {
        if transaction.analytics == AnalyticsClass::Transfer {
            return None;
        }

        let value = transaction.value_chf;
        match self {
            KpiKind::Expense => (transaction.analytics != AnalyticsClass::Work
                && value < Decimal::ZERO)
                .then(|| value.abs()),
            KpiKind::Income => (transaction.analytics != AnalyticsClass::Work
                && value > Decimal::ZERO)
                .then_some(value),
            KpiKind::Work => (transaction.analytics == AnalyticsClass::Work).then_some(value),
        }
    }
}

/// The amounts of one subcategory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubcategoryNode {
    /// The subcategory name, or "Other" for the unset bucket.
    pub name: String,
    /// The summed amount.
    pub value: Decimal,
}

/// One category of a month, with its subcategories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryNode {
    /// The category name.
    pub name: String,
    /// The sum of the subcategory values.
    pub total: Decimal,
    /// The subcategories, sorted by absolute value descending.
    pub subcategories: Vec<SubcategoryNode>,
}

/// One calendar month of the drill-down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthNode {
    /// The zero-based month, between 0 (January) and 11 (December).
    pub month: u8,
    /// The sum of the category totals.
    pub total: Decimal,
    /// The categories, sorted by absolute total descending.
    pub categories: Vec<CategoryNode>,
}

/// The full drill-down for one KPI: months in calendar order, plus the
/// flat per-category totals and the twelve-month trend that feed the
/// charts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyHierarchy {
    /// Months with at least one selected transaction, in calendar
    /// order.
    pub months: Vec<MonthNode>,
    /// Absolute amount per category across the whole input, sorted
    /// descending.
    pub category_totals: Vec<(String, Decimal)>,
    /// The summed amount per calendar month, index 0 being January.
    pub monthly_trend: [Decimal; 12],
}

impl MonthlyHierarchy {
    /// Computes the drill-down from the detail view.
    ///
    /// Every node's total is the sum of its children, never recomputed
    /// from the raw input, so the levels always agree.
    pub fn compute(transactions: &[Transaction], kind: KpiKind) -> Self {
        let mut tree: HashMap<u8, HashMap<&str, HashMap<&str, Decimal>>> = HashMap::new();
        let mut category_totals: HashMap<&str, Decimal> = HashMap::new();
        let mut monthly_trend = [Decimal::ZERO; 12];

        for transaction in transactions {
            let Some(amount) = kind.amount(transaction) else {
                continue;
            };

            let month = transaction.month_index();
            let subcategory = if transaction.subcategory.is_empty() {
                OTHER_SUBCATEGORY
            } else {
                &transaction.subcategory
            };

            *tree.entry(month)
                .or_default()
                .entry(&transaction.category)
                .or_default()
                .entry(subcategory)
                .or_default() += amount;
            *category_totals.entry(&transaction.category).or_default() += amount.abs();
            monthly_trend[month as usize] += amount;
        }

        let mut months: Vec<MonthNode> = tree
            .into_iter()
            .map(|(month, categories)| {
                let categories = collect_categories(categories);
                let total = categories.iter().map(|category| category.total).sum();

                MonthNode {
                    month,
                    total,
                    categories,
                }
            })
            .collect();
        months.sort_by_key(|node| node.month);

        let mut category_totals: Vec<(String, Decimal)> = category_totals
            .into_iter()
            .map(|(name, total)| (name.to_string(), total))
            .collect();
        category_totals.sort_by(|a, b| b.1.cmp(&a.1));

        Self {
            months,
            category_totals,
            monthly_trend,
        }
    }
}

fn collect_categories(categories: HashMap<&str, HashMap<&str, Decimal>>) -> Vec<CategoryNode> {
    let mut nodes: Vec<CategoryNode> = categories
        .into_iter()
        .map(|(name, subcategories)| {
            let mut subcategories: Vec<SubcategoryNode> = subcategories
                .into_iter()
                .map(|(name, value)| SubcategoryNode {
                    name: name.to_string(),
                    value,
                })
                .collect();
            subcategories.sort_by(|a, b| b.value.abs().cmp(&a.value.abs()));

            let total = subcategories
                .iter()
                .map(|subcategory| subcategory.value)
                .sum();

            CategoryNode {
                name: name.to_string(),
                total,
                subcategories,
            }
        })
        .collect();
    nodes.sort_by(|a, b| b.total.abs().cmp(&a.total.abs()));

    nodes
}
