//! The expense breakdown: spending per category and subcategory, with
//! each category's share of total spending.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::{
    report::OTHER_SUBCATEGORY,
    transaction::{AnalyticsClass, Transaction},
};

/// Spending within one subcategory, as a positive magnitude.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubcategoryTotal {
    /// The subcategory name, or "Other" for the unset bucket.
    pub name: String,
    /// The absolute amount spent.
    pub total: Decimal,
}

/// Spending within one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    /// The category name.
    pub name: String,
    /// The absolute amount spent across all subcategories.
    pub total: Decimal,
    /// The category's share of total spending, in percent rounded to
    /// one decimal place.
    pub share: Decimal,
    /// The subcategories, sorted by total descending.
    pub subcategories: Vec<SubcategoryTotal>,
}

/// Where the money went: ordinary spending grouped by category and
/// subcategory.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExpenseBreakdown {
    /// The categories, sorted by total descending.
    pub categories: Vec<CategoryTotal>,
    /// The total absolute spending across every category.
    pub total: Decimal,
}

impl ExpenseBreakdown {
    /// Computes the breakdown over ordinary spending: transfers and
    /// work are excluded, only negative amounts count, and magnitudes
    /// are taken as absolute values.
    pub fn compute(transactions: &[Transaction]) -> Self {
        let mut tree: HashMap<&str, HashMap<&str, Decimal>> = HashMap::new();
        let mut total = Decimal::ZERO;

        for transaction in transactions {
            if transaction.analytics != AnalyticsClass::Ordinary
                || transaction.value_chf >= Decimal::ZERO
            {
                continue;
            }

            let amount = transaction.value_chf.abs();
            let subcategory = if transaction.subcategory.is_empty() {
                OTHER_SUBCATEGORY
            } else {
                &transaction.subcategory
            };

            *tree.entry(&transaction.category)
                .or_default()
                .entry(subcategory)
                .or_default() += amount;
            total += amount;
        }

        let mut categories: Vec<CategoryTotal> = tree
            .into_iter()
            .map(|(name, subtotals)| {
                let mut subcategories: Vec<SubcategoryTotal> = subtotals
                    .into_iter()
                    .map(|(name, total)| SubcategoryTotal {
                        name: name.to_string(),
                        total,
                    })
                    .collect();
                subcategories.sort_by(|a, b| b.total.cmp(&a.total));

                let category_total: Decimal = subcategories
                    .iter()
                    .map(|subcategory| subcategory.total)
                    .sum();
                let share = if total > Decimal::ZERO {
                    (category_total / total * Decimal::ONE_HUNDRED).round_dp(1)
                } else {
                    Decimal::ZERO
                };

                CategoryTotal {
                    name: name.to_string(),
                    total: category_total,
                    share,
                    subcategories,
                }
            })
            .collect();
        categories.sort_by(|a, b| b.total.cmp(&a.total));

        Self { categories, total }
    }
}
