//! Event tag summaries: how much each tagged trip or occasion cost.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::{
    report::{CategoryNode, OTHER_SUBCATEGORY, SubcategoryNode},
    transaction::{AnalyticsClass, Transaction},
};

/// The signed total of one event tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTotal {
    /// The trimmed tag.
    pub name: String,
    /// The summed signed value of the tag's transactions.
    pub value: Decimal,
}

/// The total per event tag, sorted by absolute value descending.
///
/// Transfers are excluded; work and ordinary transactions both count,
/// signed, so a tagged trip that was partly reimbursed nets out.
pub fn tag_summary(transactions: &[Transaction]) -> Vec<TagTotal> {
    let mut totals: HashMap<&str, Decimal> = HashMap::new();

    for transaction in transactions {
        if transaction.analytics == AnalyticsClass::Transfer {
            continue;
        }

        if let Some(tag) = transaction.event_tag() {
            *totals.entry(tag).or_default() += transaction.value_chf;
        }
    }

    let mut tags: Vec<TagTotal> = totals
        .into_iter()
        .map(|(name, value)| TagTotal {
            name: name.to_string(),
            value,
        })
        .collect();
    tags.sort_by(|a, b| b.value.abs().cmp(&a.value.abs()));

    tags
}

/// The category and subcategory breakdown of a single event tag, with
/// the tag's grand total.
///
/// Matching is done on the trimmed flag, mirroring how the tags in
/// [tag_summary] are produced. Transfers are excluded, amounts are
/// kept signed.
pub fn tag_detail(transactions: &[Transaction], tag: &str) -> (Vec<CategoryNode>, Decimal) {
    let mut tree: HashMap<&str, HashMap<&str, Decimal>> = HashMap::new();

    for transaction in transactions {
        if transaction.analytics == AnalyticsClass::Transfer
            || transaction.event_tag() != Some(tag)
        {
            continue;
        }

        let subcategory = if transaction.subcategory.is_empty() {
            OTHER_SUBCATEGORY
        } else {
            &transaction.subcategory
        };

        *tree.entry(&transaction.category)
            .or_default()
            .entry(subcategory)
            .or_default() += transaction.value_chf;
    }

    let mut categories: Vec<CategoryNode> = tree
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
    categories.sort_by(|a, b| b.total.abs().cmp(&a.total.abs()));

    let total = categories.iter().map(|category| category.total).sum();

    (categories, total)
}
