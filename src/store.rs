//! An in-memory snapshot of the transaction ledger.

use crate::transaction::Transaction;

/// Holds the most recently fetched copy of the ledger.
///
/// The store is replaced wholesale after each refresh from the
/// transaction API. Reports and views borrow the slice, so a snapshot
/// is never mutated in place.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
}

impl TransactionStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the snapshot with a freshly fetched ledger.
    pub fn replace(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
    }

    /// The current snapshot.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The distinct event tags in the snapshot, trimmed and sorted.
    pub fn event_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self
            .transactions
            .iter()
            .filter_map(|transaction| transaction.event_tag())
            .map(str::to_string)
            .collect();
        tags.sort();
        tags.dedup();

        tags
    }
}

#[cfg(test)]
mod store_tests {
    use rust_decimal_macros::dec;
    use time::macros::date;

    use crate::{
        store::TransactionStore,
        transaction::{AnalyticsClass, Transaction},
    };

    fn create_test_transaction(id: i64, flag: &str) -> Transaction {
        Transaction {
            id,
            date: date!(2025 - 06 - 15),
            account: "Checking".to_string(),
            movement: dec!(-10.0),
            currency: "CHF".to_string(),
            category: "FOOD".to_string(),
            subcategory: "".to_string(),
            analytics: AnalyticsClass::Ordinary,
            flag: flag.to_string(),
            note: "".to_string(),
            value_chf: dec!(-10.0),
        }
    }

    #[test]
    fn replace_swaps_the_snapshot() {
        let mut store = TransactionStore::new();
        store.replace(vec![create_test_transaction(1, "")]);

        store.replace(vec![
            create_test_transaction(2, ""),
            create_test_transaction(3, ""),
        ]);

        let ids: Vec<i64> = store
            .transactions()
            .iter()
            .map(|transaction| transaction.id)
            .collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn event_tags_are_trimmed_sorted_and_unique() {
        let mut store = TransactionStore::new();
        store.replace(vec![
            create_test_transaction(1, " Ski Trip "),
            create_test_transaction(2, "Japan 2025"),
            create_test_transaction(3, "Ski Trip"),
            create_test_transaction(4, "   "),
        ]);

        assert_eq!(
            store.event_tags(),
            vec!["Japan 2025".to_string(), "Ski Trip".to_string()]
        );
    }
}
