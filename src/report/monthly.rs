//! The year-wide monthly balance table shown behind the balance KPI.

use rust_decimal::Decimal;

use crate::transaction::{AnalyticsClass, Transaction};

/// One calendar month of the balance table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonthRow {
    /// The zero-based month, between 0 (January) and 11 (December).
    pub month: u8,
    /// Ordinary spending, as a positive magnitude.
    pub expenses: Decimal,
    /// Ordinary income.
    pub income: Decimal,
    /// Work money received.
    pub work_in: Decimal,
    /// Work money paid back, as a positive magnitude.
    pub work_out: Decimal,
    /// `(income + work_in) - (expenses + work_out)`.
    pub net: Decimal,
}

/// The twelve months of the selected year plus a trailing total row.
///
/// Transfers are excluded entirely: moving money between own accounts
/// is neither income nor spending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyBalanceTable {
    /// One row per calendar month, in order.
    pub rows: [MonthRow; 12],
    /// The column sums across all twelve months.
    pub totals: MonthRow,
}

impl MonthlyBalanceTable {
    /// Computes the table from the balance view.
    pub fn compute(transactions: &[Transaction]) -> Self {
        let mut rows: [MonthRow; 12] = std::array::from_fn(|month| MonthRow {
            month: month as u8,
            ..MonthRow::default()
        });

        for transaction in transactions {
            if transaction.analytics == AnalyticsClass::Transfer {
                continue;
            }

            let row = &mut rows[transaction.month_index() as usize];
            let value = transaction.value_chf;

            match transaction.analytics {
                AnalyticsClass::Work => {
                    if value >= Decimal::ZERO {
                        row.work_in += value;
                    } else {
                        row.work_out += value.abs();
                    }
                }
                _ => {
                    if value >= Decimal::ZERO {
                        row.income += value;
                    } else {
                        row.expenses += value.abs();
                    }
                }
            }
        }

        let mut totals = MonthRow::default();
        for row in &mut rows {
            row.net = (row.income + row.work_in) - (row.expenses + row.work_out);
            totals.expenses += row.expenses;
            totals.income += row.income;
            totals.work_in += row.work_in;
            totals.work_out += row.work_out;
            totals.net += row.net;
        }

        Self { rows, totals }
    }
}

#[cfg(test)]
mod monthly_tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use time::{Date, macros::date};

    use crate::{
        report::monthly::MonthlyBalanceTable,
        transaction::{AnalyticsClass, Transaction},
    };

    fn create_test_transaction(
        id: i64,
        date: Date,
        value_chf: Decimal,
        analytics: AnalyticsClass,
    ) -> Transaction {
        Transaction {
            id,
            date,
            account: "Checking".to_string(),
            movement: value_chf,
            currency: "CHF".to_string(),
            category: "FOOD".to_string(),
            subcategory: "".to_string(),
            analytics,
            flag: "".to_string(),
            note: "".to_string(),
            value_chf,
        }
    }

    #[test]
    fn buckets_by_calendar_month() {
        let transactions = vec![
            create_test_transaction(1, date!(2025 - 01 - 10), dec!(-100.0), AnalyticsClass::Ordinary),
            create_test_transaction(2, date!(2025 - 01 - 25), dec!(500.0), AnalyticsClass::Ordinary),
            create_test_transaction(3, date!(2025 - 06 - 15), dec!(-40.0), AnalyticsClass::Ordinary),
        ];

        let table = MonthlyBalanceTable::compute(&transactions);

        assert_eq!(table.rows[0].expenses, dec!(100.0));
        assert_eq!(table.rows[0].income, dec!(500.0));
        assert_eq!(table.rows[0].net, dec!(400.0));
        assert_eq!(table.rows[5].expenses, dec!(40.0));
        assert_eq!(table.rows[5].net, dec!(-40.0));
    }

    #[test]
    fn splits_work_into_in_and_out() {
        let transactions = vec![
            create_test_transaction(1, date!(2025 - 03 - 25), dec!(5000.0), AnalyticsClass::Work),
            create_test_transaction(2, date!(2025 - 03 - 28), dec!(-120.0), AnalyticsClass::Work),
        ];

        let table = MonthlyBalanceTable::compute(&transactions);

        assert_eq!(table.rows[2].work_in, dec!(5000.0));
        assert_eq!(table.rows[2].work_out, dec!(120.0));
        assert_eq!(table.rows[2].net, dec!(4880.0));
    }

    #[test]
    fn excludes_transfers_entirely() {
        let transactions = vec![
            create_test_transaction(1, date!(2025 - 02 - 01), dec!(-500.0), AnalyticsClass::Transfer),
            create_test_transaction(2, date!(2025 - 02 - 01), dec!(500.0), AnalyticsClass::Transfer),
        ];

        let table = MonthlyBalanceTable::compute(&transactions);

        assert_eq!(table.rows[1].expenses, Decimal::ZERO);
        assert_eq!(table.rows[1].income, Decimal::ZERO);
        assert_eq!(table.totals.net, Decimal::ZERO);
        assert_eq!(table.totals.income, Decimal::ZERO);
    }

    #[test]
    fn totals_row_sums_each_column() {
        let transactions = vec![
            create_test_transaction(1, date!(2025 - 01 - 10), dec!(-100.0), AnalyticsClass::Ordinary),
            create_test_transaction(2, date!(2025 - 06 - 15), dec!(-40.0), AnalyticsClass::Ordinary),
            create_test_transaction(3, date!(2025 - 09 - 01), dec!(700.0), AnalyticsClass::Ordinary),
            create_test_transaction(4, date!(2025 - 12 - 24), dec!(3000.0), AnalyticsClass::Work),
        ];

        let table = MonthlyBalanceTable::compute(&transactions);

        assert_eq!(table.totals.expenses, dec!(140.0));
        assert_eq!(table.totals.income, dec!(700.0));
        assert_eq!(table.totals.work_in, dec!(3000.0));
        assert_eq!(table.totals.work_out, Decimal::ZERO);
        assert_eq!(table.totals.net, dec!(3560.0));
    }
}
