//! The five headline totals shown on the KPI cards.

use rust_decimal::Decimal;

use crate::transaction::{AnalyticsClass, Transaction};

/// The headline totals of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KpiTotals {
    /// Sum of every transaction in the balance view, all classes
    /// included. Transfer legs net out because both sides are present.
    pub total_balance: Decimal,
    /// Positive ordinary transactions of the period.
    pub income: Decimal,
    /// Negative ordinary transactions of the period, kept signed.
    pub expenses: Decimal,
    /// Work transactions of the period, kept signed.
    pub work: Decimal,
    /// Tagged non-transfer transactions of the period, kept signed.
    ///
    /// Deliberately overlaps with the other three: a tagged salary
    /// counts under both `work` and `events`.
    pub events: Decimal,
}

impl KpiTotals {
    /// Computes the totals from the period view and the balance view.
    pub fn compute(period: &[Transaction], balance: &[Transaction]) -> Self {
        let total_balance = balance
            .iter()
            .map(|transaction| transaction.value_chf)
            .sum();

        let mut totals = Self {
            total_balance,
            ..Self::default()
        };

        for transaction in period {
            let value = transaction.value_chf;

            if transaction.event_tag().is_some()
                && transaction.analytics != AnalyticsClass::Transfer
            {
                totals.events += value;
            }

            match transaction.analytics {
                AnalyticsClass::Work => totals.work += value,
                AnalyticsClass::Transfer => {}
                AnalyticsClass::Ordinary => {
                    if value > Decimal::ZERO {
                        totals.income += value;
                    } else {
                        totals.expenses += value;
                    }
                }
            }
        }

        totals
    }
}
