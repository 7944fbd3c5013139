//! Rappen is the core engine of a spreadsheet-backed personal finance
//! tracker.
//!
//! The library keeps an in-memory snapshot of the transaction ledger,
//! derives dashboard views (KPI totals, category hierarchies, monthly
//! balances, tag summaries) as pure functions over that snapshot, and
//! talks to two HTTP services: the sheet-backed transaction API and a
//! Frankfurter-style exchange rate API.

#![warn(missing_docs)]

use rust_decimal::Decimal;

mod account;
mod api;
mod category;
mod config;
mod filter;
mod format;
mod logging;
mod rates;
mod report;
mod service;
mod store;
mod transaction;

pub use account::{Account, AccountRegistry};
pub use api::{ApiClient, Credential};
pub use category::{CategoryEntry, CategoryRegistry};
pub use config::Config;
pub use filter::{
    AnalyticsFilter, FilterState, Period, Selection, balance_view, detail_view, period_view,
};
pub use format::chf;
pub use logging::init_tracing;
pub use rates::{RateClient, RateFailurePolicy};
pub use report::{
    CategoryNode, CategoryTotal, ExpenseBreakdown, KpiKind, KpiTotals, MonthNode,
    MonthlyBalanceTable, MonthlyHierarchy, MonthRow, SubcategoryNode, SubcategoryTotal, TagTotal,
    tag_detail, tag_summary,
};
pub use service::{MutationService, TransactionDraft, TransferOutcome, TransferPlan};
pub use store::TransactionStore;
pub use transaction::{AnalyticsClass, CreateTransaction, Transaction, UpdateTransaction};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An HTTP request could not be sent or its response could not be read.
    #[error("http request failed: {0}")]
    Http(String),

    /// The transaction API answered with an error envelope or a malformed
    /// response.
    ///
    /// Callers should pass in the message reported by the server, or a
    /// description of what was wrong with the response.
    #[error("transaction API error: {0}")]
    Api(String),

    /// The exchange rate API answered without a usable rate and the
    /// configured policy does not allow falling back.
    #[error("could not fetch exchange rate: {0}")]
    Rate(String),

    /// A value could not be serialized to or deserialized from JSON.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// An account with the given name already exists.
    #[error("account \"{0}\" already exists")]
    DuplicateAccount(String),

    /// No account with the given name exists.
    #[error("account \"{0}\" does not exist")]
    UnknownAccount(String),

    /// The account still holds money and cannot be removed.
    #[error("account \"{name}\" has a non-zero balance of {balance}")]
    NonZeroBalance {
        /// The name of the account that was to be removed.
        name: String,
        /// The balance that blocked the removal.
        balance: Decimal,
    },

    /// A category with the given name already exists.
    #[error("category \"{0}\" already exists")]
    DuplicateCategory(String),

    /// No category with the given name exists.
    #[error("category \"{0}\" does not exist")]
    UnknownCategory(String),

    /// The category already contains the given subcategory.
    #[error("category \"{category}\" already has subcategory \"{subcategory}\"")]
    DuplicateSubcategory {
        /// The category that the subcategory was to be added to.
        category: String,
        /// The subcategory name that already exists.
        subcategory: String,
    },

    /// A transfer names the same account as both source and destination.
    #[error("cannot transfer from an account to itself")]
    SameAccountTransfer,

    /// The application configuration is missing or invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::Http(error.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}
