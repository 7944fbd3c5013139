//! Translates the dashboard's save, transfer, delete and seeding
//! actions into requests against the transaction API, converting
//! amounts into the reference currency along the way.
//!
//! The service never touches the transaction store: after a successful
//! mutation the caller refetches the full ledger, so there is no
//! client-side patching to keep consistent.

use rust_decimal::Decimal;
use time::Date;

use crate::{
    Error,
    api::ApiClient,
    rates::RateClient,
    transaction::{AnalyticsClass, CreateTransaction, UpdateTransaction},
};

/// The legs of a transfer are filed under this category.
const TRANSFER_CATEGORY: &str = "TRANSFER";

/// A transaction as entered in the form, before conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    /// The date the transaction occurred.
    pub date: Date,
    /// The account the money moved in or out of.
    pub account: String,
    /// The signed amount in `currency`.
    pub movement: Decimal,
    /// The currency of the movement.
    pub currency: String,
    /// The category to file under.
    pub category: String,
    /// The subcategory, may be empty.
    pub subcategory: String,
    /// The analytics classification.
    pub analytics: AnalyticsClass,
    /// The event tag, may be empty.
    pub flag: String,
    /// A free-form note.
    pub note: String,
}

/// A transfer between two own accounts as entered in the form.
///
/// The two amounts are independent: when the accounts hold different
/// currencies the user states what left one side and what arrived on
/// the other. Both are magnitudes; the service applies the signs.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferPlan {
    /// The date of the transfer.
    pub date: Date,
    /// The account the money leaves.
    pub from_account: String,
    /// The currency of the source account.
    pub from_currency: String,
    /// The amount leaving, as a positive magnitude.
    pub amount_out: Decimal,
    /// The account the money arrives in.
    pub to_account: String,
    /// The currency of the destination account.
    pub to_currency: String,
    /// The amount arriving, as a positive magnitude.
    pub amount_in: Decimal,
    /// An optional note attached to both legs.
    pub note: String,
}

/// How far a two-leg transfer got.
///
/// The backend has no multi-row atomicity, so a transfer is two
/// independent creates issued in order. The outcome states exactly
/// which legs exist on the server afterwards.
#[derive(Debug, PartialEq)]
pub enum TransferOutcome {
    /// Both legs were created.
    Completed,
    /// The outflow leg was created but the inflow leg failed, leaving
    /// an unbalanced transfer on the server.
    OutflowOnly(Error),
    /// The outflow leg already failed, so the server is unchanged.
    Failed(Error),
}

/// Issues mutations against the transaction API.
#[derive(Debug, Clone)]
pub struct MutationService {
    api: ApiClient,
    rates: RateClient,
}

impl MutationService {
    /// Creates a service backed by the given API and rate clients.
    pub fn new(api: ApiClient, rates: RateClient) -> Self {
        Self { api, rates }
    }

    /// Converts the draft's movement into the reference currency and
    /// creates the transaction.
    ///
    /// # Errors
    ///
    /// Returns [Error::Rate] if the conversion fails under the
    /// configured policy, or the create call's error.
    pub async fn save(&self, draft: TransactionDraft, today: Date) -> Result<(), Error> {
        let payload = self.to_payload(draft, today).await?;

        self.api.create(&payload).await
    }

    /// Converts the new movement if one is given and applies the
    /// partial update.
    ///
    /// When `movement` changes, `date` is used to look up the rate for
    /// `currency`, so edits that change the amount must carry both.
    ///
    /// # Errors
    ///
    /// Returns [Error::Rate] if the conversion fails under the
    /// configured policy, or the update call's error.
    pub async fn save_update(
        &self,
        mut payload: UpdateTransaction,
        today: Date,
    ) -> Result<(), Error> {
        if let (Some(movement), Some(currency), Some(date)) =
            (payload.movement, payload.currency.as_deref(), payload.date)
        {
            payload.value_chf = Some(self.rates.convert(movement, currency, date, today).await?);
        }

        self.api.update(&payload).await
    }

    /// Deletes the transaction with the given row id.
    ///
    /// # Errors
    ///
    /// Propagates the delete call's error.
    pub async fn delete(&self, id: i64) -> Result<(), Error> {
        self.api.delete(id).await
    }

    /// Moves money between two accounts as two sequential creates,
    /// outflow first.
    ///
    /// # Errors
    ///
    /// Returns [Error::SameAccountTransfer] before any request when
    /// source and destination are the same account, and [Error::Rate]
    /// if converting either leg fails. Request failures are reported
    /// through the returned [TransferOutcome], not as an `Err`.
    pub async fn transfer(&self, plan: TransferPlan, today: Date) -> Result<TransferOutcome, Error> {
        if plan.from_account == plan.to_account {
            return Err(Error::SameAccountTransfer);
        }

        let movement_out = -plan.amount_out.abs();
        let movement_in = plan.amount_in.abs();

        let outflow = CreateTransaction {
            date: plan.date,
            account: plan.from_account.clone(),
            movement: movement_out,
            currency: plan.from_currency.clone(),
            category: TRANSFER_CATEGORY.to_string(),
            subcategory: String::new(),
            analytics: AnalyticsClass::Transfer,
            flag: "Transfer Out".to_string(),
            note: if plan.note.is_empty() {
                format!("Transfer to {}", plan.to_account)
            } else {
                format!("To {}: {}", plan.to_account, plan.note)
            },
            value_chf: self
                .rates
                .convert(movement_out, &plan.from_currency, plan.date, today)
                .await?,
        };

        let inflow = CreateTransaction {
            date: plan.date,
            account: plan.to_account.clone(),
            movement: movement_in,
            currency: plan.to_currency.clone(),
            category: TRANSFER_CATEGORY.to_string(),
            subcategory: String::new(),
            analytics: AnalyticsClass::Transfer,
            flag: "Transfer In".to_string(),
            note: if plan.note.is_empty() {
                format!("Transfer from {}", plan.from_account)
            } else {
                format!("From {}: {}", plan.from_account, plan.note)
            },
            value_chf: self
                .rates
                .convert(movement_in, &plan.to_currency, plan.date, today)
                .await?,
        };

        if let Err(error) = self.api.create(&outflow).await {
            return Ok(TransferOutcome::Failed(error));
        }

        match self.api.create(&inflow).await {
            Ok(()) => Ok(TransferOutcome::Completed),
            Err(error) => {
                tracing::error!(
                    "Inflow leg of transfer {} -> {} failed, ledger is unbalanced: {error}",
                    plan.from_account,
                    plan.to_account
                );
                Ok(TransferOutcome::OutflowOnly(error))
            }
        }
    }

    /// Seeds each account's opening balance as a synthesized
    /// transaction dated `date`. Zero balances are skipped.
    ///
    /// # Errors
    ///
    /// Stops at the first failing conversion or create call.
    pub async fn seed_balances(
        &self,
        date: Date,
        balances: &[(String, String, Decimal)],
        today: Date,
    ) -> Result<(), Error> {
        for (account, currency, balance) in balances {
            if balance.is_zero() {
                continue;
            }

            let payload = CreateTransaction {
                date,
                account: account.clone(),
                movement: *balance,
                currency: currency.clone(),
                category: TRANSFER_CATEGORY.to_string(),
                subcategory: String::new(),
                analytics: AnalyticsClass::Transfer,
                flag: "INIT".to_string(),
                note: "Initial balance".to_string(),
                value_chf: self.rates.convert(*balance, currency, date, today).await?,
            };

            self.api.create(&payload).await?;
        }

        Ok(())
    }

    async fn to_payload(
        &self,
        draft: TransactionDraft,
        today: Date,
    ) -> Result<CreateTransaction, Error> {
        let value_chf = self
            .rates
            .convert(draft.movement, &draft.currency, draft.date, today)
            .await?;

        Ok(CreateTransaction {
            date: draft.date,
            account: draft.account,
            movement: draft.movement,
            currency: draft.currency,
            category: draft.category,
            subcategory: draft.subcategory,
            analytics: draft.analytics,
            flag: draft.flag,
            note: draft.note,
            value_chf,
        })
    }
}
