//! Converts transaction amounts into the reference currency using a
//! Frankfurter-style exchange rate API.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Deserialize;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::Error;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// What to do when a rate lookup fails.
///
/// Deployments differ on whether a failed lookup should block the save
/// or fall back to treating the amount as already converted, so the
/// choice is explicit configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RateFailurePolicy {
    /// Propagate the failure so the save is aborted.
    #[default]
    Fail,
    /// Log a warning and use a rate of one.
    FallbackToOne,
}

#[derive(Debug, Deserialize)]
struct RateResponse {
    rates: HashMap<String, Decimal>,
}

/// A client for one deployment of the exchange rate API.
#[derive(Debug, Clone)]
pub struct RateClient {
    base_url: String,
    reference_currency: String,
    policy: RateFailurePolicy,
    http: reqwest::Client,
}

impl RateClient {
    /// Creates a client that converts into `reference_currency` using
    /// the API at `base_url`.
    pub fn new(
        base_url: impl Into<String>,
        reference_currency: impl Into<String>,
        policy: RateFailurePolicy,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            reference_currency: reference_currency.into(),
            policy,
            http: reqwest::Client::new(),
        }
    }

    /// The currency this client converts into.
    pub fn reference_currency(&self) -> &str {
        &self.reference_currency
    }

    /// The rate from `currency` into the reference currency on `date`.
    ///
    /// The reference currency itself always converts at one, without a
    /// request. Dates after `today` are looked up as "latest" since the
    /// API has no rates for the future.
    ///
    /// # Errors
    ///
    /// Returns [Error::Rate] if the lookup fails and the policy is
    /// [RateFailurePolicy::Fail].
    pub async fn rate_on(&self, date: Date, currency: &str, today: Date) -> Result<Decimal, Error> {
        if currency == self.reference_currency {
            return Ok(Decimal::ONE);
        }

        match self.fetch_rate(date, currency, today).await {
            Ok(rate) => Ok(rate),
            Err(error) => match self.policy {
                RateFailurePolicy::Fail => Err(error),
                RateFailurePolicy::FallbackToOne => {
                    tracing::warn!(
                        "Rate lookup for {currency} on {date} failed ({error}), assuming 1"
                    );
                    Ok(Decimal::ONE)
                }
            },
        }
    }

    /// Converts a signed `amount` of `currency` into the reference
    /// currency on `date`.
    ///
    /// # Errors
    ///
    /// Same as [RateClient::rate_on].
    pub async fn convert(
        &self,
        amount: Decimal,
        currency: &str,
        date: Date,
        today: Date,
    ) -> Result<Decimal, Error> {
        let rate = self.rate_on(date, currency, today).await?;

        Ok(amount * rate)
    }

    async fn fetch_rate(&self, date: Date, currency: &str, today: Date) -> Result<Decimal, Error> {
        let date_segment = if date > today {
            "latest".to_string()
        } else {
            date.format(&DATE_FORMAT)
                .map_err(|error| Error::Rate(error.to_string()))?
        };

        let response = self
            .http
            .get(format!("{}/{date_segment}", self.base_url))
            .query(&[
                ("base", currency),
                ("symbols", self.reference_currency.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Rate(format!(
                "rate lookup for {currency} on {date_segment} answered {}",
                response.status()
            )));
        }

        let parsed: RateResponse = response.json().await?;
        parsed
            .rates
            .get(&self.reference_currency)
            .copied()
            .ok_or_else(|| {
                Error::Rate(format!(
                    "no {} rate in response for {currency}",
                    self.reference_currency
                ))
            })
    }
}
