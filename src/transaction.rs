//! Defines the transaction record, the analytics classification and the
//! payloads for creating and updating transactions over the wire.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

/// How a transaction participates in analytics.
///
/// Every transaction carries exactly one class: the three classes
/// partition the ledger, so a record is never counted under more than
/// one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalyticsClass {
    /// A regular expense or income that appears in spending analytics.
    #[serde(rename = "TRUE")]
    Ordinary,
    /// A movement between own accounts, excluded from spending analytics.
    #[serde(rename = "FALSE")]
    Transfer,
    /// Salary and other work-related income, reported separately.
    #[serde(rename = "WORK")]
    Work,
}

/// A single row of the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The row number that uniquely identifies the transaction.
    pub id: i64,
    /// The date the transaction occurred.
    #[serde(with = "wire_date")]
    pub date: Date,
    /// The name of the account the money moved in or out of.
    pub account: String,
    /// The signed amount in the account's own currency.
    pub movement: Decimal,
    /// The currency the movement is denominated in.
    #[serde(rename = "curr")]
    pub currency: String,
    /// The category the transaction belongs to.
    pub category: String,
    /// The subcategory within [Transaction::category], may be empty.
    pub subcategory: String,
    /// The analytics classification.
    pub analytics: AnalyticsClass,
    /// A free-form tag, empty when the transaction is untagged.
    pub flag: String,
    /// A free-form note.
    pub note: String,
    /// The signed amount converted to the reference currency.
    #[serde(rename = "valueChf")]
    pub value_chf: Decimal,
}

impl Transaction {
    /// The zero-based month of [Transaction::date], between 0 (January)
    /// and 11 (December).
    pub fn month_index(&self) -> u8 {
        self.date.month() as u8 - 1
    }

    /// The trimmed tag of the transaction, or `None` if the flag is
    /// empty or whitespace.
    pub fn event_tag(&self) -> Option<&str> {
        let tag = self.flag.trim();
        (!tag.is_empty()).then_some(tag)
    }
}

/// The payload for creating a transaction.
///
/// The server assigns the row id, so the payload carries every field of
/// [Transaction] except `id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTransaction {
    /// The date the transaction occurred.
    #[serde(with = "wire_date")]
    pub date: Date,
    /// The name of the account the money moved in or out of.
    pub account: String,
    /// The signed amount in the account's own currency.
    pub movement: Decimal,
    /// The currency the movement is denominated in.
    #[serde(rename = "curr")]
    pub currency: String,
    /// The category the transaction belongs to.
    pub category: String,
    /// The subcategory, may be empty.
    pub subcategory: String,
    /// The analytics classification.
    pub analytics: AnalyticsClass,
    /// A free-form tag, empty when the transaction is untagged.
    pub flag: String,
    /// A free-form note.
    pub note: String,
    /// The signed amount converted to the reference currency.
    #[serde(rename = "valueChf")]
    pub value_chf: Decimal,
}

/// The payload for updating a transaction in place.
///
/// Only `id` is mandatory. Fields set to `None` are left out of the
/// request body so the server keeps their current values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateTransaction {
    /// The row number of the transaction to update.
    pub id: i64,
    /// The new date, if it should change.
    #[serde(with = "wire_date::option", skip_serializing_if = "Option::is_none")]
    pub date: Option<Date>,
    /// The new account name, if it should change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    /// The new movement, if it should change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movement: Option<Decimal>,
    /// The new currency, if it should change.
    #[serde(rename = "curr", skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// The new category, if it should change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// The new subcategory, if it should change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    /// The new analytics classification, if it should change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics: Option<AnalyticsClass>,
    /// The new flag, if it should change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
    /// The new note, if it should change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// The new reference currency value, if it should change.
    #[serde(rename = "valueChf", skip_serializing_if = "Option::is_none")]
    pub value_chf: Option<Decimal>,
}

/// Serializes dates as `YYYY-MM-DD` and deserializes both plain dates
/// and ISO date-times by dropping everything from the `T` onwards.
///
/// The sheet backend stores dates as date-time strings such as
/// `2025-06-15T00:00:00.000Z`, but expects plain dates when writing.
pub(crate) mod wire_date {
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};
    use time::{
        Date,
        format_description::BorrowedFormatItem,
        macros::format_description,
    };

    const FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let text = date
            .format(&FORMAT)
            .map_err(|error| serde::ser::Error::custom(error.to_string()))?;
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let date_part = raw.split('T').next().unwrap_or(&raw);
        Date::parse(date_part, &FORMAT)
            .map_err(|error| D::Error::custom(format!("invalid date \"{raw}\": {error}")))
    }

    pub(crate) mod option {
        use serde::Serializer;
        use time::Date;

        pub fn serialize<S: Serializer>(
            date: &Option<Date>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => super::serialize(date, serializer),
                None => serializer.serialize_none(),
            }
        }
    }
}
