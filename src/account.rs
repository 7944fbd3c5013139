//! Defines accounts and the registry that manages them.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::{Error, transaction::Transaction};

/// The largest balance an account may hold and still count as empty
/// when it is removed. Absorbs cent-level conversion residue.
const ZERO_BALANCE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// A named account and the currency it is denominated in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// The unique account name.
    pub name: String,
    /// The ISO currency code of the account.
    pub currency: String,
}

/// The set of accounts money can move through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRegistry {
    accounts: Vec<Account>,
}

impl AccountRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            accounts: Vec::new(),
        }
    }

    /// The stock set of accounts a fresh install starts with.
    pub fn with_defaults() -> Self {
        let accounts = [
            ("Cash-CHF", "CHF"),
            ("Cash-EUR", "EUR"),
            ("CreditAgricole", "EUR"),
            ("Revolut-CHF", "CHF"),
            ("Revolut-EUR", "EUR"),
            ("Revolut-GBP", "GBP"),
            ("Revolut-USD", "USD"),
            ("Yuh-CHF", "CHF"),
        ]
        .into_iter()
        .map(|(name, currency)| Account {
            name: name.to_string(),
            currency: currency.to_string(),
        })
        .collect();

        Self { accounts }
    }

    /// The accounts in registry order.
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Looks up an account by name.
    pub fn find(&self, name: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.name == name)
    }

    /// Adds a new account.
    ///
    /// # Errors
    ///
    /// Returns [Error::DuplicateAccount] if an account with the same
    /// name already exists.
    pub fn add(&mut self, name: &str, currency: &str) -> Result<(), Error> {
        if self.find(name).is_some() {
            return Err(Error::DuplicateAccount(name.to_string()));
        }

        self.accounts.push(Account {
            name: name.to_string(),
            currency: currency.to_string(),
        });

        Ok(())
    }

    /// Removes an account, but only when its balance is zero.
    ///
    /// # Errors
    ///
    /// Returns [Error::UnknownAccount] if no account with the given
    /// name exists, or [Error::NonZeroBalance] if the account's balance
    /// over `transactions` exceeds a cent in either direction.
    pub fn remove(&mut self, name: &str, transactions: &[Transaction]) -> Result<(), Error> {
        if self.find(name).is_none() {
            return Err(Error::UnknownAccount(name.to_string()));
        }

        let balance: Decimal = transactions
            .iter()
            .filter(|transaction| transaction.account == name)
            .map(|transaction| transaction.movement)
            .sum();

        if balance.abs() > ZERO_BALANCE_TOLERANCE {
            tracing::error!("Refused to remove account {name} with balance {balance}");
            return Err(Error::NonZeroBalance {
                name: name.to_string(),
                balance,
            });
        }

        self.accounts.retain(|account| account.name != name);

        Ok(())
    }

    /// The balance of each registered account, in its own currency.
    ///
    /// Every registered account appears in the result, even with no
    /// transactions. Transactions against unregistered accounts are
    /// ignored.
    pub fn balances(&self, transactions: &[Transaction]) -> HashMap<String, Decimal> {
        let mut balances: HashMap<String, Decimal> = self
            .accounts
            .iter()
            .map(|account| (account.name.clone(), Decimal::ZERO))
            .collect();

        for transaction in transactions {
            if let Some(balance) = balances.get_mut(&transaction.account) {
                *balance += transaction.movement;
            }
        }

        balances
    }

    /// The balance of a single account, in its own currency.
    pub fn balance_of(&self, name: &str, transactions: &[Transaction]) -> Decimal {
        transactions
            .iter()
            .filter(|transaction| transaction.account == name)
            .map(|transaction| transaction.movement)
            .sum()
    }
}

impl Default for AccountRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
