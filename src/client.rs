//! Bank clients and the per-day transaction throttle.

use crate::account::Account;
use crate::error::{BankError, Result};
use crate::transaction::Transaction;
use chrono::{Local, NaiveDate, NaiveDateTime};
use log::debug;

/// Transactions allowed per account per calendar day.
pub const DAILY_TRANSACTION_CAP: usize = 2;

/// Personal data of an individual client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    pub name: String,
    pub birth_date: NaiveDate,
    /// Unique lookup key within a registry.
    pub national_id: String,
}

/// The client variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientKind {
    Individual(Individual),
}

/// A bank client and the accounts they hold.
#[derive(Debug, Clone)]
pub struct Client {
    address: String,
    kind: ClientKind,
    accounts: Vec<Account>,
}

impl Client {
    pub fn new(address: impl Into<String>, kind: ClientKind) -> Self {
        Client {
            address: address.into(),
            kind,
            accounts: Vec::new(),
        }
    }

    /// Creates an individual client without accounts.
    pub fn individual(
        name: impl Into<String>,
        birth_date: NaiveDate,
        national_id: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self::new(
            address,
            ClientKind::Individual(Individual {
                name: name.into(),
                birth_date,
                national_id: national_id.into(),
            }),
        )
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn kind(&self) -> &ClientKind {
        &self.kind
    }

    pub fn name(&self) -> &str {
        match &self.kind {
            ClientKind::Individual(individual) => &individual.name,
        }
    }

    pub fn national_id(&self) -> &str {
        match &self.kind {
            ClientKind::Individual(individual) => &individual.national_id,
        }
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// The account the shell operates on: the first one opened.
    pub fn primary_account(&self) -> Option<&Account> {
        self.accounts.first()
    }

    pub fn account(&self, number: u32) -> Option<&Account> {
        self.accounts.iter().find(|account| account.number() == number)
    }

    /// Appends `account` to the client's accounts. No duplicate check.
    pub fn add_account(&mut self, account: Account) {
        self.accounts.push(account);
    }

    /// Applies `transaction` to the client's account `number`.
    ///
    /// Rejected with `DailyTransactionCapReached` before the account is
    /// touched when the account already holds [`DAILY_TRANSACTION_CAP`]
    /// entries dated today, whatever their kind.
    pub fn apply_transaction(&mut self, number: u32, transaction: Transaction) -> Result<()> {
        self.apply_transaction_at(number, transaction, Local::now().naive_local())
    }

    /// Same as [`Client::apply_transaction`], treating `now` as the current time.
    pub fn apply_transaction_at(
        &mut self,
        number: u32,
        transaction: Transaction,
        now: NaiveDateTime,
    ) -> Result<()> {
        let account = self
            .accounts
            .iter_mut()
            .find(|account| account.number() == number)
            .ok_or(BankError::ClientHasNoAccount)?;

        let today = account.history().transactions_on(now.date()).len();
        if today >= DAILY_TRANSACTION_CAP {
            debug!(
                "Account {} already has {} transactions on {}, rejecting",
                number,
                today,
                now.date()
            );
            return Err(BankError::DailyTransactionCapReached);
        }

        transaction.apply_at(account, now)
    }
}
