//! In-memory store of clients and accounts.
//!
//! The registry is the entry point the shell drives: it resolves clients by
//! national ID, hands out sequential account numbers and routes deposits and
//! withdrawals through the owning client.

use crate::account::Account;
use crate::client::Client;
use crate::error::{BankError, Result};
use crate::history::TransactionRecord;
use crate::money::Money;
use crate::transaction::Transaction;
use chrono::{Local, NaiveDate, NaiveDateTime};
use log::{debug, info};
use serde::Serialize;
use std::fmt;
use std::io::Write;

/// Statement of an account: its entries in order plus the current balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub records: Vec<TransactionRecord>,
    pub balance: Money,
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "================ STATEMENT ================")?;
        if self.records.is_empty() {
            writeln!(f, "No transactions were made.")?;
        } else {
            for record in &self.records {
                writeln!(f, "{}:\n\t$ {}", record.kind, record.amount)?;
            }
        }
        writeln!(f, "\nBalance:\n\t$ {}", self.balance)?;
        write!(f, "==========================================")
    }
}

/// One line of the account listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    pub branch: &'static str,
    pub number: u32,
    pub owner: String,
    pub balance: Money,
}

impl fmt::Display for AccountSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Branch:\t\t{}", self.branch)?;
        writeln!(f, "Account:\t{}", self.number)?;
        writeln!(f, "Holder:\t\t{}", self.owner)?;
        write!(f, "Balance:\t$ {}", self.balance)
    }
}

/// Clients and accounts held for the lifetime of the process.
///
/// # Invariants
///
/// - National IDs are unique among clients
/// - Account numbers are assigned sequentially from 1 and never reused
#[derive(Debug, Default)]
pub struct Registry {
    clients: Vec<Client>,

    /// `(client index, account index)` of every account, in creation order.
    accounts: Vec<(usize, usize)>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Registry::default()
    }

    /// Registers a new individual client.
    pub fn create_individual_client(
        &mut self,
        name: &str,
        birth_date: NaiveDate,
        national_id: &str,
        address: &str,
    ) -> Result<&Client> {
        if self.find_client(national_id).is_some() {
            debug!("Client {} already registered", national_id);
            return Err(BankError::DuplicateClientId(national_id.to_string()));
        }

        self.clients
            .push(Client::individual(name, birth_date, national_id, address));
        info!("Registered client {}", national_id);

        let index = self.clients.len() - 1;
        Ok(&self.clients[index])
    }

    /// Opens a checking account with the next sequential number for the
    /// client registered under `national_id`.
    pub fn create_checking_account(&mut self, national_id: &str) -> Result<&Account> {
        let client_index = self
            .client_index(national_id)
            .ok_or(BankError::ClientNotFound)?;
        let number = self.next_account_number();

        let client = &mut self.clients[client_index];
        client.add_account(Account::checking(number, national_id));
        let account_index = client.accounts().len() - 1;
        self.accounts.push((client_index, account_index));
        info!("Opened checking account {} for client {}", number, national_id);

        Ok(&self.clients[client_index].accounts()[account_index])
    }

    /// The number the next account will receive.
    pub fn next_account_number(&self) -> u32 {
        // Account counts never approach u32::MAX in an operator session.
        self.accounts.len() as u32 + 1
    }

    pub fn find_client(&self, national_id: &str) -> Option<&Client> {
        self.clients
            .iter()
            .find(|client| client.national_id() == national_id)
    }

    fn client_index(&self, national_id: &str) -> Option<usize> {
        self.clients
            .iter()
            .position(|client| client.national_id() == national_id)
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    /// First account of the client registered under `national_id`.
    pub fn primary_account(&self, national_id: &str) -> Result<&Account> {
        self.find_client(national_id)
            .ok_or(BankError::ClientNotFound)?
            .primary_account()
            .ok_or(BankError::ClientHasNoAccount)
    }

    /// Deposits into the client's first account.
    pub fn deposit(&mut self, national_id: &str, amount: Money) -> Result<()> {
        self.apply(national_id, Transaction::Deposit(amount))
    }

    /// Withdraws from the client's first account.
    pub fn withdraw(&mut self, national_id: &str, amount: Money) -> Result<()> {
        self.apply(national_id, Transaction::Withdrawal(amount))
    }

    /// Applies `transaction` to the client's first account through the client.
    pub fn apply(&mut self, national_id: &str, transaction: Transaction) -> Result<()> {
        self.apply_at(national_id, transaction, Local::now().naive_local())
    }

    /// Same as [`Registry::apply`], treating `now` as the current time.
    pub fn apply_at(
        &mut self,
        national_id: &str,
        transaction: Transaction,
        now: NaiveDateTime,
    ) -> Result<()> {
        let number = self.primary_account(national_id)?.number();
        let client_index = self
            .client_index(national_id)
            .ok_or(BankError::ClientNotFound)?;

        match self.clients[client_index].apply_transaction_at(number, transaction, now) {
            Ok(()) => {
                info!(
                    "{} of {} on account {} succeeded",
                    transaction.kind(),
                    transaction.amount(),
                    number
                );
                Ok(())
            }
            Err(e) => {
                debug!(
                    "{} of {} on account {} rejected: {}",
                    transaction.kind(),
                    transaction.amount(),
                    number,
                    e
                );
                Err(e)
            }
        }
    }

    /// Statement of the client's first account.
    pub fn statement(&self, national_id: &str) -> Result<Statement> {
        let account = self.primary_account(national_id)?;
        Ok(Statement {
            records: account.history().report(None).cloned().collect(),
            balance: account.balance(),
        })
    }

    /// Every account in creation order. Each call starts a fresh iteration.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> + '_ {
        self.accounts
            .iter()
            .map(move |&(client, account)| &self.clients[client].accounts()[account])
    }

    /// Display data of every account, in creation order.
    pub fn list_accounts(&self) -> Vec<AccountSummary> {
        self.accounts
            .iter()
            .map(|&(client_index, account_index)| {
                let client = &self.clients[client_index];
                let account = &client.accounts()[account_index];
                AccountSummary {
                    branch: account.branch(),
                    number: account.number(),
                    owner: client.name().to_string(),
                    balance: account.balance(),
                }
            })
            .collect()
    }

    /// Writes the account listing as CSV, balances with two decimal places.
    pub fn write_accounts_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        for summary in self.list_accounts() {
            csv_writer.serialize(summary)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::TxKind;

    fn birth() -> NaiveDate {
        NaiveDate::from_ymd_opt(1985, 7, 4).unwrap()
    }

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn registry_with_account() -> Registry {
        let mut registry = Registry::new();
        registry
            .create_individual_client("Maria Lima", birth(), "111", "Av. B, 20")
            .unwrap();
        registry.create_checking_account("111").unwrap();
        registry
    }

    #[test]
    fn test_duplicate_national_id_is_rejected() {
        let mut registry = registry_with_account();
        let result = registry.create_individual_client("Other", birth(), "111", "x");
        assert!(matches!(result, Err(BankError::DuplicateClientId(id)) if id == "111"));
        assert_eq!(registry.clients().len(), 1);
    }

    #[test]
    fn test_account_for_unknown_client() {
        let mut registry = Registry::new();
        assert!(matches!(
            registry.create_checking_account("999"),
            Err(BankError::ClientNotFound)
        ));
        assert_eq!(registry.next_account_number(), 1);
    }

    #[test]
    fn test_account_numbers_are_sequential_across_clients() {
        let mut registry = registry_with_account();
        registry
            .create_individual_client("João Alves", birth(), "222", "Rua C, 3")
            .unwrap();
        assert_eq!(registry.create_checking_account("222").unwrap().number(), 2);
        assert_eq!(registry.create_checking_account("111").unwrap().number(), 3);

        let numbers: Vec<u32> = registry.accounts().map(Account::number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(registry.primary_account("111").unwrap().number(), 1);
    }

    #[test]
    fn test_lookup_errors() {
        let mut registry = Registry::new();
        assert!(matches!(
            registry.primary_account("111"),
            Err(BankError::ClientNotFound)
        ));

        registry
            .create_individual_client("Maria Lima", birth(), "111", "Av. B, 20")
            .unwrap();
        assert!(matches!(
            registry.deposit("111", Money::whole(10)),
            Err(BankError::ClientHasNoAccount)
        ));
        assert!(matches!(
            registry.statement("111"),
            Err(BankError::ClientHasNoAccount)
        ));
    }

    #[test]
    fn test_deposit_withdraw_and_statement() {
        let mut registry = registry_with_account();
        registry
            .apply_at("111", Transaction::Deposit(Money::whole(100)), at(1, 8))
            .unwrap();
        registry
            .apply_at("111", Transaction::Withdrawal(Money::whole(30)), at(2, 8))
            .unwrap();

        let statement = registry.statement("111").unwrap();
        assert_eq!(statement.balance, Money::whole(70));
        let kinds: Vec<TxKind> = statement.records.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![TxKind::Deposit, TxKind::Withdrawal]);
    }

    #[test]
    fn test_statement_rendering() {
        let mut registry = registry_with_account();
        let empty = registry.statement("111").unwrap().to_string();
        assert!(empty.contains("No transactions were made."));
        assert!(empty.contains("$ 0.00"));

        registry.deposit("111", Money::whole(42)).unwrap();
        let rendered = registry.statement("111").unwrap().to_string();
        assert!(rendered.contains("Deposit:\n\t$ 42.00"));
        assert!(rendered.contains("Balance:\n\t$ 42.00"));
    }

    #[test]
    fn test_list_accounts() {
        let mut registry = registry_with_account();
        registry.deposit("111", Money::whole(15)).unwrap();

        let listing = registry.list_accounts();
        assert_eq!(
            listing,
            vec![AccountSummary {
                branch: "0001",
                number: 1,
                owner: "Maria Lima".to_string(),
                balance: Money::whole(15),
            }]
        );
        assert!(listing[0].to_string().contains("Holder:\t\tMaria Lima"));
    }

    #[test]
    fn test_csv_export() {
        let mut registry = registry_with_account();
        registry.deposit("111", Money::whole(15)).unwrap();

        let mut output = Vec::new();
        registry.write_accounts_csv(&mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        assert!(output_str.starts_with("branch,number,owner,balance"));
        assert!(output_str.contains("0001,1,Maria Lima,15.00"));
    }
}
