//! # Bank Simulator
//!
//! An in-memory banking simulator: clients hold checking accounts, and an
//! operator deposits, withdraws and prints statements through a text menu.
//!
//! ## Rules
//!
//! - **Balances never go negative**: withdrawals above the balance fail
//! - **Checking limits**: at most 500 per withdrawal and 3 withdrawals over
//!   the account's lifetime
//! - **Daily cap**: at most 2 transactions per account per calendar day,
//!   checked by the owning client before the account is touched
//! - **Append-only history**: successful transactions are recorded in order
//!
//! ## Example
//!
//! ```
//! use bank_sim::{BankError, Money, Registry};
//! use chrono::NaiveDate;
//!
//! let birth = NaiveDate::from_ymd_opt(1990, 1, 31).unwrap();
//! let mut registry = Registry::new();
//! registry.create_individual_client("Ana Souza", birth, "123", "Rua A, 1").unwrap();
//! registry.create_checking_account("123").unwrap();
//!
//! registry.deposit("123", Money::whole(100)).unwrap();
//! let refused = registry.withdraw("123", Money::whole(600));
//! assert!(matches!(refused, Err(BankError::WithdrawalLimitExceeded)));
//! assert_eq!(registry.statement("123").unwrap().balance, Money::whole(100));
//! ```

pub mod account;
pub mod audit;
pub mod client;
pub mod config;
pub mod error;
pub mod history;
pub mod money;
pub mod registry;
pub mod shell;
pub mod transaction;

pub use account::{Account, AccountKind, CheckingLimits, BRANCH_CODE};
pub use audit::AuditLog;
pub use client::{Client, ClientKind, Individual, DAILY_TRANSACTION_CAP};
pub use config::Config;
pub use error::{BankError, Result};
pub use history::{History, TransactionRecord};
pub use money::Money;
pub use registry::{AccountSummary, Registry, Statement};
pub use shell::Shell;
pub use transaction::{Transaction, TxKind};
