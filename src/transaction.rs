//! Transaction values and how they apply to an account.

use crate::account::Account;
use crate::error::Result;
use crate::money::Money;
use chrono::{Local, NaiveDateTime};
use log::debug;
use std::fmt;

/// The kind of a transaction, as stored in an account history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxKind {
    Deposit,
    Withdrawal,
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxKind::Deposit => f.write_str("Deposit"),
            TxKind::Withdrawal => f.write_str("Withdrawal"),
        }
    }
}

/// A money movement requested against an account.
///
/// The amount is fixed at construction. Whether it is actually positive is
/// checked by the account when the transaction is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transaction {
    /// Credit funds to the account.
    Deposit(Money),

    /// Debit funds from the account, subject to balance and account limits.
    Withdrawal(Money),
}

impl Transaction {
    pub fn kind(&self) -> TxKind {
        match self {
            Transaction::Deposit(_) => TxKind::Deposit,
            Transaction::Withdrawal(_) => TxKind::Withdrawal,
        }
    }

    pub fn amount(&self) -> Money {
        match *self {
            Transaction::Deposit(amount) | Transaction::Withdrawal(amount) => amount,
        }
    }

    /// Applies the transaction to `account` and records it in the account
    /// history if the money movement succeeded.
    pub fn apply(&self, account: &mut Account) -> Result<()> {
        self.apply_at(account, Local::now().naive_local())
    }

    /// Same as [`Transaction::apply`], recording the entry at `now`.
    pub fn apply_at(&self, account: &mut Account, now: NaiveDateTime) -> Result<()> {
        match *self {
            Transaction::Deposit(amount) => account.deposit(amount)?,
            Transaction::Withdrawal(amount) => account.withdraw(amount)?,
        }

        account.history_mut().record_at(self, now);
        debug!(
            "{} of {} applied to account {}",
            self.kind(),
            self.amount(),
            account.number()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BankError;

    #[test]
    fn test_kind_and_amount() {
        let deposit = Transaction::Deposit(Money::whole(10));
        assert_eq!(deposit.kind(), TxKind::Deposit);
        assert_eq!(deposit.amount(), Money::whole(10));

        let withdrawal = Transaction::Withdrawal(Money::whole(3));
        assert_eq!(withdrawal.kind(), TxKind::Withdrawal);
        assert_eq!(withdrawal.amount(), Money::whole(3));
    }

    #[test]
    fn test_successful_deposit_is_recorded() {
        let mut account = Account::checking(1, "123");
        Transaction::Deposit(Money::whole(100)).apply(&mut account).unwrap();

        assert_eq!(account.balance(), Money::whole(100));
        assert_eq!(account.history().len(), 1);
        let record = &account.history().transactions()[0];
        assert_eq!(record.kind, TxKind::Deposit);
        assert_eq!(record.amount, Money::whole(100));
    }

    #[test]
    fn test_failed_withdrawal_is_not_recorded() {
        let mut account = Account::checking(1, "123");
        let result = Transaction::Withdrawal(Money::whole(10)).apply(&mut account);

        assert!(matches!(result, Err(BankError::InsufficientFunds)));
        assert!(account.history().is_empty());
        assert_eq!(account.balance(), Money::ZERO);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(TxKind::Deposit.to_string(), "Deposit");
        assert_eq!(TxKind::Withdrawal.to_string(), "Withdrawal");
    }
}
