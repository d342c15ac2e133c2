//! Bank account model and its money movement rules.
//!
//! Maintains the invariant: `balance >= 0` at all times.

use crate::error::{BankError, Result};
use crate::history::History;
use crate::money::Money;
use crate::transaction::TxKind;

/// Branch code shared by every account.
pub const BRANCH_CODE: &str = "0001";

/// Limits applied to withdrawals from a checking account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckingLimits {
    /// Largest amount a single withdrawal may move.
    pub withdrawal_limit: Money,

    /// Number of withdrawals allowed over the account's lifetime.
    pub max_withdrawals: usize,
}

impl Default for CheckingLimits {
    fn default() -> Self {
        CheckingLimits {
            withdrawal_limit: Money::whole(500),
            max_withdrawals: 3,
        }
    }
}

/// The account variant, which decides how withdrawals are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    /// Only balance and amount validity are checked.
    Basic,

    /// Per-transaction limit and withdrawal count cap on top of the basic rules.
    Checking(CheckingLimits),
}

/// A bank account owned by a client.
///
/// # Invariants
///
/// - `balance >= 0` after every operation
/// - Failed operations leave balance and history untouched
#[derive(Debug, Clone)]
pub struct Account {
    number: u32,
    balance: Money,
    /// National ID of the owning client.
    owner: String,
    history: History,
    kind: AccountKind,
}

impl Account {
    /// Creates an account of the given kind with a zero balance.
    pub fn new(number: u32, owner: impl Into<String>, kind: AccountKind) -> Self {
        Account {
            number,
            balance: Money::ZERO,
            owner: owner.into(),
            history: History::new(),
            kind,
        }
    }

    /// Creates a checking account with the default limits.
    pub fn checking(number: u32, owner: impl Into<String>) -> Self {
        Self::new(number, owner, AccountKind::Checking(CheckingLimits::default()))
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn branch(&self) -> &'static str {
        BRANCH_CODE
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub(crate) fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    /// Deposits funds into the account.
    ///
    /// Returns `InvalidAmount` if `amount <= 0` and `BalanceOverflow` if the
    /// new balance cannot be represented.
    pub fn deposit(&mut self, amount: Money) -> Result<()> {
        if !amount.is_positive() {
            return Err(BankError::InvalidAmount);
        }

        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(BankError::BalanceOverflow)?;
        Ok(())
    }

    /// Withdraws funds from the account.
    ///
    /// Checking accounts first reject amounts above their per-transaction
    /// limit, then withdrawals past their lifetime cap. All accounts then
    /// reject amounts above the balance and non-positive amounts, in that
    /// order.
    pub fn withdraw(&mut self, amount: Money) -> Result<()> {
        if let AccountKind::Checking(limits) = self.kind {
            let withdrawals = self.history.count_kind(TxKind::Withdrawal);

            if amount > limits.withdrawal_limit {
                return Err(BankError::WithdrawalLimitExceeded);
            }
            if withdrawals >= limits.max_withdrawals {
                return Err(BankError::MaxWithdrawalsExceeded);
            }
        }

        self.withdraw_funds(amount)
    }

    fn withdraw_funds(&mut self, amount: Money) -> Result<()> {
        if amount > self.balance {
            return Err(BankError::InsufficientFunds);
        }
        if !amount.is_positive() {
            return Err(BankError::InvalidAmount);
        }

        // amount <= balance, so the difference cannot leave the decimal range.
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(BankError::InsufficientFunds)?;
        Ok(())
    }
}
