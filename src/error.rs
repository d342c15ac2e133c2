//! Error types for the bank simulator.

use thiserror::Error;

/// Result type alias for bank operations
pub type Result<T> = std::result::Result<T, BankError>;

/// Errors that can occur while operating the bank.
///
/// All variants are recoverable: the shell reports them to the operator and
/// prompts again.
#[derive(Error, Debug)]
pub enum BankError {
    /// No client is registered under the national ID
    #[error("client not found")]
    ClientNotFound,

    /// The client exists but holds no account (or not the requested one)
    #[error("client has no account")]
    ClientHasNoAccount,

    /// A client with this national ID is already registered
    #[error("a client with national ID {0} already exists")]
    DuplicateClientId(String),

    /// Amount is zero or negative
    #[error("the amount given is invalid")]
    InvalidAmount,

    /// Deposit would take the balance past the largest representable amount
    #[error("the deposit would overflow the account balance")]
    BalanceOverflow,

    /// Withdrawal larger than the balance
    #[error("insufficient funds")]
    InsufficientFunds,

    /// Withdrawal larger than the per-transaction limit of a checking account
    #[error("withdrawal amount exceeds the limit")]
    WithdrawalLimitExceeded,

    /// Checking account already reached its maximum number of withdrawals
    #[error("maximum number of withdrawals exceeded")]
    MaxWithdrawalsExceeded,

    /// The account already had the allowed number of transactions today
    #[error("number of transactions allowed for today exceeded")]
    DailyTransactionCapReached,

    /// Birth date not in `dd-mm-yyyy` form
    #[error("invalid birth date '{0}', expected dd-mm-yyyy")]
    InvalidBirthDate(String),

    /// Failed to read operator input or write output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV export error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
