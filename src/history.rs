//! Append-only transaction ledger of a single account.

use crate::money::Money;
use crate::transaction::{Transaction, TxKind};
use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};

/// One entry of an account history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    pub kind: TxKind,
    pub amount: Money,
    /// Local time of recording, truncated to whole seconds.
    pub timestamp: NaiveDateTime,
}

/// Ordered ledger of the transactions applied to an account.
///
/// # Invariants
///
/// - Entries are kept in insertion order
/// - Entries are never removed or modified once recorded
#[derive(Debug, Clone, Default)]
pub struct History {
    transactions: Vec<TransactionRecord>,
}

impl History {
    pub fn new() -> Self {
        History::default()
    }

    /// All recorded entries, oldest first.
    pub fn transactions(&self) -> &[TransactionRecord] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Appends `transaction` stamped with the current local time.
    pub fn record(&mut self, transaction: &Transaction) {
        self.record_at(transaction, Local::now().naive_local());
    }

    /// Appends `transaction` stamped with `timestamp`.
    pub fn record_at(&mut self, transaction: &Transaction, timestamp: NaiveDateTime) {
        let timestamp = timestamp.with_nanosecond(0).unwrap_or(timestamp);
        self.transactions.push(TransactionRecord {
            kind: transaction.kind(),
            amount: transaction.amount(),
            timestamp,
        });
    }

    /// Entries recorded on the current local calendar date.
    pub fn transactions_today(&self) -> Vec<&TransactionRecord> {
        self.transactions_on(Local::now().date_naive())
    }

    /// Entries recorded on `date`, ignoring time of day.
    pub fn transactions_on(&self, date: NaiveDate) -> Vec<&TransactionRecord> {
        self.transactions
            .iter()
            .filter(|record| record.timestamp.date() == date)
            .collect()
    }

    /// Number of entries of the given kind over the whole history.
    pub fn count_kind(&self, kind: TxKind) -> usize {
        self.report(Some(kind)).count()
    }

    /// Lazily yields entries in insertion order, optionally only those of
    /// `kind_filter`. Each call starts a fresh iteration.
    pub fn report(
        &self,
        kind_filter: Option<TxKind>,
    ) -> impl Iterator<Item = &TransactionRecord> + '_ {
        self.transactions
            .iter()
            .filter(move |record| kind_filter.map_or(true, |kind| record.kind == kind))
    }
}
