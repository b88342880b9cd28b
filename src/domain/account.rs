use chrono::{DateTime, Utc};

/// Account identifiers are assigned externally (seeded at deployment),
/// never generated by this service.
pub type AccountId = i64;

/// A ledger account. The engine only ever mutates `balance` and
/// `last_statement_at`; everything else is fixed at seed time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    /// Signed balance in whole currency units.
    pub balance: i64,
    /// How far the balance may go into debit. Non-negative.
    pub limit: i64,
    /// Timestamp of the last balance mutation.
    pub last_statement_at: DateTime<Utc>,
}

impl Account {
    /// Remaining debit capacity: `balance + limit`. The ledger invariant is
    /// that this never goes negative on a committed transaction.
    pub fn headroom(&self) -> i64 {
        self.balance + self.limit
    }
}

/// Point-in-time view of an account's balance. Always read from the
/// account row (inside the unit of work that produced it, for writes),
/// never cached independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceSnapshot {
    pub balance: i64,
    pub limit: i64,
    pub last_statement_at: DateTime<Utc>,
}
