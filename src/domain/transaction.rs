use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum description length, in characters, after trimming.
pub const MAX_DESCRIPTION_CHARS: usize = 10;

/// Direction of a transaction. The stored amount is always positive; the
/// sign is carried here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Increases the balance.
    Credit,
    /// Decreases the balance.
    Debit,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Credit => "credit",
            TransactionKind::Debit => "debit",
        }
    }

    /// Case-insensitive parse. Only "credit" and "debit" are accepted.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "credit" => Some(TransactionKind::Credit),
            "debit" => Some(TransactionKind::Debit),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A candidate transaction as it arrives at the boundary, before any rule
/// has been checked. The amount is kept as a float so that fractional
/// input can be detected and rejected instead of silently truncated.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub amount: f64,
    pub kind: String,
    pub description: String,
}

/// A validated transaction, ready to be applied. `occurred_at` is assigned
/// by the engine at acceptance time, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Positive (or zero) amount in whole currency units.
    pub amount: i64,
    pub kind: TransactionKind,
    pub description: String,
}

impl Transaction {
    /// The signed delta this transaction applies to a balance.
    pub fn signed_delta(&self) -> i64 {
        match self.kind {
            TransactionKind::Credit => self.amount,
            TransactionKind::Debit => -self.amount,
        }
    }
}

/// A transaction as persisted in the append-only log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedTransaction {
    pub amount: i64,
    pub kind: TransactionKind,
    pub description: String,
    pub occurred_at: DateTime<Utc>,
}

/// Why a candidate transaction was rejected. Carries the message shown to
/// the caller; all variants map to an unprocessable response.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Transaction kind must be 'credit' or 'debit', got '{0}'")]
    UnknownKind(String),

    #[error("Transaction amount must not be negative, got {0}")]
    NegativeAmount(f64),

    #[error("Transaction amount must be a whole number, got {0}")]
    FractionalAmount(f64),

    #[error("Transaction amount is out of range: {0}")]
    AmountOutOfRange(f64),

    #[error("Description must have 1 to 10 characters after trimming, got {0}")]
    BadDescriptionLength(usize),
}

impl TransactionDraft {
    /// Check every rule in order and produce the validated transaction.
    /// Purely computational, no side effects.
    ///
    /// Zero-amount transactions pass: only strictly negative amounts are
    /// rejected, preserving the observed behavior of the deployed ledger.
    pub fn validate(self) -> Result<Transaction, ValidationError> {
        let kind = TransactionKind::from_str(&self.kind)
            .ok_or_else(|| ValidationError::UnknownKind(self.kind.clone()))?;

        if self.amount < 0.0 {
            return Err(ValidationError::NegativeAmount(self.amount));
        }
        if self.amount.fract() != 0.0 {
            return Err(ValidationError::FractionalAmount(self.amount));
        }
        // `i64::MAX as f64` rounds up to 2^63, which is itself too big.
        if self.amount >= i64::MAX as f64 {
            return Err(ValidationError::AmountOutOfRange(self.amount));
        }

        let description = self.description.trim().to_string();
        let chars = description.chars().count();
        if chars == 0 || chars > MAX_DESCRIPTION_CHARS {
            return Err(ValidationError::BadDescriptionLength(chars));
        }

        Ok(Transaction {
            amount: self.amount as i64,
            kind,
            description,
        })
    }
}
