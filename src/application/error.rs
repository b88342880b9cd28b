use thiserror::Error;

use crate::domain::{AccountId, ValidationError};

/// Every failure a ledger operation can produce. The HTTP layer maps each
/// variant to exactly one status code; nothing here ever crashes the
/// process.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Transaction exceeds the credit limit of account {account_id}")]
    LimitExceeded {
        account_id: AccountId,
        /// How far below zero the balance + limit would have gone.
        headroom: i64,
    },

    #[error("Operation timed out")]
    Timeout,

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}
