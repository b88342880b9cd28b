use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::Statement;
use crate::domain::{BalanceSnapshot, RecordedTransaction, TransactionDraft, TransactionKind};

/// Body of `POST /accounts/{id}/transactions`. Fields default when absent
/// so that missing values flow into validation (and reject there as
/// unprocessable) instead of failing the parse.
#[derive(Debug, Deserialize)]
pub struct TransactionRequest {
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub description: String,
}

impl TransactionRequest {
    pub fn into_draft(self) -> TransactionDraft {
        TransactionDraft {
            amount: self.amount,
            kind: self.kind,
            description: self.description,
        }
    }
}

/// Body of a successful transaction: the balance the caller's own write
/// produced.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub balance: i64,
    pub limit: i64,
}

impl From<BalanceSnapshot> for TransactionResponse {
    fn from(snapshot: BalanceSnapshot) -> Self {
        Self {
            balance: snapshot.balance,
            limit: snapshot.limit,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementResponse {
    pub balance_snapshot: BalanceSnapshotDto,
    pub recent_transactions: Vec<TransactionDto>,
}

#[derive(Debug, Serialize)]
pub struct BalanceSnapshotDto {
    pub balance: i64,
    pub limit: i64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDto {
    pub amount: i64,
    pub kind: TransactionKind,
    pub description: String,
    pub occurred_at: DateTime<Utc>,
}

impl From<RecordedTransaction> for TransactionDto {
    fn from(transaction: RecordedTransaction) -> Self {
        Self {
            amount: transaction.amount,
            kind: transaction.kind,
            description: transaction.description,
            occurred_at: transaction.occurred_at,
        }
    }
}

impl From<Statement> for StatementResponse {
    fn from(statement: Statement) -> Self {
        Self {
            balance_snapshot: BalanceSnapshotDto {
                balance: statement.balance.balance,
                limit: statement.balance.limit,
                timestamp: statement.balance.timestamp,
            },
            recent_transactions: statement
                .recent_transactions
                .into_iter()
                .map(TransactionDto::from)
                .collect(),
        }
    }
}
