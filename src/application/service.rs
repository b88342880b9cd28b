use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::timeout;

use crate::domain::{AccountId, BalanceSnapshot, RecordedTransaction, TransactionDraft};
use crate::storage::{ApplyOutcome, Repository};

use super::AppError;

/// Default upper bound on any single ledger operation. On expiry the
/// in-flight unit of work is dropped (and rolled back); nothing
/// half-applied stays visible.
pub const DEFAULT_OPERATION_DEADLINE: Duration = Duration::from_secs(5);

/// How many transactions a statement includes.
const STATEMENT_WINDOW: i64 = 10;

/// Application service providing the two ledger operations. This is the
/// primary interface for any client (HTTP, tests, tooling).
pub struct LedgerService {
    repo: Repository,
    deadline: Duration,
}

/// Balance as of statement time. The timestamp is the call time, not the
/// account's last mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementBalance {
    pub balance: i64,
    pub limit: i64,
    pub timestamp: DateTime<Utc>,
}

/// A balance snapshot paired with the most recent transactions.
#[derive(Debug, Clone)]
pub struct Statement {
    pub balance: StatementBalance,
    pub recent_transactions: Vec<RecordedTransaction>,
}

impl LedgerService {
    /// Create a new ledger service with the given repository.
    pub fn new(repo: Repository) -> Self {
        Self::with_deadline(repo, DEFAULT_OPERATION_DEADLINE)
    }

    /// Same as [`new`](Self::new) with a custom per-operation deadline.
    pub fn with_deadline(repo: Repository, deadline: Duration) -> Self {
        Self { repo, deadline }
    }

    /// Open (or create) the database at the given URL and run migrations.
    pub async fn init(database_url: &str) -> Result<Self, AppError> {
        let repo = Repository::init(database_url).await?;
        Ok(Self::new(repo))
    }

    /// Release the connection pool. Called once at shutdown.
    pub async fn close(&self) {
        self.repo.close().await;
    }

    /// Apply a transaction to an account and return the balance its own
    /// write produced.
    ///
    /// Order of checks: account existence, then validation, then the
    /// atomic update guarded by the credit limit. A rejected transaction
    /// leaves no trace in either store.
    pub async fn post_transaction(
        &self,
        account_id: AccountId,
        draft: TransactionDraft,
    ) -> Result<BalanceSnapshot, AppError> {
        timeout(self.deadline, self.post_transaction_inner(account_id, draft))
            .await
            .map_err(|_| AppError::Timeout)?
    }

    async fn post_transaction_inner(
        &self,
        account_id: AccountId,
        draft: TransactionDraft,
    ) -> Result<BalanceSnapshot, AppError> {
        if !self.repo.account_exists(account_id).await? {
            return Err(AppError::AccountNotFound(account_id));
        }

        let transaction = draft.validate()?;
        let occurred_at = Utc::now();

        match self
            .repo
            .apply_transaction(account_id, &transaction, occurred_at)
            .await?
        {
            ApplyOutcome::Committed(snapshot) => {
                tracing::debug!(
                    account_id,
                    amount = transaction.amount,
                    kind = %transaction.kind,
                    balance = snapshot.balance,
                    "transaction committed"
                );
                Ok(snapshot)
            }
            ApplyOutcome::LimitExceeded { headroom } => {
                Err(AppError::LimitExceeded { account_id, headroom })
            }
        }
    }

    /// Current balance plus the most recent transactions, newest first.
    ///
    /// Read-only and not atomic with concurrent writers; a balance
    /// slightly stale relative to an in-flight commit is acceptable.
    pub async fn statement(&self, account_id: AccountId) -> Result<Statement, AppError> {
        timeout(self.deadline, self.statement_inner(account_id))
            .await
            .map_err(|_| AppError::Timeout)?
    }

    async fn statement_inner(&self, account_id: AccountId) -> Result<Statement, AppError> {
        let account = self
            .repo
            .get_account(account_id)
            .await?
            .ok_or(AppError::AccountNotFound(account_id))?;

        let recent_transactions = self
            .repo
            .recent_transactions(account_id, STATEMENT_WINDOW)
            .await?;

        Ok(Statement {
            balance: StatementBalance {
                balance: account.balance,
                limit: account.limit,
                timestamp: Utc::now(),
            },
            recent_transactions,
        })
    }
}
