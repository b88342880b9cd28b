use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

use crate::domain::{
    Account, AccountId, BalanceSnapshot, RecordedTransaction, Transaction, TransactionKind,
};

use super::{MIGRATION_001_INITIAL, MIGRATION_002_SEED_ACCOUNTS};

/// Outcome of attempting to apply a transaction as one unit of work.
#[derive(Debug, Clone)]
pub enum ApplyOutcome {
    /// The unit of work committed. The snapshot was read back inside it,
    /// so the caller sees exactly the state their write produced.
    Committed(BalanceSnapshot),
    /// The update would have driven `balance + credit_limit` below zero.
    /// Everything was rolled back; no balance change, no log row.
    LimitExceeded { headroom: i64 },
}

/// Repository for persisting and querying accounts and their
/// append-only transaction log.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given URL.
    /// Creates the database file if it doesn't exist (with `mode=rwc`).
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;

        sqlx::query(MIGRATION_002_SEED_ACCOUNTS)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 002")?;

        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    /// Close the underlying pool. Called once at shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    // ========================
    // Account operations
    // ========================

    /// Check whether an account exists.
    pub async fn account_exists(&self, id: AccountId) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM accounts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to check account existence")?;
        Ok(row.is_some())
    }

    /// Get an account by id.
    pub async fn get_account(&self, id: AccountId) -> Result<Option<Account>> {
        let row = sqlx::query(
            r#"
            SELECT id, balance, credit_limit, last_statement_at
            FROM accounts
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch account")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    // ========================
    // Ledger unit of work
    // ========================

    /// Apply a validated transaction atomically: update the balance and
    /// read the resulting headroom in a single statement, append the log
    /// row, read the snapshot back, commit. Any failure rolls back.
    ///
    /// The update-and-return is one statement inside a write transaction,
    /// so two concurrent calls on the same account serialize; neither can
    /// observe a stale balance and both debits passing the headroom check
    /// when only one fits is impossible.
    pub async fn apply_transaction(
        &self,
        account_id: AccountId,
        transaction: &Transaction,
        occurred_at: DateTime<Utc>,
    ) -> Result<ApplyOutcome> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin unit of work")?;

        let row = sqlx::query(
            r#"
            UPDATE accounts
            SET balance = balance + ?, last_statement_at = ?
            WHERE id = ?
            RETURNING balance + credit_limit AS headroom
            "#,
        )
        .bind(transaction.signed_delta())
        .bind(occurred_at.to_rfc3339())
        .bind(account_id)
        .fetch_one(&mut *tx)
        .await
        .context("Failed to update account balance")?;

        let headroom: i64 = row.get("headroom");
        if headroom < 0 {
            tx.rollback()
                .await
                .context("Failed to roll back unit of work")?;
            return Ok(ApplyOutcome::LimitExceeded { headroom });
        }

        sqlx::query(
            r#"
            INSERT INTO transactions (account_id, amount, kind, description, occurred_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(account_id)
        .bind(transaction.amount)
        .bind(transaction.kind.as_str())
        .bind(&transaction.description)
        .bind(occurred_at.to_rfc3339())
        .execute(&mut *tx)
        .await
        .context("Failed to append transaction")?;

        let row = sqlx::query(
            r#"
            SELECT balance, credit_limit, last_statement_at
            FROM accounts
            WHERE id = ?
            "#,
        )
        .bind(account_id)
        .fetch_one(&mut *tx)
        .await
        .context("Failed to read back balance")?;
        let snapshot = Self::row_to_snapshot(&row)?;

        tx.commit().await.context("Failed to commit unit of work")?;
        Ok(ApplyOutcome::Committed(snapshot))
    }

    // ========================
    // Transaction log operations
    // ========================

    /// The most recent transactions for an account, newest first.
    /// The insertion id breaks ties between identical timestamps.
    pub async fn recent_transactions(
        &self,
        account_id: AccountId,
        limit: i64,
    ) -> Result<Vec<RecordedTransaction>> {
        let rows = sqlx::query(
            r#"
            SELECT amount, kind, description, occurred_at
            FROM transactions
            WHERE account_id = ?
            ORDER BY occurred_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(account_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list recent transactions")?;

        rows.iter().map(Self::row_to_transaction).collect()
    }

    fn row_to_account(row: &sqlx::sqlite::SqliteRow) -> Result<Account> {
        Ok(Account {
            id: row.get("id"),
            balance: row.get("balance"),
            limit: row.get("credit_limit"),
            last_statement_at: Self::parse_timestamp(row.get("last_statement_at"))?,
        })
    }

    fn row_to_snapshot(row: &sqlx::sqlite::SqliteRow) -> Result<BalanceSnapshot> {
        Ok(BalanceSnapshot {
            balance: row.get("balance"),
            limit: row.get("credit_limit"),
            last_statement_at: Self::parse_timestamp(row.get("last_statement_at"))?,
        })
    }

    fn row_to_transaction(row: &sqlx::sqlite::SqliteRow) -> Result<RecordedTransaction> {
        let kind_str: String = row.get("kind");

        Ok(RecordedTransaction {
            amount: row.get("amount"),
            kind: TransactionKind::from_str(&kind_str)
                .ok_or_else(|| anyhow::anyhow!("Invalid transaction kind: {}", kind_str))?,
            description: row.get("description"),
            occurred_at: Self::parse_timestamp(row.get("occurred_at"))?,
        })
    }

    fn parse_timestamp(raw: String) -> Result<DateTime<Utc>> {
        Ok(DateTime::parse_from_rfc3339(&raw)
            .context("Invalid timestamp")?
            .with_timezone(&Utc))
    }
}
