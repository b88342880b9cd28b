mod common;

use anyhow::Result;
use chrono::Utc;
use common::{draft, test_service};
use saldo::domain::{Transaction, TransactionKind};
use saldo::storage::Repository;

#[tokio::test]
async fn test_statement_of_fresh_account_is_empty() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let statement = service.statement(1).await?;
    assert_eq!(statement.balance.balance, 0);
    assert_eq!(statement.balance.limit, 100000);
    assert!(statement.recent_transactions.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_statement_window_is_ten_newest_first() -> Result<()> {
    let (service, _temp) = test_service().await?;

    // Distinct amounts so ordering is observable.
    for amount in 1..=12 {
        service
            .post_transaction(3, draft(f64::from(amount), "credit", "filler"))
            .await?;
    }

    let statement = service.statement(3).await?;
    assert_eq!(statement.recent_transactions.len(), 10);

    // Newest first: amounts 12 down to 3.
    let amounts: Vec<i64> = statement
        .recent_transactions
        .iter()
        .map(|transaction| transaction.amount)
        .collect();
    assert_eq!(amounts, (3..=12).rev().collect::<Vec<i64>>());

    Ok(())
}

#[tokio::test]
async fn test_identical_timestamps_break_ties_by_insertion_order() -> Result<()> {
    let temp_dir = tempfile::TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let db_url = format!("sqlite:{}?mode=rwc", db_path.to_str().unwrap());
    let repo = Repository::init(&db_url).await?;

    // Apply three transactions carrying the exact same timestamp.
    let occurred_at = Utc::now();
    for (amount, description) in [(1, "first"), (2, "second"), (3, "third")] {
        let transaction = Transaction {
            amount,
            kind: TransactionKind::Credit,
            description: description.to_string(),
        };
        repo.apply_transaction(1, &transaction, occurred_at).await?;
    }

    // Newest-first stays deterministic: later insertions win the tie.
    let recent = repo.recent_transactions(1, 10).await?;
    let descriptions: Vec<&str> = recent
        .iter()
        .map(|transaction| transaction.description.as_str())
        .collect();
    assert_eq!(descriptions, ["third", "second", "first"]);
    assert!(recent.iter().all(|t| t.occurred_at == occurred_at));

    Ok(())
}

#[tokio::test]
async fn test_statement_read_is_idempotent() -> Result<()> {
    let (service, _temp) = test_service().await?;

    service.post_transaction(1, draft(500.0, "credit", "salary")).await?;
    service.post_transaction(1, draft(200.0, "debit", "rent")).await?;

    let first = service.statement(1).await?;
    let second = service.statement(1).await?;

    // The attached timestamp is call time, so compare everything else.
    assert_eq!(first.balance.balance, second.balance.balance);
    assert_eq!(first.balance.limit, second.balance.limit);
    assert_eq!(first.recent_transactions, second.recent_transactions);

    Ok(())
}

#[tokio::test]
async fn test_statement_entries_carry_kind_and_description() -> Result<()> {
    let (service, _temp) = test_service().await?;

    service.post_transaction(1, draft(500.0, "credit", "  salary ")).await?;
    service.post_transaction(1, draft(200.0, "DEBIT", "rent")).await?;

    let statement = service.statement(1).await?;
    assert_eq!(statement.recent_transactions.len(), 2);

    let newest = &statement.recent_transactions[0];
    assert_eq!(newest.kind, TransactionKind::Debit);
    assert_eq!(newest.description, "rent");

    let oldest = &statement.recent_transactions[1];
    assert_eq!(oldest.kind, TransactionKind::Credit);
    // Stored after trimming.
    assert_eq!(oldest.description, "salary");

    Ok(())
}

#[tokio::test]
async fn test_rerunning_migrations_is_idempotent() -> Result<()> {
    let temp_dir = tempfile::TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let db_url = format!("sqlite:{}?mode=rwc", db_path.to_str().unwrap());

    let service = saldo::application::LedgerService::init(&db_url).await?;
    service.post_transaction(1, draft(100.0, "credit", "before")).await?;
    service.close().await;

    // Re-opening runs the migrations again; the seed must not reset
    // balances or duplicate rows.
    let service = saldo::application::LedgerService::init(&db_url).await?;
    let statement = service.statement(1).await?;
    assert_eq!(statement.balance.balance, 100);
    assert_eq!(statement.recent_transactions.len(), 1);

    Ok(())
}
