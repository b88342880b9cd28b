// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use saldo::application::LedgerService;
use saldo::domain::TransactionDraft;
use tempfile::TempDir;

/// Helper to create a test service with a temporary database, migrated
/// and seeded with the standing accounts (account 1 has limit 100000).
pub async fn test_service() -> Result<(LedgerService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let db_url = format!("sqlite:{}?mode=rwc", db_path.to_str().unwrap());
    let service = LedgerService::init(&db_url).await?;
    Ok((service, temp_dir))
}

/// Helper to build a transaction draft.
pub fn draft(amount: f64, kind: &str, description: &str) -> TransactionDraft {
    TransactionDraft {
        amount,
        kind: kind.to_string(),
        description: description.to_string(),
    }
}
