mod common;

use std::sync::Arc;

use anyhow::Result;
use common::{draft, test_service};
use saldo::application::AppError;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_debits_never_breach_the_limit() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let service = Arc::new(service);

    // Account 1 has a 100000 limit; at most 3 of these 8 debits fit.
    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service.post_transaction(1, draft(30000.0, "debit", "debit")).await
        }));
    }

    let mut committed = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await? {
            Ok(snapshot) => {
                assert!(snapshot.balance + snapshot.limit >= 0);
                committed += 1;
            }
            Err(AppError::LimitExceeded { .. }) => rejected += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(committed, 3);
    assert_eq!(rejected, 5);

    // Final balance reflects exactly the committed debits, and only those
    // appear in the log.
    let statement = service.statement(1).await?;
    assert_eq!(statement.balance.balance, -90000);
    assert_eq!(statement.recent_transactions.len(), 3);
    assert!(statement.balance.balance + statement.balance.limit >= 0);

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_mixed_transactions_serialize() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let service = Arc::new(service);

    // Interleaved credits and debits on account 3 (limit 1000000). All
    // fit within the limit, so every one must commit exactly once.
    let mut handles = Vec::new();
    for i in 0..20 {
        let service = service.clone();
        let kind = if i % 2 == 0 { "credit" } else { "debit" };
        handles.push(tokio::spawn(async move {
            service.post_transaction(3, draft(1000.0, kind, "mixed")).await
        }));
    }

    for handle in handles {
        handle.await??;
    }

    // 10 credits and 10 debits of equal size cancel out.
    let statement = service.statement(3).await?;
    assert_eq!(statement.balance.balance, 0);
    assert_eq!(statement.recent_transactions.len(), 10);

    Ok(())
}
