mod repository;

pub use repository::*;

/// SQL migration for the initial schema
pub const MIGRATION_001_INITIAL: &str = include_str!("migrations/001_initial.sql");

/// SQL migration seeding the standing accounts
pub const MIGRATION_002_SEED_ACCOUNTS: &str = include_str!("migrations/002_seed_accounts.sql");
