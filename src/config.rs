use std::env;

/// Runtime configuration, read from the environment with documented
/// defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// sqlx connection string for the ledger database.
    /// Override with `SALDO_DATABASE_URL`.
    pub database_url: String,
    /// Address the HTTP server binds to.
    /// Override with `SALDO_LISTEN_ADDRESS`.
    pub listen_address: String,
}

pub const DEFAULT_DATABASE_URL: &str = "sqlite:saldo.db?mode=rwc";
pub const DEFAULT_LISTEN_ADDRESS: &str = "0.0.0.0:8080";

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env_or("SALDO_DATABASE_URL", DEFAULT_DATABASE_URL),
            listen_address: env_or("SALDO_LISTEN_ADDRESS", DEFAULT_LISTEN_ADDRESS),
        }
    }
}

fn env_or(key: &str, fallback: &str) -> String {
    env::var(key).unwrap_or_else(|_| fallback.to_string())
}
