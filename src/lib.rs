pub mod application;
pub mod config;
pub mod domain;
pub mod http;
pub mod storage;

pub use application::{AppError, LedgerService};
pub use domain::*;
pub use storage::Repository;
