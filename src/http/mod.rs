//! HTTP surface (Axum router + handlers).
//!
//! - `routes.rs`: one handler per endpoint
//! - `dto.rs`: request/response DTOs and JSON field mapping
//! - `errors.rs`: consistent `{error, status}` error responses

use std::sync::Arc;

use axum::{
    Extension, Router,
    routing::{get, post},
};

use crate::application::LedgerService;

pub mod dto;
pub mod errors;
pub mod routes;

/// Build the full router with the ledger service injected
/// (public entrypoint used by `main.rs` and the black-box tests).
pub fn build_router(service: Arc<LedgerService>) -> Router {
    Router::new()
        .route("/accounts/:id/transactions", post(routes::post_transaction))
        .route("/accounts/:id/statement", get(routes::get_statement))
        .route("/_health", get(routes::health))
        .layer(Extension(service))
}
