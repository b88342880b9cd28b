use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::application::LedgerService;
use crate::domain::AccountId;

use super::{dto, errors};

pub async fn post_transaction(
    Extension(service): Extension<Arc<LedgerService>>,
    Path(account_id): Path<AccountId>,
    body: Result<Json<dto::TransactionRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejecting malformed transaction body");
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "Could not parse the transaction body",
            );
        }
    };

    match service
        .post_transaction(account_id, request.into_draft())
        .await
    {
        Ok(snapshot) => {
            (StatusCode::OK, Json(dto::TransactionResponse::from(snapshot))).into_response()
        }
        Err(err) => errors::app_error_to_response(err),
    }
}

pub async fn get_statement(
    Extension(service): Extension<Arc<LedgerService>>,
    Path(account_id): Path<AccountId>,
) -> Response {
    match service.statement(account_id).await {
        Ok(statement) => {
            (StatusCode::OK, Json(dto::StatementResponse::from(statement))).into_response()
        }
        Err(err) => errors::app_error_to_response(err),
    }
}

/// Liveness probe with a static payload.
pub async fn health() -> Response {
    (
        StatusCode::OK,
        Json(json!({ "status": 200, "message": "up" })),
    )
        .into_response()
}
