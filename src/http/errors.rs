use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::application::AppError;

/// Map a ledger error to its response. Storage failures are logged and
/// replaced by a generic message; driver details never reach the wire.
pub fn app_error_to_response(err: AppError) -> Response {
    match err {
        AppError::AccountNotFound(_) => json_error(StatusCode::NOT_FOUND, err.to_string()),
        AppError::Validation(_) | AppError::LimitExceeded { .. } => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
        }
        AppError::Timeout => {
            tracing::warn!("ledger operation timed out");
            json_error(StatusCode::BAD_REQUEST, "Error processing the transaction")
        }
        AppError::Database(inner) => {
            tracing::error!(error = %inner, "storage failure");
            json_error(StatusCode::BAD_REQUEST, "Error processing the transaction")
        }
    }
}

/// A `{error, status}` JSON body with the matching status code.
pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": message.into(),
            "status": status.as_u16(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ValidationError;

    #[test]
    fn test_every_error_maps_to_one_status() {
        let cases = [
            (AppError::AccountNotFound(1), StatusCode::NOT_FOUND),
            (
                AppError::Validation(ValidationError::NegativeAmount(-1.0)),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::LimitExceeded {
                    account_id: 1,
                    headroom: -2,
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (AppError::Timeout, StatusCode::BAD_REQUEST),
            (
                AppError::Database(anyhow::anyhow!("connection reset")),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (err, expected) in cases {
            let response = app_error_to_response(err);
            assert_eq!(response.status(), expected);
        }
    }
}
