use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use inkpost_core::DomainError;
use inkpost_infra::BlogStoreError;

pub fn store_error_to_response(err: BlogStoreError) -> axum::response::Response {
    match err {
        BlogStoreError::Domain(DomainError::Validation(msg)) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        BlogStoreError::Domain(DomainError::InvalidId(msg)) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_id", msg)
        }
        BlogStoreError::Domain(DomainError::NotFound) => {
            json_error(StatusCode::NOT_FOUND, "not_found", "not found")
        }
        BlogStoreError::Database(e) => {
            tracing::error!(error = %e, "blog store query failed");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", "storage failure")
        }
        BlogStoreError::Unavailable(msg) => {
            tracing::error!(reason = %msg, "blog store unavailable");
            json_error(StatusCode::SERVICE_UNAVAILABLE, "store_unavailable", "storage unavailable")
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
