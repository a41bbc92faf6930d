use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use courier_order::OrderError;
use courier_quote::QuoteError;

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    NotFoundError(String),
    StorageError(String),
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            // Storage failures are reported to the caller as a failed request
            AppError::StorageError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        let msg = err.to_string();
        match err {
            OrderError::InvalidInput
            | OrderError::Quote(QuoteError::GeoParse { .. })
            | OrderError::InvalidOrderId(_) => AppError::ValidationError(msg),
            OrderError::Quote(QuoteError::Pricing(_)) => AppError::InternalServerError(msg),
            OrderError::NotFound(_) => AppError::NotFoundError(msg),
            OrderError::Storage(_) => AppError::StorageError(msg),
        }
    }
}
