use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use llm_client::LlmError;
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Llm(LlmError::MissingApiKey) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Llm(LlmError::Timeout) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Llm(LlmError::QuotaExceeded(_)) => StatusCode::TOO_MANY_REQUESTS,
            AppError::Llm(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::NotFound(msg) | AppError::InvalidInput(msg) => msg,
            other => {
                tracing::error!(error = %other, "Request failed");
                other.to_string()
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
