use thiserror::Error;

/// Errors that can occur when calling the language model
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("No API key configured for the language model")]
    MissingApiKey,

    #[error("Language model request timed out")]
    Timeout,

    #[error("Language model rejected the API key: {0}")]
    Authentication(String),

    #[error("Language model quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Language model returned status {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Invalid response from language model: {0}")]
    InvalidResponse(String),

    #[error("Failed to reach language model: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, LlmError>;

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_timeout() {
            LlmError::Timeout
        } else if err.is_decode() {
            LlmError::InvalidResponse(err.to_string())
        } else {
            LlmError::Transport(err.to_string())
        }
    }
}

/// Classify a non-success HTTP response from the model API.
///
/// Gemini reports a bad key as `400 INVALID_ARGUMENT` with an "API key"
/// message rather than a 401, so the body is inspected as well.
pub fn classify_status(status: u16, body: &str) -> LlmError {
    let message = body.trim().to_string();

    match status {
        401 | 403 => LlmError::Authentication(message),
        429 => LlmError::QuotaExceeded(message),
        400 if body.contains("API key") || body.contains("API_KEY_INVALID") => {
            LlmError::Authentication(message)
        }
        408 | 504 => LlmError::Timeout,
        _ if body.contains("RESOURCE_EXHAUSTED") => LlmError::QuotaExceeded(message),
        _ => LlmError::Upstream { status, message },
    }
}
