use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use fx_store::LookupError;
use thiserror::Error;

/// Per-request failures. Each converts to exactly one terminal HTTP
/// response; nothing here is retried or treated as fatal.
#[derive(Error, Debug)]
pub enum ServeError {
    #[error("rate limit exceeded")]
    RateLimited,

    #[error("request path is not /[date] or /[date]/[currency]")]
    InvalidPath,

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("failed to encode response body: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ServeError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, "Too many requests. Please try again later."),
            ServeError::InvalidPath => (StatusCode::BAD_REQUEST, "Invalid URL format. Use /[date]/[currency] or /[date]"),
            ServeError::Lookup(LookupError::DateNotFound(_)) => {
                (StatusCode::NOT_FOUND, "Exchange rates not found for the specified date")
            }
            ServeError::Lookup(LookupError::CurrencyNotFound(_)) => {
                (StatusCode::NOT_FOUND, "Currency not found for the specified date")
            }
            ServeError::Encoding(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to encode response"),
        };

        (status, body).into_response()
    }
}
