use axum::Router;
use axum::extract::Path;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use fx_ratelimit::RateLimiter;
use fx_store::DateRates;

use crate::error::ServeError;
use crate::state::AppState;

/// Build the service router.
///
/// Only `GET /:date` and `GET /:date/:currency` are routable; every other
/// path shape or method is a 400. The admission layer wraps the fallback
/// too, so an over-limit caller sees 429 before any path validation.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/:date", get(date_rates).fallback(invalid_url))
        .route("/:date/:currency", get(currency_rate).fallback(invalid_url))
        .fallback(invalid_url)
        .layer(middleware::from_fn_with_state(state.clone(), admission))
        .with_state(state)
}

/// Rate-limit check ahead of all request processing
async fn admission(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if state.limiter.try_acquire_one().is_err() {
        tracing::debug!("Rejected {} {}: rate limit exceeded", request.method(), request.uri().path());
        return ServeError::RateLimited.into_response();
    }

    next.run(request).await
}

/// `GET /:date` - every rate quoted for the date
async fn date_rates(State(state): State<AppState>, Path(date): Path<String>) -> Result<Response, ServeError> {
    let rates = state.table.get(&date, None)?;
    json_response(&rates)
}

/// `GET /:date/:currency` - a single rate, currency matched case-insensitively
async fn currency_rate(
    State(state): State<AppState>,
    Path((date, currency)): Path<(String, String)>,
) -> Result<Response, ServeError> {
    let rates = state.table.get(&date, Some(&currency))?;
    json_response(&rates)
}

async fn invalid_url() -> ServeError {
    ServeError::InvalidPath
}

/// Serialize before building the response so an encoding failure becomes a
/// clean 500 instead of a half-written JSON body.
fn json_response(rates: &DateRates) -> Result<Response, ServeError> {
    let body = serde_json::to_string(rates)?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
