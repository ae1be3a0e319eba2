//! Governor-based rate limiting for `/api`.
//!
//! The limiter is process-wide (not keyed by client) and travels to the
//! middleware as a request extension.

use std::num::NonZeroU32;
use std::sync::Arc;

use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use serde_json::json;

pub type SharedLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

pub const RATE_LIMITED: &str = "Quá nhiều yêu cầu, vui lòng thử lại sau";

/// Limiter allowing `requests_per_minute`; `None` when that is 0.
pub fn create_limiter(requests_per_minute: u32) -> Option<SharedLimiter> {
    let per_minute = NonZeroU32::new(requests_per_minute)?;
    Some(Arc::new(RateLimiter::direct(Quota::per_minute(per_minute))))
}

/// Returns 429 once the shared budget is exhausted.
pub async fn rate_limit_middleware(
    request: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let limiter = request.extensions().get::<SharedLimiter>().cloned();

    if let Some(limiter) = limiter {
        if limiter.check().is_err() {
            tracing::warn!(path = %request.uri().path(), "Rate limit exceeded");
            return Err((
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({"status": "error", "error": RATE_LIMITED})),
            )
                .into_response());
        }
    }

    Ok(next.run(request).await)
}
