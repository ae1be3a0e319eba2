//! Error-to-HTTP response conversion.
//!
//! Handlers return `Result<T, AppError>`. An [`AppError`] pairs a
//! [`ph_core::Error`] with the user-facing message of the operation that
//! failed, which is shown for server errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use ph_core::Error;

pub struct AppError {
    inner: Error,
    context: &'static str,
}

impl AppError {
    pub fn new(inner: Error, context: &'static str) -> Self {
        Self { inner, context }
    }

    /// Adapter for `map_err`: `.map_err(AppError::during(HOME_FAILED))`.
    pub fn during(context: &'static str) -> impl FnOnce(Error) -> Self {
        move |inner| Self::new(inner, context)
    }

    /// A 400 carrying `message` verbatim.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(Error::Validation(message.into()), "")
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.inner.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = if status.is_server_error() {
            tracing::error!(
                status = %status,
                error = %self.inner,
                "{}",
                self.context
            );
            json!({
                "status": "error",
                "error": self.context,
                "message": self.inner.to_string(),
            })
        } else {
            tracing::debug!(status = %status, error = %self.inner, "Request rejected");
            json!({
                "status": "error",
                "error": self.inner.to_string(),
            })
        };

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn not_found_produces_404() {
        let response = AppError::new(Error::movie_not_found(), "ignored").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["error"], "Không tìm thấy phim");
        assert!(body.get("message").is_none());
    }

    #[tokio::test]
    async fn bad_request_keeps_message() {
        let response = AppError::bad_request("Slug là bắt buộc").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Slug là bắt buộc");
    }

    #[tokio::test]
    async fn upstream_failure_uses_context() {
        let err = AppError::during("Không thể lấy danh sách phim")(Error::upstream("timeout"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Không thể lấy danh sách phim");
        assert_eq!(body["message"], "API Error: timeout");
    }
}
