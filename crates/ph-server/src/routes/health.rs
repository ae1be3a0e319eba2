//! Liveness probe.

use axum::Json;
use serde::Serialize;

pub const HEALTH_MESSAGE: &str = "Backend đang hoạt động";

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Backend is up", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".into(),
        message: HEALTH_MESSAGE.into(),
    })
}
