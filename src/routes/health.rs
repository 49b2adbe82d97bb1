use axum::{http::StatusCode, response::Json};

use crate::models::HealthResponse;

pub async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    (StatusCode::OK, Json(HealthResponse { status: "healthy" }))
}
