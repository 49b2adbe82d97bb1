use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::db::StoreError;
use crate::models::ValidationError;

/// Errors a handler can return. Each maps to one status code and a
/// `{"error": ...}` body.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Player not found")]
    PlayerNotFound,
    #[error("Not found")]
    RouteNotFound,
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Username already exists")]
    DuplicateUsername,
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::PlayerNotFound | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::DuplicateUsername => StatusCode::CONFLICT,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match &self {
            ApiError::Database(err) => {
                // Driver details stay in the logs.
                tracing::error!("Database error: {}", err);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

/// Gives error responses built outside the handlers (request timeouts,
/// body size limits) the same `{"error": ...}` body as `ApiError`.
pub async fn json_error_body(response: Response) -> Response {
    let status = response.status();
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .is_some_and(|value| value.as_bytes().starts_with(b"application/json"));

    if is_json || !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let error = status
        .canonical_reason()
        .unwrap_or("Request failed")
        .to_string();
    (status, Json(ErrorResponse { error })).into_response()
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateUsername => ApiError::DuplicateUsername,
            StoreError::Database(err) => ApiError::Database(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(ApiError::from(ValidationError::MissingData).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::PlayerNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::from(StoreError::DuplicateUsername).status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::from(StoreError::Database(sqlx::Error::PoolTimedOut)).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn bare_error_responses_get_json_bodies() {
        let response = json_error_body(StatusCode::REQUEST_TIMEOUT.into_response()).await;
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[tokio::test]
    async fn json_and_success_responses_pass_through() {
        let response = json_error_body(ApiError::PlayerNotFound.into_response()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = json_error_body("ok".into_response()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
    }

    #[test]
    fn validation_message_passes_through() {
        let err = ApiError::from(ValidationError::InvalidKdRatio);
        assert_eq!(err.to_string(), "kd_ratio must be a valid number");
    }
}
