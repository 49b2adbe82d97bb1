pub mod health;
pub mod players;

use crate::error::ApiError;

/// Fallback for paths no route matches.
pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}

/// Fallback for known paths hit with an unsupported method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
