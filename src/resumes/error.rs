use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Error types for resume operations
#[derive(Debug, thiserror::Error)]
pub enum ResumeError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Resume not found")]
    NotFound,

    #[error("Invalid status transition: {0}")]
    InvalidTransition(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<sqlx::Error> for ResumeError {
    fn from(err: sqlx::Error) -> Self {
        ResumeError::DatabaseError(err.to_string())
    }
}

impl IntoResponse for ResumeError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ResumeError::DatabaseError(msg) => {
                error!("database error in resumes: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred. Please contact the administrator.".to_string(),
                )
            }
            ResumeError::NotFound => (StatusCode::NOT_FOUND, "Resume not found".to_string()),
            ResumeError::InvalidTransition(msg) => (StatusCode::BAD_REQUEST, msg),
            ResumeError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({ "message": message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_detail_is_masked() {
        let response =
            ResumeError::DatabaseError("password authentication failed".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response = ResumeError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_transition_maps_to_400() {
        let response = ResumeError::InvalidTransition("same status".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
