// Authentication and authorization error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;
use tracing::{error, warn};

use crate::auth::models::Role;

/// Authentication and authorization error types
#[derive(Debug)]
pub enum AuthError {
    /// Missing or malformed request field
    ValidationError(String),
    /// Unknown email or wrong password at sign-in
    InvalidCredentials,
    /// Token failed signature or structural checks
    InvalidToken,
    /// Token signature is valid but the expiry has passed
    ExpiredToken,
    /// No bearer credential was supplied at all
    MissingToken,
    /// Credential was supplied with a non-Bearer scheme
    UnsupportedScheme,
    /// Token payload points at an account that no longer exists
    AccountNotFound,
    /// Refresh token does not match the stored session hash
    RevokedToken,
    /// Email is already registered
    EmailAlreadyExists,
    /// Caller's role is not in the allowed set for the route
    InsufficientRole { actual: Role },
    DatabaseError(String),
    PasswordHashError,
    TokenGenerationError(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::ValidationError(msg) => write!(f, "{}", msg),
            AuthError::InvalidCredentials => write!(f, "Invalid email or password"),
            AuthError::InvalidToken => write!(f, "Authentication credentials are invalid"),
            AuthError::ExpiredToken => write!(f, "Authentication credentials have expired"),
            AuthError::MissingToken => write!(f, "Authentication credentials are missing"),
            AuthError::UnsupportedScheme => write!(f, "Unsupported authentication scheme"),
            AuthError::AccountNotFound => {
                write!(f, "No account matches the provided credentials")
            }
            AuthError::RevokedToken => {
                write!(f, "Authentication credentials have been revoked")
            }
            AuthError::EmailAlreadyExists => write!(f, "Email is already registered"),
            AuthError::InsufficientRole { actual } => {
                write!(f, "Role '{}' is not permitted here", actual)
            }
            AuthError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AuthError::PasswordHashError => write!(f, "Password hashing error"),
            AuthError::TokenGenerationError(msg) => write!(f, "Token generation error: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

impl AuthError {
    /// HTTP status for this error.
    ///
    /// Duplicate email maps to 400 rather than 409: the sign-up contract
    /// treats it as one more validation failure of the submitted form.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AuthError::EmailAlreadyExists => StatusCode::BAD_REQUEST,
            AuthError::InvalidToken
            | AuthError::ExpiredToken
            | AuthError::MissingToken
            | AuthError::UnsupportedScheme
            | AuthError::AccountNotFound
            | AuthError::RevokedToken => StatusCode::UNAUTHORIZED,
            AuthError::InsufficientRole { .. } => StatusCode::FORBIDDEN,
            AuthError::DatabaseError(_)
            | AuthError::PasswordHashError
            | AuthError::TokenGenerationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Internal variants are masked.
    pub fn message(&self) -> String {
        match self {
            AuthError::DatabaseError(_)
            | AuthError::PasswordHashError
            | AuthError::TokenGenerationError(_) => {
                "An unexpected error occurred. Please contact the administrator.".to_string()
            }
            AuthError::InsufficientRole { .. } => {
                "You do not have permission to access this resource".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match &self {
            AuthError::DatabaseError(msg) => error!("database error in auth: {}", msg),
            AuthError::PasswordHashError => error!("password hashing failed"),
            AuthError::TokenGenerationError(msg) => error!("token generation failed: {}", msg),
            AuthError::InvalidToken
            | AuthError::ExpiredToken
            | AuthError::MissingToken
            | AuthError::UnsupportedScheme
            | AuthError::AccountNotFound
            | AuthError::RevokedToken => warn!("rejected credential: {}", self),
            AuthError::InsufficientRole { actual } => {
                warn!("authorization failed for role '{}'", actual)
            }
            _ => {}
        }

        let body = Json(json!({ "message": self.message() }));
        (self.status_code(), body).into_response()
    }
}
