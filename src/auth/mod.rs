// Authentication module
// JWT-based authentication: registration, sign-in, session rotation,
// sign-out, plus the access/refresh middlewares and the role guard.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

pub use error::AuthError;
pub use middleware::{require_access_token, require_refresh_token, RequireRoles};
pub use models::{CurrentUser, Role};
pub use service::AuthService;
pub use token::TokenService;
