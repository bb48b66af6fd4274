// Authentication middleware for protected routes
//
// Two token-validating middlewares share one bearer extractor; on success
// the resolved account is inserted into request extensions as CurrentUser.
// The role guard runs after one of them and only reads that extension.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use tracing::{debug, warn};

use crate::auth::{
    error::AuthError,
    models::{CurrentUser, Role},
};
use crate::AppState;

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";
const BEARER_PREFIX: &str = "Bearer ";

/// Pull a bearer token from the Authorization header, falling back to the
/// named cookie. Cookie values carry the same `Bearer ` prefix the header
/// does.
pub fn extract_bearer(
    headers: &HeaderMap,
    jar: &CookieJar,
    cookie_name: &str,
) -> Result<String, AuthError> {
    if let Some(authorization) = headers.get(header::AUTHORIZATION) {
        let authorization = authorization.to_str().map_err(|_| AuthError::InvalidToken)?;
        let token = authorization
            .strip_prefix(BEARER_PREFIX)
            .ok_or(AuthError::UnsupportedScheme)?;
        return Ok(token.to_string());
    }

    if let Some(cookie) = jar.get(cookie_name) {
        let token = cookie
            .value()
            .strip_prefix(BEARER_PREFIX)
            .ok_or(AuthError::UnsupportedScheme)?;
        return Ok(token.to_string());
    }

    Err(AuthError::MissingToken)
}

/// Validate the access token and attach the resolved account to the request
pub async fn require_access_token(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_bearer(request.headers(), &jar, ACCESS_TOKEN_COOKIE)?;
    let user = state.auth_service.authenticate_access_token(&token).await?;

    debug!("authenticated {} ({}) via access token", user.id, user.email);
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Validate the refresh token (signature, expiry, account, stored session
/// hash) and attach the resolved account to the request.
///
/// When the token is valid but its account no longer exists, the stale
/// refresh cookie is cleared on the rejection response.
pub async fn require_refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_bearer(request.headers(), &jar, REFRESH_TOKEN_COOKIE)?;

    match state.auth_service.authenticate_refresh_token(&token).await {
        Ok(user) => {
            debug!("authenticated {} ({}) via refresh token", user.id, user.email);
            request.extensions_mut().insert(user);
            Ok(next.run(request).await)
        }
        Err(AuthError::AccountNotFound) => {
            warn!("refresh token names a missing account, clearing cookie");
            let jar = jar.remove(expired_cookie(REFRESH_TOKEN_COOKIE));
            Ok((jar, AuthError::AccountNotFound).into_response())
        }
        Err(err) => Err(err),
    }
}

/// Role gate for routes behind the access-token middleware
#[derive(Debug, Clone)]
pub struct RequireRoles {
    allowed: &'static [Role],
}

impl RequireRoles {
    pub fn new(allowed: &'static [Role]) -> Self {
        Self { allowed }
    }

    pub fn applicant() -> Self {
        Self::new(&[Role::Applicant])
    }

    pub fn recruiter() -> Self {
        Self::new(&[Role::Recruiter])
    }

    /// Reject unless the attached account's role is in the allowed set
    pub async fn guard(self, request: Request, next: Next) -> Result<Response, AuthError> {
        let user = request
            .extensions()
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AuthError::MissingToken)?;

        self.check(&user)?;
        Ok(next.run(request).await)
    }

    fn check(&self, user: &CurrentUser) -> Result<(), AuthError> {
        if self.allowed.contains(&user.role) {
            Ok(())
        } else {
            Err(AuthError::InsufficientRole { actual: user.role })
        }
    }
}

/// Set both token cookies on a response jar
pub fn token_cookies(jar: CookieJar, access_token: &str, refresh_token: &str) -> CookieJar {
    jar.add(bearer_cookie(ACCESS_TOKEN_COOKIE, access_token))
        .add(bearer_cookie(REFRESH_TOKEN_COOKIE, refresh_token))
}

/// Clear both token cookies (sign-out)
pub fn clear_token_cookies(jar: CookieJar) -> CookieJar {
    jar.remove(expired_cookie(ACCESS_TOKEN_COOKIE))
        .remove(expired_cookie(REFRESH_TOKEN_COOKIE))
}

fn bearer_cookie(name: &'static str, token: &str) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, format!("{}{}", BEARER_PREFIX, token));
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie
}

fn expired_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, "");
    cookie.set_path("/");
    cookie
}
