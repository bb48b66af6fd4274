// HTTP handlers for authentication endpoints

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, State},
    http::{header, HeaderMap, StatusCode},
    Extension, Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;

use crate::auth::{
    error::AuthError,
    middleware::{clear_token_cookies, token_cookies},
    models::{CurrentUser, SignInRequest, SignUpRequest, TokenResponse, UserResponse},
    service::ClientInfo,
};
use crate::AppState;

/// Register a new account
/// POST /auth/sign-up
#[utoipa::path(
    post,
    path = "/auth/sign-up",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Validation failure or duplicate email", body = String,
            example = json!({"message": "email is required"}))
    ),
    tag = "auth"
)]
pub async fn sign_up_handler(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AuthError> {
    let user = state.auth_service.sign_up(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Authenticate and receive a token pair (also set as bearer cookies)
/// POST /auth/sign-in
#[utoipa::path(
    post,
    path = "/auth/sign-in",
    request_body = SignInRequest,
    responses(
        (status = 201, description = "Tokens issued", body = TokenResponse),
        (status = 400, description = "Invalid credentials", body = String,
            example = json!({"message": "Invalid email or password"}))
    ),
    tag = "auth"
)]
pub async fn sign_in_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    addr: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    Json(request): Json<SignInRequest>,
) -> Result<(StatusCode, CookieJar, Json<TokenResponse>), AuthError> {
    let client = client_info(addr.as_ref(), &headers);
    let tokens = state.auth_service.sign_in(request, client).await?;

    let jar = token_cookies(jar, &tokens.access_token, &tokens.refresh_token);
    Ok((StatusCode::CREATED, jar, Json(tokens)))
}

/// Rotate the access/refresh token pair
/// PATCH /auth/renew (refresh credential required)
#[utoipa::path(
    patch,
    path = "/auth/renew",
    responses(
        (status = 200, description = "Tokens rotated", body = TokenResponse),
        (status = 401, description = "Missing, invalid, expired or revoked credential", body = String,
            example = json!({"message": "Authentication credentials have expired"}))
    ),
    tag = "auth"
)]
pub async fn renew_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    jar: CookieJar,
    addr: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
) -> Result<(CookieJar, Json<TokenResponse>), AuthError> {
    let client = client_info(addr.as_ref(), &headers);
    let tokens = state.auth_service.renew(user.id, client).await?;

    let jar = token_cookies(jar, &tokens.access_token, &tokens.refresh_token);
    Ok((jar, Json(tokens)))
}

/// Revoke the session and clear both token cookies
/// POST|DELETE /auth/sign-out (refresh credential required)
#[utoipa::path(
    post,
    path = "/auth/sign-out",
    responses(
        (status = 200, description = "Session revoked", body = String,
            example = json!({"id": 1})),
        (status = 401, description = "Missing, invalid, expired or revoked credential", body = String,
            example = json!({"message": "Authentication credentials are missing"}))
    ),
    tag = "auth"
)]
pub async fn sign_out_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<serde_json::Value>), AuthError> {
    state.auth_service.sign_out(user.id).await?;

    let jar = clear_token_cookies(jar);
    Ok((jar, Json(json!({ "id": user.id }))))
}

/// Current account profile
/// GET /users (access credential required)
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Account profile", body = UserResponse),
        (status = 401, description = "Missing, invalid or expired credential", body = String,
            example = json!({"message": "Authentication credentials are missing"}))
    ),
    tag = "users"
)]
pub async fn me_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<UserResponse>, AuthError> {
    let user = state.auth_service.current_user(user.id).await?;
    Ok(Json(user))
}

fn client_info(addr: Option<&ConnectInfo<SocketAddr>>, headers: &HeaderMap) -> ClientInfo {
    ClientInfo {
        ip: addr.map(|ConnectInfo(addr)| addr.ip().to_string()),
        user_agent: headers
            .get(header::USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
    }
}
