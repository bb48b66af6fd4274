// Authentication service - business logic layer

use tracing::{debug, info};
use validator::Validate;

use crate::auth::{
    error::AuthError,
    models::{CurrentUser, SignInRequest, SignUpRequest, TokenResponse, UserResponse},
    password::PasswordService,
    repository::{SessionRepository, UserRepository},
    token::TokenService,
};
use crate::validation::validation_message;

/// Client context captured alongside a session row
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

/// Authentication service coordinating accounts, sessions and tokens
#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    session_repo: SessionRepository,
    token_service: TokenService,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        session_repo: SessionRepository,
        token_service: TokenService,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            token_service,
        }
    }

    /// Register a new account.
    ///
    /// All field validation happens before any write; the duplicate-email
    /// check rides on the unique constraint so two concurrent sign-ups
    /// cannot both succeed.
    pub async fn sign_up(&self, request: SignUpRequest) -> Result<UserResponse, AuthError> {
        request
            .validate()
            .map_err(|e| AuthError::ValidationError(validation_message(&e)))?;

        let email = request.email.unwrap_or_default();
        let password = request.password.unwrap_or_default();
        let name = request.name.unwrap_or_default();

        let password_hash = PasswordService::hash_password(&password)?;
        let user = self
            .user_repo
            .create_user(&email, &password_hash, &name)
            .await?;

        info!("registered account {} ({})", user.id, user.email);
        Ok(user.into())
    }

    /// Authenticate credentials and issue a token pair, overwriting the
    /// account's session row with the new refresh-token hash.
    pub async fn sign_in(
        &self,
        request: SignInRequest,
        client: ClientInfo,
    ) -> Result<TokenResponse, AuthError> {
        request
            .validate()
            .map_err(|e| AuthError::ValidationError(validation_message(&e)))?;

        let email = request.email.unwrap_or_default();
        let password = request.password.unwrap_or_default();

        // One shared error for unknown email and wrong password
        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !PasswordService::verify_password(&password, &user.password_hash)? {
            debug!("password mismatch for account {}", user.id);
            return Err(AuthError::InvalidCredentials);
        }

        let tokens = self.issue_session(user.id, &client).await?;
        info!("account {} signed in", user.id);
        Ok(tokens)
    }

    /// Rotate the caller's token pair. The session row is overwritten, so
    /// the previous refresh token stops matching immediately.
    pub async fn renew(
        &self,
        user_id: i32,
        client: ClientInfo,
    ) -> Result<TokenResponse, AuthError> {
        let tokens = self.issue_session(user_id, &client).await?;
        debug!("rotated session for account {}", user_id);
        Ok(tokens)
    }

    /// Drop the caller's session row
    pub async fn sign_out(&self, user_id: i32) -> Result<(), AuthError> {
        self.session_repo.revoke(user_id).await?;
        info!("account {} signed out", user_id);
        Ok(())
    }

    /// Current account summary for GET /users
    pub async fn current_user(&self, user_id: i32) -> Result<UserResponse, AuthError> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::AccountNotFound)?;
        Ok(user.into())
    }

    /// Resolve an access token to the account it names
    pub async fn authenticate_access_token(&self, token: &str) -> Result<CurrentUser, AuthError> {
        let claims = self.token_service.validate_access_token(token)?;
        let user = self
            .user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AuthError::AccountNotFound)?;
        Ok(user.into())
    }

    /// Resolve a refresh token to the account it names, additionally
    /// requiring that it matches the account's stored session hash.
    pub async fn authenticate_refresh_token(&self, token: &str) -> Result<CurrentUser, AuthError> {
        let claims = self.token_service.validate_refresh_token(token)?;
        let user = self
            .user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        if !self.session_repo.verify(user.id, token).await? {
            return Err(AuthError::RevokedToken);
        }

        Ok(user.into())
    }

    async fn issue_session(
        &self,
        user_id: i32,
        client: &ClientInfo,
    ) -> Result<TokenResponse, AuthError> {
        let (access_token, refresh_token) = self.token_service.generate_token_pair(user_id)?;

        self.session_repo
            .save(
                user_id,
                &refresh_token,
                client.ip.as_deref(),
                client.user_agent.as_deref(),
            )
            .await?;

        Ok(TokenResponse {
            access_token,
            refresh_token,
        })
    }
}
