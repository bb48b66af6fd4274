// JWT token generation and validation service

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::auth::error::AuthError;

/// Access tokens live 12 hours
const ACCESS_TOKEN_DURATION_SECS: i64 = 12 * 60 * 60;
/// Refresh tokens live 7 days
const REFRESH_TOKEN_DURATION_SECS: i64 = 7 * 24 * 60 * 60;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32, // account id
    pub iat: i64,
    pub exp: i64,
}

/// Token service for JWT operations.
///
/// Access and refresh tokens are signed with separate symmetric secrets so a
/// refresh token can never pass an access-token check or vice versa.
#[derive(Clone)]
pub struct TokenService {
    access_secret: String,
    refresh_secret: String,
}

impl TokenService {
    pub fn new(access_secret: String, refresh_secret: String) -> Self {
        Self {
            access_secret,
            refresh_secret,
        }
    }

    /// Generate an access token (12 hours)
    pub fn generate_access_token(&self, user_id: i32) -> Result<String, AuthError> {
        Self::sign(user_id, ACCESS_TOKEN_DURATION_SECS, &self.access_secret)
    }

    /// Generate a refresh token (7 days)
    pub fn generate_refresh_token(&self, user_id: i32) -> Result<String, AuthError> {
        Self::sign(user_id, REFRESH_TOKEN_DURATION_SECS, &self.refresh_secret)
    }

    /// Generate both access and refresh tokens
    pub fn generate_token_pair(&self, user_id: i32) -> Result<(String, String), AuthError> {
        let access_token = self.generate_access_token(user_id)?;
        let refresh_token = self.generate_refresh_token(user_id)?;
        Ok((access_token, refresh_token))
    }

    /// Validate an access token
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        Self::verify(token, &self.access_secret)
    }

    /// Validate a refresh token
    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, AuthError> {
        Self::verify(token, &self.refresh_secret)
    }

    fn sign(user_id: i32, duration_secs: i64, secret: &str) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            iat: now,
            exp: now + duration_secs,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenGenerationError(e.to_string()))
    }

    fn verify(token: &str, secret: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_token_service() -> TokenService {
        TokenService::new(
            "access_secret_for_tests".to_string(),
            "refresh_secret_for_tests".to_string(),
        )
    }

    #[test]
    fn test_access_token_expiration_is_12_hours() {
        let service = test_token_service();
        let token = service.generate_access_token(1).unwrap();
        let claims = service.validate_access_token(&token).unwrap();
        assert_eq!(claims.exp - claims.iat, 43200);
    }

    #[test]
    fn test_refresh_token_expiration_is_7_days() {
        let service = test_token_service();
        let token = service.generate_refresh_token(1).unwrap();
        let claims = service.validate_refresh_token(&token).unwrap();
        assert_eq!(claims.exp - claims.iat, 604800);
    }

    #[test]
    fn test_claims_carry_the_account_id() {
        let service = test_token_service();
        let token = service.generate_access_token(42).unwrap();
        let claims = service.validate_access_token(&token).unwrap();
        assert_eq!(claims.sub, 42);
    }

    #[test]
    fn test_token_pair_is_two_distinct_tokens() {
        let service = test_token_service();
        let (access, refresh) = service.generate_token_pair(1).unwrap();
        assert_ne!(access, refresh);
        assert!(service.validate_access_token(&access).is_ok());
        assert!(service.validate_refresh_token(&refresh).is_ok());
    }

    #[test]
    fn test_tokens_do_not_cross_secrets() {
        let service = test_token_service();
        let (access, refresh) = service.generate_token_pair(1).unwrap();
        assert!(service.validate_access_token(&refresh).is_err());
        assert!(service.validate_refresh_token(&access).is_err());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let service = test_token_service();
        let other = TokenService::new("different".to_string(), "secrets".to_string());
        let token = service.generate_access_token(1).unwrap();
        assert!(matches!(
            other.validate_access_token(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token_is_distinguished_from_invalid() {
        let service = test_token_service();

        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            iat: now - 1000,
            exp: now - 500,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("access_secret_for_tests".as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            service.validate_access_token(&token),
            Err(AuthError::ExpiredToken)
        ));
        assert!(matches!(
            service.validate_access_token("not.a.token"),
            Err(AuthError::InvalidToken)
        ));
    }

    proptest! {
        #[test]
        fn prop_claims_round_trip(user_id in 1i32..1000000) {
            let service = test_token_service();
            let token = service.generate_access_token(user_id)?;
            let claims = service.validate_access_token(&token)?;
            prop_assert_eq!(claims.sub, user_id);
        }

        #[test]
        fn prop_malformed_tokens_rejected(malformed in "[a-zA-Z0-9]{10,50}") {
            let service = test_token_service();
            prop_assert!(service.validate_access_token(&malformed).is_err());
            prop_assert!(service.validate_refresh_token(&malformed).is_err());
        }
    }
}
