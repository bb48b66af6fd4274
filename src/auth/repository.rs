// Database repositories for accounts and sessions

use sqlx::PgPool;

use crate::auth::{
    error::AuthError,
    models::{Session, UserWithProfile},
    password::PasswordService,
};

/// User repository for account and profile rows
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create an account and its profile in one transaction.
    /// The profile role defaults to APPLICANT at the schema level.
    pub async fn create_user(
        &self,
        email: &str,
        password_hash: &str,
        name: &str,
    ) -> Result<UserWithProfile, AuthError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        let (user_id,): (i32,) = sqlx::query_as(
            "INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING id",
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AuthError::EmailAlreadyExists;
                }
            }
            AuthError::DatabaseError(e.to_string())
        })?;

        sqlx::query("INSERT INTO user_profiles (user_id, name) VALUES ($1, $2)")
            .bind(user_id)
            .bind(name)
            .execute(&mut *tx)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        let user = Self::select_with_profile(&mut tx, user_id).await?;

        tx.commit()
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(user)
    }

    async fn select_with_profile(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user_id: i32,
    ) -> Result<UserWithProfile, AuthError> {
        sqlx::query_as::<_, UserWithProfile>(
            r#"
            SELECT u.id, u.email, u.password_hash, p.name, p.role, u.created_at, u.updated_at
            FROM users u
            JOIN user_profiles p ON p.user_id = u.id
            WHERE u.id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))
    }

    /// Find an account by email (case-insensitive), profile joined in
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserWithProfile>, AuthError> {
        sqlx::query_as::<_, UserWithProfile>(
            r#"
            SELECT u.id, u.email, u.password_hash, p.name, p.role, u.created_at, u.updated_at
            FROM users u
            JOIN user_profiles p ON p.user_id = u.id
            WHERE LOWER(u.email) = LOWER($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))
    }

    /// Find an account by id, profile joined in
    pub async fn find_by_id(&self, id: i32) -> Result<Option<UserWithProfile>, AuthError> {
        sqlx::query_as::<_, UserWithProfile>(
            r#"
            SELECT u.id, u.email, u.password_hash, p.name, p.role, u.created_at, u.updated_at
            FROM users u
            JOIN user_profiles p ON p.user_id = u.id
            WHERE u.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))
    }
}

/// Session repository: the single refresh-token record per account.
///
/// Every operation is keyed by account id, never by token value, so a stolen
/// old token cannot be matched once the row has been rotated.
#[derive(Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Hash the raw refresh token and insert-or-overwrite the account's
    /// session row. Rotation and first sign-in take the same path; the last
    /// writer wins.
    pub async fn save(
        &self,
        user_id: i32,
        raw_refresh_token: &str,
        ip: Option<&str>,
        user_agent: Option<&str>,
    ) -> Result<(), AuthError> {
        let token_hash = PasswordService::hash_password(raw_refresh_token)?;

        sqlx::query(
            r#"
            INSERT INTO sessions (user_id, token_hash, ip, user_agent)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO UPDATE
            SET token_hash = EXCLUDED.token_hash,
                ip = EXCLUDED.ip,
                user_agent = EXCLUDED.user_agent,
                updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(token_hash)
        .bind(ip)
        .bind(user_agent)
        .execute(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// Compare a raw refresh token against the stored hash for the account.
    /// Returns false when no session row exists.
    pub async fn verify(&self, user_id: i32, raw_refresh_token: &str) -> Result<bool, AuthError> {
        let session = self.find_by_user_id(user_id).await?;
        match session {
            Some(session) => {
                PasswordService::verify_password(raw_refresh_token, &session.token_hash)
            }
            None => Ok(false),
        }
    }

    /// Delete the account's session row
    pub async fn revoke(&self, user_id: i32) -> Result<(), AuthError> {
        sqlx::query("DELETE FROM sessions WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    pub async fn find_by_user_id(&self, user_id: i32) -> Result<Option<Session>, AuthError> {
        sqlx::query_as::<_, Session>(
            r#"
            SELECT id, user_id, token_hash, ip, user_agent, created_at, updated_at
            FROM sessions
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))
    }
}
