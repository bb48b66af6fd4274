// Integration tests for the Recruit API.
//
// Tests marked #[ignore] need a PostgreSQL database reachable through
// DATABASE_URL (migrations are applied and tables are cleaned on setup).
// The rest run against a lazy pool and never touch the database.

use super::*;
use axum::http::{header, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::json;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::auth::models::Role;
use crate::auth::password::PasswordService;
use crate::auth::repository::UserRepository;
use crate::resumes::models::ApplicationStatus;
use crate::resumes::repository::ResumeRepository;

// ============================================================================
// Test helpers
// ============================================================================

const TEST_ACCESS_SECRET: &str = "access_secret_for_integration_tests";
const TEST_REFRESH_SECRET: &str = "refresh_secret_for_integration_tests";

fn database_url() -> String {
    std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "postgresql://recruit_user:recruit_pass@db:5432/recruit_db".to_string())
}

/// Connect, migrate and clean all tables
async fn create_test_pool() -> PgPool {
    let pool = crate::db::create_pool(&database_url())
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    for table in [
        "resume_status_logs",
        "resumes",
        "sessions",
        "user_profiles",
        "users",
    ] {
        sqlx::query(&format!("DELETE FROM {}", table))
            .execute(&pool)
            .await
            .expect("Failed to clean test data");
    }

    pool
}

/// Pool that parses the URL but never connects; good enough for routes that
/// fail before any query runs
fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .connect_lazy(&database_url())
        .expect("Failed to build lazy pool")
}

fn test_state(pool: PgPool) -> AppState {
    AppState::new(
        pool,
        TokenService::new(
            TEST_ACCESS_SECRET.to_string(),
            TEST_REFRESH_SECRET.to_string(),
        ),
    )
}

fn create_test_app(pool: PgPool) -> TestServer {
    TestServer::new(create_router(test_state(pool))).unwrap()
}

fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
}

/// A personal statement exactly `len` characters long
fn statement_of_length(len: usize) -> String {
    "x".repeat(len)
}

async fn sign_up(server: &TestServer, email: &str, name: &str) {
    let response = server
        .post("/auth/sign-up")
        .json(&json!({
            "email": email,
            "password": "secret1",
            "passwordConfirm": "secret1",
            "name": name,
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
}

/// Sign in and return (access_token, refresh_token)
async fn sign_in(server: &TestServer, email: &str) -> (String, String) {
    let response = server
        .post("/auth/sign-in")
        .json(&json!({ "email": email, "password": "secret1" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let body: serde_json::Value = response.json();
    (
        body["accessToken"].as_str().unwrap().to_string(),
        body["refreshToken"].as_str().unwrap().to_string(),
    )
}

async fn make_recruiter(pool: &PgPool, email: &str) {
    sqlx::query(
        "UPDATE user_profiles SET role = 'RECRUITER' \
         WHERE user_id = (SELECT id FROM users WHERE email = $1)",
    )
    .bind(email)
    .execute(pool)
    .await
    .expect("Failed to promote account to recruiter");
}

async fn create_resume(server: &TestServer, access_token: &str, title: &str) -> i32 {
    let response = server
        .post("/resumes")
        .add_header(header::AUTHORIZATION, bearer(access_token))
        .json(&json!({
            "title": title,
            "personalStatement": statement_of_length(150),
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let body: serde_json::Value = response.json();
    body["id"].as_i64().unwrap() as i32
}

// ============================================================================
// Routes that reject before touching the database
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = create_test_app(lazy_pool());

    let response = server.get("/health-check").await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_protected_routes_require_a_credential() {
    let server = create_test_app(lazy_pool());

    for path in ["/users", "/resumes"] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

        let body: serde_json::Value = response.json();
        assert_eq!(body["message"], "Authentication credentials are missing");
    }
}

#[tokio::test]
async fn test_non_bearer_scheme_is_rejected() {
    let server = create_test_app(lazy_pool());

    let response = server
        .get("/resumes")
        .add_header(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        )
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Unsupported authentication scheme");
}

#[tokio::test]
async fn test_malformed_token_is_rejected_with_invalid_message() {
    let server = create_test_app(lazy_pool());

    let response = server
        .get("/resumes")
        .add_header(header::AUTHORIZATION, bearer("not.a.token"))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Authentication credentials are invalid");
}

#[tokio::test]
async fn test_expired_token_gets_a_distinct_message() {
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};

    let server = create_test_app(lazy_pool());

    let now = Utc::now().timestamp();
    let claims = crate::auth::token::Claims {
        sub: 1,
        iat: now - 1000,
        exp: now - 500,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_ACCESS_SECRET.as_bytes()),
    )
    .unwrap();

    let response = server
        .get("/resumes")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Authentication credentials have expired");
}

// ============================================================================
// Database-backed tests
// ============================================================================

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn test_sign_up_creates_retrievable_account_with_hashed_password() {
    let pool = create_test_pool().await;
    let server = create_test_app(pool.clone());

    sign_up(&server, "alice@example.com", "Alice").await;

    let user = UserRepository::new(pool)
        .find_by_email("alice@example.com")
        .await
        .unwrap()
        .expect("account should be retrievable by email");
    assert_ne!(user.password_hash, "secret1");
    assert!(PasswordService::verify_password("secret1", &user.password_hash).unwrap());
    assert_eq!(user.role, Role::Applicant);

    // Re-submitting the same email conflicts
    let response = server
        .post("/auth/sign-up")
        .json(&json!({
            "email": "alice@example.com",
            "password": "secret1",
            "passwordConfirm": "secret1",
            "name": "Alice Again",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Email is already registered");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn test_sign_up_validation_rejects_before_any_write() {
    let pool = create_test_pool().await;
    let server = create_test_app(pool.clone());

    // Password shorter than 6 characters
    let response = server
        .post("/auth/sign-up")
        .json(&json!({
            "email": "short@example.com",
            "password": "12345",
            "passwordConfirm": "12345",
            "name": "Short",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    // Mismatched confirmation
    let response = server
        .post("/auth/sign-up")
        .json(&json!({
            "email": "short@example.com",
            "password": "secret1",
            "passwordConfirm": "secret2",
            "name": "Short",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    // Neither attempt wrote a row
    let user = UserRepository::new(pool)
        .find_by_email("short@example.com")
        .await
        .unwrap();
    assert!(user.is_none());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn test_sign_in_sets_bearer_cookies() {
    let pool = create_test_pool().await;
    let server = create_test_app(pool);

    sign_up(&server, "cookie@example.com", "Cookie").await;

    let response = server
        .post("/auth/sign-in")
        .json(&json!({ "email": "cookie@example.com", "password": "secret1" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let access = response.cookie("accessToken");
    let refresh = response.cookie("refreshToken");
    assert!(access.value().starts_with("Bearer "));
    assert!(refresh.value().starts_with("Bearer "));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn test_invalid_credentials_share_one_message() {
    let pool = create_test_pool().await;
    let server = create_test_app(pool);

    sign_up(&server, "bob@example.com", "Bob").await;

    let unknown_email = server
        .post("/auth/sign-in")
        .json(&json!({ "email": "nobody@example.com", "password": "secret1" }))
        .await;
    let wrong_password = server
        .post("/auth/sign-in")
        .json(&json!({ "email": "bob@example.com", "password": "wrong-1" }))
        .await;

    assert_eq!(unknown_email.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(wrong_password.status_code(), StatusCode::BAD_REQUEST);

    let a: serde_json::Value = unknown_email.json();
    let b: serde_json::Value = wrong_password.json();
    assert_eq!(a["message"], b["message"]);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn test_session_rotation_keeps_exactly_one_row_per_account() {
    let pool = create_test_pool().await;
    let server = create_test_app(pool.clone());

    sign_up(&server, "carol@example.com", "Carol").await;
    let (_, refresh_token) = sign_in(&server, "carol@example.com").await;

    let first_hash: (String,) =
        sqlx::query_as("SELECT token_hash FROM sessions WHERE user_id = (SELECT id FROM users WHERE email = $1)")
            .bind("carol@example.com")
            .fetch_one(&pool)
            .await
            .unwrap();

    // Renew and make sure the row was overwritten, not duplicated
    let response = server
        .patch("/auth/renew")
        .add_header(header::AUTHORIZATION, bearer(&refresh_token))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let rows: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM sessions WHERE user_id = (SELECT id FROM users WHERE email = $1)")
            .bind("carol@example.com")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(rows.0, 1);

    let second_hash: (String,) =
        sqlx::query_as("SELECT token_hash FROM sessions WHERE user_id = (SELECT id FROM users WHERE email = $1)")
            .bind("carol@example.com")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_ne!(first_hash.0, second_hash.0);

    // The pre-rotation refresh token no longer matches the stored hash
    let response = server
        .patch("/auth/renew")
        .add_header(header::AUTHORIZATION, bearer(&refresh_token))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Authentication credentials have been revoked");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn test_sign_out_revokes_the_session() {
    let pool = create_test_pool().await;
    let server = create_test_app(pool.clone());

    sign_up(&server, "dave@example.com", "Dave").await;
    let (_, refresh_token) = sign_in(&server, "dave@example.com").await;

    let response = server
        .post("/auth/sign-out")
        .add_header(header::AUTHORIZATION, bearer(&refresh_token))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let rows: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sessions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows.0, 0);

    // The revoked refresh token cannot renew
    let response = server
        .patch("/auth/renew")
        .add_header(header::AUTHORIZATION, bearer(&refresh_token))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn test_access_token_resolves_only_its_own_account() {
    let pool = create_test_pool().await;
    let server = create_test_app(pool);

    sign_up(&server, "erin@example.com", "Erin").await;
    sign_up(&server, "frank@example.com", "Frank").await;
    let (erin_access, _) = sign_in(&server, "erin@example.com").await;

    let response = server
        .get("/users")
        .add_header(header::AUTHORIZATION, bearer(&erin_access))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["email"], "erin@example.com");
    assert_eq!(body["name"], "Erin");
    assert_eq!(body["role"], "APPLICANT");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn test_personal_statement_length_boundary() {
    let pool = create_test_pool().await;
    let server = create_test_app(pool);

    sign_up(&server, "grace@example.com", "Grace").await;
    let (access, _) = sign_in(&server, "grace@example.com").await;

    let response = server
        .post("/resumes")
        .add_header(header::AUTHORIZATION, bearer(&access))
        .json(&json!({
            "title": "Backend engineer",
            "personalStatement": statement_of_length(149),
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = server
        .post("/resumes")
        .add_header(header::AUTHORIZATION, bearer(&access))
        .json(&json!({
            "title": "Backend engineer",
            "personalStatement": statement_of_length(150),
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let body: serde_json::Value = response.json();
    assert_eq!(body["applicationStatus"], "APPLY");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn test_applicants_cannot_touch_each_others_resumes() {
    let pool = create_test_pool().await;
    let server = create_test_app(pool.clone());

    sign_up(&server, "owner@example.com", "Owner").await;
    sign_up(&server, "other@example.com", "Other").await;
    sign_up(&server, "scout@example.com", "Scout").await;
    make_recruiter(&pool, "scout@example.com").await;

    let (owner_access, _) = sign_in(&server, "owner@example.com").await;
    let resume_id = create_resume(&server, &owner_access, "Owner resume").await;

    let (other_access, _) = sign_in(&server, "other@example.com").await;
    let path = format!("/resumes/{}", resume_id);

    let read = server
        .get(&path)
        .add_header(header::AUTHORIZATION, bearer(&other_access))
        .await;
    assert_eq!(read.status_code(), StatusCode::NOT_FOUND);

    let update = server
        .patch(&path)
        .add_header(header::AUTHORIZATION, bearer(&other_access))
        .json(&json!({ "title": "Hijacked" }))
        .await;
    assert_eq!(update.status_code(), StatusCode::NOT_FOUND);

    let delete = server
        .delete(&path)
        .add_header(header::AUTHORIZATION, bearer(&other_access))
        .await;
    assert_eq!(delete.status_code(), StatusCode::NOT_FOUND);

    // A recruiter reads it fine, with the author's name flattened in
    let (recruiter_access, _) = sign_in(&server, "scout@example.com").await;
    let read = server
        .get(&path)
        .add_header(header::AUTHORIZATION, bearer(&recruiter_access))
        .await;
    assert_eq!(read.status_code(), StatusCode::OK);
    let body: serde_json::Value = read.json();
    assert_eq!(body["name"], "Owner");
    assert!(body.get("userId").is_none());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn test_applicant_role_is_required_to_create() {
    let pool = create_test_pool().await;
    let server = create_test_app(pool.clone());

    sign_up(&server, "scout2@example.com", "Scout Two").await;
    make_recruiter(&pool, "scout2@example.com").await;
    let (access, _) = sign_in(&server, "scout2@example.com").await;

    let response = server
        .post("/resumes")
        .add_header(header::AUTHORIZATION, bearer(&access))
        .json(&json!({
            "title": "Recruiter resume",
            "personalStatement": statement_of_length(150),
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn test_recruiter_role_is_required_for_status_routes() {
    let pool = create_test_pool().await;
    let server = create_test_app(pool);

    sign_up(&server, "henry@example.com", "Henry").await;
    let (access, _) = sign_in(&server, "henry@example.com").await;
    let resume_id = create_resume(&server, &access, "Henry resume").await;

    let response = server
        .patch(&format!("/resumes/{}/status", resume_id))
        .add_header(header::AUTHORIZATION, bearer(&access))
        .json(&json!({ "applicationStatus": "PASS", "reason": "self-promotion" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = server
        .get(&format!("/resumes/{}/logs", resume_id))
        .add_header(header::AUTHORIZATION, bearer(&access))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn test_update_rewrites_only_changed_fields_and_delete_returns_id() {
    let pool = create_test_pool().await;
    let server = create_test_app(pool);

    sign_up(&server, "iris@example.com", "Iris").await;
    let (access, _) = sign_in(&server, "iris@example.com").await;
    let resume_id = create_resume(&server, &access, "First title").await;
    let path = format!("/resumes/{}", resume_id);

    // Neither field present
    let response = server
        .patch(&path)
        .add_header(header::AUTHORIZATION, bearer(&access))
        .json(&json!({}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    // Title-only update keeps the statement
    let response = server
        .patch(&path)
        .add_header(header::AUTHORIZATION, bearer(&access))
        .json(&json!({ "title": "Second title" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["title"], "Second title");
    assert_eq!(
        body["personalStatement"].as_str().unwrap().len(),
        150
    );

    let response = server
        .delete(&path)
        .add_header(header::AUTHORIZATION, bearer(&access))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["id"].as_i64().unwrap() as i32, resume_id);

    let response = server
        .get(&path)
        .add_header(header::AUTHORIZATION, bearer(&access))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn test_status_transition_rules_and_log_row() {
    let pool = create_test_pool().await;
    let server = create_test_app(pool.clone());

    sign_up(&server, "applicant@example.com", "Applicant").await;
    sign_up(&server, "judge@example.com", "Judge").await;
    make_recruiter(&pool, "judge@example.com").await;

    let (applicant_access, _) = sign_in(&server, "applicant@example.com").await;
    let resume_id = create_resume(&server, &applicant_access, "My resume").await;
    let (recruiter_access, _) = sign_in(&server, "judge@example.com").await;
    let status_path = format!("/resumes/{}/status", resume_id);

    // Transition to the current status is rejected
    let response = server
        .patch(&status_path)
        .add_header(header::AUTHORIZATION, bearer(&recruiter_access))
        .json(&json!({ "applicationStatus": "APPLY", "reason": "no-op" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    // Unknown status is rejected
    let response = server
        .patch(&status_path)
        .add_header(header::AUTHORIZATION, bearer(&recruiter_access))
        .json(&json!({ "applicationStatus": "HIRED", "reason": "typo" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    // A real transition creates exactly one log row with correct prev/curr
    let response = server
        .patch(&status_path)
        .add_header(header::AUTHORIZATION, bearer(&recruiter_access))
        .json(&json!({ "applicationStatus": "pass", "reason": "strong statement" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["prevStatus"], "APPLY");
    assert_eq!(body["currStatus"], "PASS");
    assert_eq!(body["name"], "Judge");

    let logs = server
        .get(&format!("/resumes/{}/logs", resume_id))
        .add_header(header::AUTHORIZATION, bearer(&recruiter_access))
        .await;
    assert_eq!(logs.status_code(), StatusCode::OK);
    let body: serde_json::Value = logs.json();
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["prevStatus"], "APPLY");
    assert_eq!(entries[0]["currStatus"], "PASS");
    assert_eq!(entries[0]["reason"], "strong statement");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn test_failed_log_insert_rolls_back_the_status_update() {
    let pool = create_test_pool().await;
    let server = create_test_app(pool.clone());

    sign_up(&server, "atomic@example.com", "Atomic").await;
    let (access, _) = sign_in(&server, "atomic@example.com").await;
    let resume_id = create_resume(&server, &access, "Atomic resume").await;

    // A recruiter id that violates the foreign key makes the log insert
    // fail after the status update has already executed in the transaction
    let repo = ResumeRepository::new(pool);
    let result = repo
        .transition_status(
            resume_id,
            999_999,
            ApplicationStatus::Apply,
            ApplicationStatus::Pass,
            "forced failure",
        )
        .await;
    assert!(result.is_err());

    let resume = repo.find_by_id(resume_id).await.unwrap().unwrap();
    assert_eq!(resume.application_status, ApplicationStatus::Apply);

    let logs = repo.list_logs(resume_id).await.unwrap();
    assert!(logs.is_empty());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn test_list_filters_sorting_and_empty_result() {
    let pool = create_test_pool().await;
    let server = create_test_app(pool.clone());

    sign_up(&server, "lister@example.com", "Lister").await;
    sign_up(&server, "viewer@example.com", "Viewer").await;
    make_recruiter(&pool, "viewer@example.com").await;

    let (access, _) = sign_in(&server, "lister@example.com").await;
    let first = create_resume(&server, &access, "First").await;
    let second = create_resume(&server, &access, "Second").await;

    // Default sort is newest-first
    let response = server
        .get("/resumes")
        .add_header(header::AUTHORIZATION, bearer(&access))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["id"].as_i64().unwrap() as i32, second);
    assert_eq!(rows[1]["id"].as_i64().unwrap() as i32, first);
    assert_eq!(rows[0]["name"], "Lister");

    // Ascending, case-insensitive
    let response = server
        .get("/resumes")
        .add_query_param("sort", "ASC")
        .add_header(header::AUTHORIZATION, bearer(&access))
        .await;
    let body: serde_json::Value = response.json();
    let rows = body.as_array().unwrap();
    assert_eq!(rows[0]["id"].as_i64().unwrap() as i32, first);

    // Status filter with no matches is 200 + empty list
    let response = server
        .get("/resumes")
        .add_query_param("status", "final_pass")
        .add_header(header::AUTHORIZATION, bearer(&access))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 0);

    // A recruiter with no resumes of their own still sees everything
    let (viewer_access, _) = sign_in(&server, "viewer@example.com").await;
    let response = server
        .get("/resumes")
        .add_header(header::AUTHORIZATION, bearer(&viewer_access))
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn test_end_to_end_flow() {
    let pool = create_test_pool().await;
    let server = create_test_app(pool.clone());

    // Sign up, sign in
    sign_up(&server, "journey@example.com", "Journey").await;
    let (access, _) = sign_in(&server, "journey@example.com").await;

    // Create a resume with a 150-character statement
    let resume_id = create_resume(&server, &access, "Journey resume").await;

    // The owner's listing contains it
    let response = server
        .get("/resumes")
        .add_header(header::AUTHORIZATION, bearer(&access))
        .await;
    let body: serde_json::Value = response.json();
    assert!(body
        .as_array()
        .unwrap()
        .iter()
        .any(|row| row["id"].as_i64().unwrap() as i32 == resume_id));

    // A recruiter moves it to INTERVIEW1
    sign_up(&server, "closer@example.com", "Closer").await;
    make_recruiter(&pool, "closer@example.com").await;
    let (recruiter_access, _) = sign_in(&server, "closer@example.com").await;

    let response = server
        .patch(&format!("/resumes/{}/status", resume_id))
        .add_header(header::AUTHORIZATION, bearer(&recruiter_access))
        .json(&json!({ "applicationStatus": "INTERVIEW1", "reason": "promising profile" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    // The log list shows one entry with correct prev/curr
    let response = server
        .get(&format!("/resumes/{}/logs", resume_id))
        .add_header(header::AUTHORIZATION, bearer(&recruiter_access))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["prevStatus"], "APPLY");
    assert_eq!(entries[0]["currStatus"], "INTERVIEW1");
    assert_eq!(entries[0]["name"], "Closer");
}
