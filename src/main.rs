mod auth;
mod db;
mod resumes;
mod validation;

use std::net::SocketAddr;

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::{self, Next},
    response::Json,
    routing::{get, patch, post},
    Router,
};
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use auth::{
    handlers as auth_handlers,
    middleware::{require_access_token, require_refresh_token},
    repository::{SessionRepository, UserRepository},
    AuthService, RequireRoles, TokenService,
};
use resumes::{handlers as resume_handlers, ResumeRepository, ResumeService};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::handlers::sign_up_handler,
        auth::handlers::sign_in_handler,
        auth::handlers::renew_handler,
        auth::handlers::sign_out_handler,
        auth::handlers::me_handler,
        resumes::handlers::create_resume_handler,
        resumes::handlers::list_resumes_handler,
        resumes::handlers::get_resume_handler,
        resumes::handlers::update_resume_handler,
        resumes::handlers::delete_resume_handler,
        resumes::handlers::change_status_handler,
        resumes::handlers::list_status_logs_handler,
    ),
    components(
        schemas(
            auth::models::Role,
            auth::models::SignUpRequest,
            auth::models::SignInRequest,
            auth::models::UserResponse,
            auth::models::TokenResponse,
            resumes::models::ApplicationStatus,
            resumes::models::CreateResumeRequest,
            resumes::models::UpdateResumeRequest,
            resumes::models::ChangeStatusRequest,
            resumes::models::ResumeResponse,
            resumes::models::ResumeWithAuthorResponse,
            resumes::models::StatusLogResponse,
        )
    ),
    tags(
        (name = "auth", description = "Registration, sign-in and session rotation"),
        (name = "users", description = "Account profile"),
        (name = "resumes", description = "Resume CRUD and application-status workflow")
    ),
    info(
        title = "Recruit API",
        version = "1.0.0",
        description = "RESTful API for a recruiting platform: accounts, sessions, resumes"
    )
)]
struct ApiDoc;

/// Application state shared across handlers and middleware
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub auth_service: AuthService,
    pub resume_service: ResumeService,
}

impl AppState {
    /// Wire repositories and services onto one pool
    pub fn new(db: PgPool, token_service: TokenService) -> Self {
        let auth_service = AuthService::new(
            UserRepository::new(db.clone()),
            SessionRepository::new(db.clone()),
            token_service,
        );
        let resume_service = ResumeService::new(ResumeRepository::new(db.clone()));

        Self {
            db,
            auth_service,
            resume_service,
        }
    }
}

/// Handler for GET /health-check
async fn health_check() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(serde_json::json!({ "status": "healthy" })))
}

/// Creates and configures the application router.
///
/// Route groups, inner to outer: role guards sit inside the access-token
/// middleware; the refresh-token middleware covers only renew/sign-out.
fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let applicant_routes = Router::new()
        .route("/resumes", post(resume_handlers::create_resume_handler))
        .route_layer(middleware::from_fn(|req: Request, next: Next| {
            RequireRoles::applicant().guard(req, next)
        }));

    let recruiter_routes = Router::new()
        .route(
            "/resumes/:resume_id/status",
            patch(resume_handlers::change_status_handler),
        )
        .route(
            "/resumes/:resume_id/logs",
            get(resume_handlers::list_status_logs_handler),
        )
        .route_layer(middleware::from_fn(|req: Request, next: Next| {
            RequireRoles::recruiter().guard(req, next)
        }));

    let access_routes = Router::new()
        .merge(applicant_routes)
        .merge(recruiter_routes)
        .route("/users", get(auth_handlers::me_handler))
        .route("/resumes", get(resume_handlers::list_resumes_handler))
        .route(
            "/resumes/:resume_id",
            get(resume_handlers::get_resume_handler)
                .patch(resume_handlers::update_resume_handler)
                .delete(resume_handlers::delete_resume_handler),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_access_token,
        ));

    let refresh_routes = Router::new()
        .route("/auth/renew", patch(auth_handlers::renew_handler))
        .route(
            "/auth/sign-out",
            post(auth_handlers::sign_out_handler).delete(auth_handlers::sign_out_handler),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_refresh_token,
        ));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health-check", get(health_check))
        .route("/auth/sign-up", post(auth_handlers::sign_up_handler))
        .route("/auth/sign-in", post(auth_handlers::sign_in_handler))
        .merge(access_routes)
        .merge(refresh_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    tracing::info!("Recruit API - starting...");

    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set in environment");
    let access_secret = std::env::var("ACCESS_TOKEN_SECRET_KEY")
        .expect("ACCESS_TOKEN_SECRET_KEY must be set in environment");
    let refresh_secret = std::env::var("REFRESH_TOKEN_SECRET_KEY")
        .expect("REFRESH_TOKEN_SECRET_KEY must be set in environment");
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());

    tracing::info!("connecting to database...");
    let db_pool = db::create_pool(&database_url)
        .await
        .expect("Failed to create database pool");

    tracing::info!("running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");

    let state = AppState::new(db_pool, TokenService::new(access_secret, refresh_secret));
    let app = create_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Recruit API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server error");
}

#[cfg(test)]
mod tests;
