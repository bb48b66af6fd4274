// HTTP handlers for resume endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::json;

use crate::auth::models::CurrentUser;
use crate::resumes::{
    error::ResumeError,
    models::{
        ChangeStatusRequest, CreateResumeRequest, ResumeListParams, ResumeResponse,
        ResumeWithAuthorResponse, StatusLogResponse, UpdateResumeRequest,
    },
};
use crate::AppState;

/// Create a resume (applicant only)
/// POST /resumes
#[utoipa::path(
    post,
    path = "/resumes",
    request_body = CreateResumeRequest,
    responses(
        (status = 201, description = "Resume created", body = ResumeResponse),
        (status = 400, description = "Validation failure", body = String,
            example = json!({"message": "personal statement must be at least 150 characters"})),
        (status = 403, description = "Caller is not an applicant", body = String,
            example = json!({"message": "You do not have permission to access this resource"}))
    ),
    tag = "resumes"
)]
pub async fn create_resume_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<CreateResumeRequest>,
) -> Result<(StatusCode, Json<ResumeResponse>), ResumeError> {
    let resume = state.resume_service.create(&user, request).await?;
    Ok((StatusCode::CREATED, Json(resume)))
}

/// List visible resumes with optional status filter and sort direction
/// GET /resumes
#[utoipa::path(
    get,
    path = "/resumes",
    params(ResumeListParams),
    responses(
        (status = 200, description = "Resume list (empty list when nothing matches)",
            body = Vec<ResumeWithAuthorResponse>),
        (status = 400, description = "Invalid status or sort value", body = String,
            example = json!({"message": "invalid application status: HIRED"}))
    ),
    tag = "resumes"
)]
pub async fn list_resumes_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<ResumeListParams>,
) -> Result<Json<Vec<ResumeWithAuthorResponse>>, ResumeError> {
    let resumes = state.resume_service.list(&user, params).await?;
    Ok(Json(resumes))
}

/// Fetch a single visible resume
/// GET /resumes/:resume_id
#[utoipa::path(
    get,
    path = "/resumes/{resumeId}",
    params(("resumeId" = i32, Path, description = "Resume ID")),
    responses(
        (status = 200, description = "Resume found", body = ResumeWithAuthorResponse),
        (status = 404, description = "Absent or not visible to the caller", body = String,
            example = json!({"message": "Resume not found"}))
    ),
    tag = "resumes"
)]
pub async fn get_resume_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(resume_id): Path<i32>,
) -> Result<Json<ResumeWithAuthorResponse>, ResumeError> {
    let resume = state.resume_service.get(&user, resume_id).await?;
    Ok(Json(resume))
}

/// Update an owned resume
/// PATCH /resumes/:resume_id
#[utoipa::path(
    patch,
    path = "/resumes/{resumeId}",
    params(("resumeId" = i32, Path, description = "Resume ID")),
    request_body = UpdateResumeRequest,
    responses(
        (status = 200, description = "Resume updated", body = ResumeResponse),
        (status = 400, description = "No updatable field present", body = String,
            example = json!({"message": "title or personal statement is required"})),
        (status = 404, description = "No matching owned resume", body = String,
            example = json!({"message": "Resume not found"}))
    ),
    tag = "resumes"
)]
pub async fn update_resume_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(resume_id): Path<i32>,
    Json(request): Json<UpdateResumeRequest>,
) -> Result<Json<ResumeResponse>, ResumeError> {
    let resume = state.resume_service.update(&user, resume_id, request).await?;
    Ok(Json(resume))
}

/// Delete an owned resume
/// DELETE /resumes/:resume_id
#[utoipa::path(
    delete,
    path = "/resumes/{resumeId}",
    params(("resumeId" = i32, Path, description = "Resume ID")),
    responses(
        (status = 200, description = "Resume deleted", body = String,
            example = json!({"id": 1})),
        (status = 404, description = "No matching owned resume", body = String,
            example = json!({"message": "Resume not found"}))
    ),
    tag = "resumes"
)]
pub async fn delete_resume_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(resume_id): Path<i32>,
) -> Result<Json<serde_json::Value>, ResumeError> {
    let deleted_id = state.resume_service.delete(&user, resume_id).await?;
    Ok(Json(json!({ "id": deleted_id })))
}

/// Apply a status transition and record it (recruiter only)
/// PATCH /resumes/:resume_id/status
#[utoipa::path(
    patch,
    path = "/resumes/{resumeId}/status",
    params(("resumeId" = i32, Path, description = "Resume ID")),
    request_body = ChangeStatusRequest,
    responses(
        (status = 201, description = "Transition applied, history row created",
            body = StatusLogResponse),
        (status = 400, description = "Validation failure or same-status transition", body = String,
            example = json!({"message": "resume is already in status APPLY"})),
        (status = 404, description = "Resume not found", body = String,
            example = json!({"message": "Resume not found"}))
    ),
    tag = "resumes"
)]
pub async fn change_status_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(resume_id): Path<i32>,
    Json(request): Json<ChangeStatusRequest>,
) -> Result<(StatusCode, Json<StatusLogResponse>), ResumeError> {
    let log = state
        .resume_service
        .change_status(&user, resume_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(log)))
}

/// Status-change history for a resume, newest first (recruiter only)
/// GET /resumes/:resume_id/logs
#[utoipa::path(
    get,
    path = "/resumes/{resumeId}/logs",
    params(("resumeId" = i32, Path, description = "Resume ID")),
    responses(
        (status = 200, description = "Ordered log list", body = Vec<StatusLogResponse>),
        (status = 404, description = "Resume not found", body = String,
            example = json!({"message": "Resume not found"}))
    ),
    tag = "resumes"
)]
pub async fn list_status_logs_handler(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Path(resume_id): Path<i32>,
) -> Result<Json<Vec<StatusLogResponse>>, ResumeError> {
    let logs = state.resume_service.list_logs(resume_id).await?;
    Ok(Json(logs))
}
