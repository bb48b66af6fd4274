use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Application status of a resume.
///
/// The hiring flow reads APPLY -> DROP|PASS -> INTERVIEW1 -> INTERVIEW2 ->
/// FINAL_PASS, but no ordering is enforced; the only checked invariant is
/// that a transition must change the status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Apply,
    Drop,
    Pass,
    Interview1,
    Interview2,
    FinalPass,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 6] = [
        ApplicationStatus::Apply,
        ApplicationStatus::Drop,
        ApplicationStatus::Pass,
        ApplicationStatus::Interview1,
        ApplicationStatus::Interview2,
        ApplicationStatus::FinalPass,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Apply => "APPLY",
            ApplicationStatus::Drop => "DROP",
            ApplicationStatus::Pass => "PASS",
            ApplicationStatus::Interview1 => "INTERVIEW1",
            ApplicationStatus::Interview2 => "INTERVIEW2",
            ApplicationStatus::FinalPass => "FINAL_PASS",
        }
    }

    /// Parse a status name, case-insensitively
    pub fn from_str(s: &str) -> Result<Self, String> {
        let upper = s.to_uppercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == upper)
            .ok_or_else(|| format!("invalid application status: {}", s))
    }
}

impl Default for ApplicationStatus {
    fn default() -> Self {
        ApplicationStatus::Apply
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resume database model
#[derive(Debug, Clone, FromRow)]
pub struct Resume {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub personal_statement: String,
    pub application_status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Resume row with the author's display name joined in
#[derive(Debug, Clone, FromRow)]
pub struct ResumeWithAuthor {
    pub id: i32,
    pub name: String,
    pub title: String,
    pub personal_statement: String,
    pub application_status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Status-change history row
#[derive(Debug, Clone, FromRow)]
pub struct ResumeStatusLog {
    pub id: i32,
    pub resume_id: i32,
    pub recruiter_id: i32,
    pub prev_status: ApplicationStatus,
    pub curr_status: ApplicationStatus,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

/// Status-change history row with the acting recruiter's name joined in
#[derive(Debug, Clone, FromRow)]
pub struct StatusLogWithActor {
    pub id: i32,
    pub resume_id: i32,
    pub name: String,
    pub prev_status: ApplicationStatus,
    pub curr_status: ApplicationStatus,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

/// Request DTO for creating a resume
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateResumeRequest {
    #[validate(
        required(message = "title is required"),
        length(min = 1, message = "title is required")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "personal statement is required"),
        length(min = 150, message = "personal statement must be at least 150 characters")
    )]
    pub personal_statement: Option<String>,
}

/// Request DTO for updating a resume; at least one field must be present
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResumeRequest {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: Option<String>,
    #[validate(length(min = 150, message = "personal statement must be at least 150 characters"))]
    pub personal_statement: Option<String>,
}

/// Request DTO for the recruiter status transition
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangeStatusRequest {
    #[validate(
        required(message = "application status is required"),
        length(min = 1, message = "application status is required")
    )]
    pub application_status: Option<String>,
    #[validate(
        required(message = "reason is required"),
        length(min = 1, message = "reason is required")
    )]
    pub reason: Option<String>,
}

/// Query parameters for the resume listing
#[derive(Debug, Deserialize, IntoParams)]
pub struct ResumeListParams {
    /// Creation-time sort direction: "asc" or "desc" (default "desc")
    pub sort: Option<String>,
    /// Case-insensitive application-status filter
    pub status: Option<String>,
}

/// Response DTO for create/update/delete paths (owner id included)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumeResponse {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub personal_statement: String,
    pub application_status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Resume> for ResumeResponse {
    fn from(resume: Resume) -> Self {
        Self {
            id: resume.id,
            user_id: resume.user_id,
            title: resume.title,
            personal_statement: resume.personal_statement,
            application_status: resume.application_status,
            created_at: resume.created_at,
            updated_at: resume.updated_at,
        }
    }
}

/// Response DTO for read paths: the author relation is flattened to a
/// top-level `name` and the raw owner reference is not echoed
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumeWithAuthorResponse {
    pub id: i32,
    pub name: String,
    pub title: String,
    pub personal_statement: String,
    pub application_status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ResumeWithAuthor> for ResumeWithAuthorResponse {
    fn from(resume: ResumeWithAuthor) -> Self {
        Self {
            id: resume.id,
            name: resume.name,
            title: resume.title,
            personal_statement: resume.personal_statement,
            application_status: resume.application_status,
            created_at: resume.created_at,
            updated_at: resume.updated_at,
        }
    }
}

/// Response DTO for status-log rows, acting recruiter's name flattened in
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusLogResponse {
    pub id: i32,
    pub resume_id: i32,
    pub name: String,
    pub prev_status: ApplicationStatus,
    pub curr_status: ApplicationStatus,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

impl From<StatusLogWithActor> for StatusLogResponse {
    fn from(log: StatusLogWithActor) -> Self {
        Self {
            id: log.id,
            resume_id: log.resume_id,
            name: log.name,
            prev_status: log.prev_status,
            curr_status: log.curr_status,
            reason: log.reason,
            created_at: log.created_at,
        }
    }
}
