use tracing::{debug, info};
use validator::Validate;

use crate::auth::models::CurrentUser;
use crate::resumes::{
    error::ResumeError,
    models::{
        ApplicationStatus, ChangeStatusRequest, CreateResumeRequest, ResumeListParams,
        ResumeResponse, ResumeWithAuthorResponse, StatusLogResponse, UpdateResumeRequest,
    },
    query::{visibility_scope, ResumeListQuery},
    repository::ResumeRepository,
    transition::validate_transition,
};
use crate::validation::{validate_not_blank, validation_message};

/// Service layer for the resume workflow
#[derive(Clone)]
pub struct ResumeService {
    repository: ResumeRepository,
}

impl ResumeService {
    pub fn new(repository: ResumeRepository) -> Self {
        Self { repository }
    }

    /// Create a resume owned by the caller, starting at APPLY
    pub async fn create(
        &self,
        user: &CurrentUser,
        request: CreateResumeRequest,
    ) -> Result<ResumeResponse, ResumeError> {
        request
            .validate()
            .map_err(|e| ResumeError::ValidationError(validation_message(&e)))?;

        let title = request.title.unwrap_or_default();
        let personal_statement = request.personal_statement.unwrap_or_default();

        if validate_not_blank(&title).is_err() {
            return Err(ResumeError::ValidationError("title is required".to_string()));
        }

        let resume = self
            .repository
            .create(user.id, &title, &personal_statement)
            .await?;

        info!("account {} created resume {}", user.id, resume.id);
        Ok(resume.into())
    }

    /// List resumes under the caller's visibility scope
    pub async fn list(
        &self,
        user: &CurrentUser,
        params: ResumeListParams,
    ) -> Result<Vec<ResumeWithAuthorResponse>, ResumeError> {
        let query = ResumeListQuery::from_params(user.role, user.id, params)?;
        let resumes = self.repository.list(&query).await?;

        debug!(
            "listed {} resumes for account {} ({})",
            resumes.len(),
            user.id,
            user.role
        );
        Ok(resumes.into_iter().map(Into::into).collect())
    }

    /// Fetch one resume; rows outside the caller's scope read as absent
    pub async fn get(
        &self,
        user: &CurrentUser,
        resume_id: i32,
    ) -> Result<ResumeWithAuthorResponse, ResumeError> {
        let scope = visibility_scope(user.role, user.id);
        let resume = self
            .repository
            .find_visible(resume_id, scope)
            .await?
            .ok_or(ResumeError::NotFound)?;

        Ok(resume.into())
    }

    /// Update an owned resume, rewriting only the fields that actually
    /// changed
    pub async fn update(
        &self,
        user: &CurrentUser,
        resume_id: i32,
        request: UpdateResumeRequest,
    ) -> Result<ResumeResponse, ResumeError> {
        request
            .validate()
            .map_err(|e| ResumeError::ValidationError(validation_message(&e)))?;

        if request.title.is_none() && request.personal_statement.is_none() {
            return Err(ResumeError::ValidationError(
                "title or personal statement is required".to_string(),
            ));
        }

        if let Some(ref title) = request.title {
            if validate_not_blank(title).is_err() {
                return Err(ResumeError::ValidationError("title is required".to_string()));
            }
        }

        let existing = self
            .repository
            .find_owned(resume_id, user.id)
            .await?
            .ok_or(ResumeError::NotFound)?;

        let title = request.title.filter(|t| *t != existing.title);
        let personal_statement = request
            .personal_statement
            .filter(|s| *s != existing.personal_statement);

        if title.is_none() && personal_statement.is_none() {
            debug!("resume {} update changed nothing", resume_id);
            return Ok(existing.into());
        }

        let updated = self
            .repository
            .update_owned(
                resume_id,
                user.id,
                title.as_deref(),
                personal_statement.as_deref(),
            )
            .await?
            .ok_or(ResumeError::NotFound)?;

        info!("account {} updated resume {}", user.id, resume_id);
        Ok(updated.into())
    }

    /// Delete an owned resume, returning the deleted id
    pub async fn delete(&self, user: &CurrentUser, resume_id: i32) -> Result<i32, ResumeError> {
        let deleted = self.repository.delete_owned(resume_id, user.id).await?;
        if !deleted {
            return Err(ResumeError::NotFound);
        }

        info!("account {} deleted resume {}", user.id, resume_id);
        Ok(resume_id)
    }

    /// Recruiter status transition.
    ///
    /// The same-status check runs before any transaction is opened; only an
    /// accepted transition pays for the atomic update+log write.
    pub async fn change_status(
        &self,
        recruiter: &CurrentUser,
        resume_id: i32,
        request: ChangeStatusRequest,
    ) -> Result<StatusLogResponse, ResumeError> {
        request
            .validate()
            .map_err(|e| ResumeError::ValidationError(validation_message(&e)))?;

        let raw_status = request.application_status.unwrap_or_default();
        let reason = request.reason.unwrap_or_default();

        if validate_not_blank(&reason).is_err() {
            return Err(ResumeError::ValidationError("reason is required".to_string()));
        }

        let target = ApplicationStatus::from_str(&raw_status)
            .map_err(ResumeError::ValidationError)?;

        let resume = self
            .repository
            .find_by_id(resume_id)
            .await?
            .ok_or(ResumeError::NotFound)?;

        validate_transition(resume.application_status, target)?;

        let log = self
            .repository
            .transition_status(
                resume_id,
                recruiter.id,
                resume.application_status,
                target,
                &reason,
            )
            .await?;

        info!(
            "recruiter {} moved resume {} from {} to {}",
            log.recruiter_id, resume_id, log.prev_status, log.curr_status
        );

        Ok(StatusLogResponse {
            id: log.id,
            resume_id: log.resume_id,
            name: recruiter.name.clone(),
            prev_status: log.prev_status,
            curr_status: log.curr_status,
            reason: log.reason,
            created_at: log.created_at,
        })
    }

    /// Status history for a resume, newest first (recruiter-only route)
    pub async fn list_logs(
        &self,
        resume_id: i32,
    ) -> Result<Vec<StatusLogResponse>, ResumeError> {
        if self.repository.find_by_id(resume_id).await?.is_none() {
            return Err(ResumeError::NotFound);
        }

        let logs = self.repository.list_logs(resume_id).await?;
        Ok(logs.into_iter().map(Into::into).collect())
    }
}
