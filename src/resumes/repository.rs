use sqlx::PgPool;

use crate::resumes::error::ResumeError;
use crate::resumes::models::{
    ApplicationStatus, Resume, ResumeStatusLog, ResumeWithAuthor, StatusLogWithActor,
};
use crate::resumes::query::{BindValue, ResumeListQuery, ResumeQueryBuilder, VisibilityScope};

/// Repository for resume and status-log operations
#[derive(Clone)]
pub struct ResumeRepository {
    pool: PgPool,
}

impl ResumeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a resume for its owner; status starts at APPLY via the
    /// column default
    pub async fn create(
        &self,
        user_id: i32,
        title: &str,
        personal_statement: &str,
    ) -> Result<Resume, ResumeError> {
        let resume = sqlx::query_as::<_, Resume>(
            r#"
            INSERT INTO resumes (user_id, title, personal_statement)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, title, personal_statement, application_status,
                      created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(title)
        .bind(personal_statement)
        .fetch_one(&self.pool)
        .await?;

        Ok(resume)
    }

    /// List resumes visible under the query's scope, author name joined in
    pub async fn list(&self, query: &ResumeListQuery) -> Result<Vec<ResumeWithAuthor>, ResumeError> {
        let mut builder = ResumeQueryBuilder::new();
        builder.add_scope(query.scope);
        if let Some(status) = query.status {
            builder.add_status_filter(status);
        }
        builder.set_sort(query.sort);

        let (sql, binds) = builder.build();
        let mut q = sqlx::query_as::<_, ResumeWithAuthor>(&sql);
        for bind in binds {
            q = match bind {
                BindValue::Int(value) => q.bind(value),
                BindValue::Text(value) => q.bind(value),
            };
        }

        let resumes = q.fetch_all(&self.pool).await?;
        Ok(resumes)
    }

    /// Fetch one resume if it is visible under the scope
    pub async fn find_visible(
        &self,
        resume_id: i32,
        scope: VisibilityScope,
    ) -> Result<Option<ResumeWithAuthor>, ResumeError> {
        let mut builder = ResumeQueryBuilder::new();
        builder.add_scope(scope);
        builder.add_id_filter(resume_id);

        let (sql, binds) = builder.build();
        let mut q = sqlx::query_as::<_, ResumeWithAuthor>(&sql);
        for bind in binds {
            q = match bind {
                BindValue::Int(value) => q.bind(value),
                BindValue::Text(value) => q.bind(value),
            };
        }

        let resume = q.fetch_optional(&self.pool).await?;
        Ok(resume)
    }

    /// Fetch a resume regardless of owner (the recruiter transition path)
    pub async fn find_by_id(&self, resume_id: i32) -> Result<Option<Resume>, ResumeError> {
        let resume = sqlx::query_as::<_, Resume>(
            r#"
            SELECT id, user_id, title, personal_statement, application_status,
                   created_at, updated_at
            FROM resumes
            WHERE id = $1
            "#,
        )
        .bind(resume_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(resume)
    }

    /// Fetch a resume only if the given account owns it
    pub async fn find_owned(
        &self,
        resume_id: i32,
        user_id: i32,
    ) -> Result<Option<Resume>, ResumeError> {
        let resume = sqlx::query_as::<_, Resume>(
            r#"
            SELECT id, user_id, title, personal_statement, application_status,
                   created_at, updated_at
            FROM resumes
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(resume_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(resume)
    }

    /// Rewrite the fields passed as Some, leaving the rest untouched
    pub async fn update_owned(
        &self,
        resume_id: i32,
        user_id: i32,
        title: Option<&str>,
        personal_statement: Option<&str>,
    ) -> Result<Option<Resume>, ResumeError> {
        let resume = sqlx::query_as::<_, Resume>(
            r#"
            UPDATE resumes
            SET title = COALESCE($1, title),
                personal_statement = COALESCE($2, personal_statement),
                updated_at = NOW()
            WHERE id = $3 AND user_id = $4
            RETURNING id, user_id, title, personal_statement, application_status,
                      created_at, updated_at
            "#,
        )
        .bind(title)
        .bind(personal_statement)
        .bind(resume_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(resume)
    }

    /// Delete an owned resume; false when no owned row matched
    pub async fn delete_owned(&self, resume_id: i32, user_id: i32) -> Result<bool, ResumeError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1 AND user_id = $2")
            .bind(resume_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Apply a status transition atomically: the status update and the
    /// history insert commit together or not at all, so a concurrent reader
    /// never sees one without the other.
    pub async fn transition_status(
        &self,
        resume_id: i32,
        recruiter_id: i32,
        prev_status: ApplicationStatus,
        curr_status: ApplicationStatus,
        reason: &str,
    ) -> Result<ResumeStatusLog, ResumeError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            "UPDATE resumes SET application_status = $1, updated_at = NOW() WHERE id = $2",
        )
        .bind(curr_status)
        .bind(resume_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            // Deleted between the service's existence check and here
            return Err(ResumeError::NotFound);
        }

        let log = sqlx::query_as::<_, ResumeStatusLog>(
            r#"
            INSERT INTO resume_status_logs (resume_id, recruiter_id, prev_status, curr_status, reason)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, resume_id, recruiter_id, prev_status, curr_status, reason, created_at
            "#,
        )
        .bind(resume_id)
        .bind(recruiter_id)
        .bind(prev_status)
        .bind(curr_status)
        .bind(reason)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(log)
    }

    /// All status-log rows for a resume, newest first, recruiter name joined
    pub async fn list_logs(&self, resume_id: i32) -> Result<Vec<StatusLogWithActor>, ResumeError> {
        let logs = sqlx::query_as::<_, StatusLogWithActor>(
            r#"
            SELECT l.id, l.resume_id, p.name, l.prev_status, l.curr_status, l.reason, l.created_at
            FROM resume_status_logs l
            JOIN user_profiles p ON p.user_id = l.recruiter_id
            WHERE l.resume_id = $1
            ORDER BY l.created_at DESC
            "#,
        )
        .bind(resume_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }
}
