// Query construction for resume reads.
//
// Visibility is decided by an explicit predicate built from the caller's
// role and id, then compiled into parameterized SQL together with the
// optional status filter and sort direction.

use crate::auth::models::Role;
use crate::resumes::{
    error::ResumeError,
    models::{ApplicationStatus, ResumeListParams},
};

/// Creation-time sort direction, defaulting to newest-first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse "asc"/"desc" case-insensitively; None falls back to Desc
    pub fn parse(s: Option<&str>) -> Result<Self, ResumeError> {
        match s {
            None => Ok(SortOrder::Desc),
            Some(raw) => match raw.to_lowercase().as_str() {
                "asc" => Ok(SortOrder::Asc),
                "desc" => Ok(SortOrder::Desc),
                _ => Err(ResumeError::ValidationError(format!(
                    "invalid sort order '{}', expected 'asc' or 'desc'",
                    raw
                ))),
            },
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Desc
    }
}

/// Which resume rows the caller is allowed to see
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityScope {
    /// Applicants see only their own resumes
    OwnedBy(i32),
    /// Recruiters see every resume
    All,
}

/// Typed visibility predicate for the caller
pub fn visibility_scope(role: Role, user_id: i32) -> VisibilityScope {
    match role {
        Role::Applicant => VisibilityScope::OwnedBy(user_id),
        Role::Recruiter => VisibilityScope::All,
    }
}

/// Validated listing query: scope + optional status filter + sort
#[derive(Debug)]
pub struct ResumeListQuery {
    pub scope: VisibilityScope,
    pub status: Option<ApplicationStatus>,
    pub sort: SortOrder,
}

impl ResumeListQuery {
    /// Validate raw query parameters against the caller's role and id
    pub fn from_params(
        role: Role,
        user_id: i32,
        params: ResumeListParams,
    ) -> Result<Self, ResumeError> {
        let status = match params.status.as_deref() {
            None => None,
            Some(raw) => Some(
                ApplicationStatus::from_str(raw).map_err(ResumeError::ValidationError)?,
            ),
        };

        Ok(Self {
            scope: visibility_scope(role, user_id),
            status,
            sort: SortOrder::parse(params.sort.as_deref())?,
        })
    }
}

/// Typed bind value produced by the builder
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Int(i32),
    Text(String),
}

/// SQL builder for resume reads with the author's name joined in
pub struct ResumeQueryBuilder {
    where_clauses: Vec<String>,
    binds: Vec<BindValue>,
    order_clause: Option<String>,
}

impl ResumeQueryBuilder {
    pub fn new() -> Self {
        Self {
            where_clauses: Vec::new(),
            binds: Vec::new(),
            order_clause: None,
        }
    }

    /// Constrain rows to the caller's visibility scope
    pub fn add_scope(&mut self, scope: VisibilityScope) {
        if let VisibilityScope::OwnedBy(user_id) = scope {
            let index = self.binds.len() + 1;
            self.where_clauses.push(format!("r.user_id = ${}", index));
            self.binds.push(BindValue::Int(user_id));
        }
    }

    /// Filter on a single application status
    pub fn add_status_filter(&mut self, status: ApplicationStatus) {
        let index = self.binds.len() + 1;
        self.where_clauses
            .push(format!("r.application_status = ${}", index));
        self.binds.push(BindValue::Text(status.as_str().to_string()));
    }

    /// Constrain to one resume id (the get-one path)
    pub fn add_id_filter(&mut self, resume_id: i32) {
        let index = self.binds.len() + 1;
        self.where_clauses.push(format!("r.id = ${}", index));
        self.binds.push(BindValue::Int(resume_id));
    }

    /// Order by creation time
    pub fn set_sort(&mut self, order: SortOrder) {
        self.order_clause = Some(format!("r.created_at {}", order.as_sql()));
    }

    /// Assemble the final query string and its typed binds
    pub fn build(&self) -> (String, Vec<BindValue>) {
        let mut query = String::from(
            "SELECT r.id, p.name, r.title, r.personal_statement, r.application_status, \
             r.created_at, r.updated_at \
             FROM resumes r \
             JOIN user_profiles p ON p.user_id = r.user_id",
        );

        if !self.where_clauses.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&self.where_clauses.join(" AND "));
        }

        if let Some(ref order) = self.order_clause {
            query.push_str(" ORDER BY ");
            query.push_str(order);
        }

        (query, self.binds.clone())
    }
}

impl Default for ResumeQueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
