// Resume workflow module
// CRUD with role-scoped visibility plus the recruiter status transition,
// which writes its history row in the same transaction as the update.

pub mod error;
pub mod handlers;
pub mod models;
pub mod query;
pub mod repository;
pub mod service;
pub mod transition;

pub use error::ResumeError;
pub use models::ApplicationStatus;
pub use repository::ResumeRepository;
pub use service::ResumeService;
