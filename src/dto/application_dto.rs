use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::application::{Application, ApplicationStatus};
use crate::models::job::Job;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateApplicationPayload {
    #[validate(range(min = 1))]
    pub job_id: i64,
    pub resume_used: Option<String>,
    pub notes: Option<String>,
}

/// Partial update. `applied_date` is stamped at creation and immutable, so it
/// is not part of the payload; status changes are checked against the review
/// pipeline by the service.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateApplicationPayload {
    #[validate(range(min = 1))]
    pub job_id: Option<i64>,
    pub status: Option<ApplicationStatus>,
    pub resume_used: Option<String>,
    pub notes: Option<String>,
}

/// One row of the applications overview: the application joined with the job
/// it references. Applications whose job no longer exists never appear here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationWithJob {
    pub application: Application,
    pub job: Job,
}
