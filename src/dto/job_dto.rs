use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::job::{Job, SalaryRange};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateJobPayload {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub company: String,
    #[validate(length(min = 1))]
    pub location: String,
    #[serde(default)]
    pub industry: String,
    pub salary_min: Option<Decimal>,
    pub salary_max: Option<Decimal>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    pub application_deadline: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateJobPayload {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub company: Option<String>,
    #[validate(length(min = 1))]
    pub location: Option<String>,
    pub industry: Option<String>,
    pub salary_min: Option<Decimal>,
    pub salary_max: Option<Decimal>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub application_deadline: Option<DateTime<Utc>>,
}

/// Search/filter dimensions accepted by the job listing endpoint. Industries
/// arrive as a comma-separated list; absent dimensions are simply inactive.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct JobListQuery {
    pub location: Option<String>,
    pub job_title: Option<String>,
    pub industries: Option<String>,
    pub salary_min: Option<Decimal>,
    pub salary_max: Option<Decimal>,
    pub search: Option<String>,
}

/// The canonical filter-criteria set for job listings, as consumed by the
/// job service.
#[derive(Debug, Clone, Default)]
pub struct JobFilters {
    pub location: Option<String>,
    pub job_title: Option<String>,
    pub industries: Vec<String>,
    pub salary: Option<(Decimal, Decimal)>,
    pub search_term: Option<String>,
}

impl From<JobListQuery> for JobFilters {
    fn from(query: JobListQuery) -> Self {
        let industries = query
            .industries
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let salary = match (query.salary_min, query.salary_max) {
            (None, None) => None,
            (min, max) => Some((
                min.unwrap_or(Decimal::ZERO),
                max.unwrap_or(Decimal::MAX),
            )),
        };

        Self {
            location: query.location.filter(|s| !s.trim().is_empty()),
            job_title: query.job_title.filter(|s| !s.trim().is_empty()),
            industries,
            salary,
            search_term: query.search.filter(|s| !s.trim().is_empty()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResponse {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub location: String,
    pub industry: String,
    pub salary: SalaryRange,
    pub description: String,
    pub requirements: Vec<String>,
    pub posted_date: DateTime<Utc>,
    pub application_deadline: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListResponse {
    pub items: Vec<JobResponse>,
}

impl From<Job> for JobResponse {
    fn from(value: Job) -> Self {
        Self {
            id: value.id,
            title: value.title,
            company: value.company,
            location: value.location,
            industry: value.industry,
            salary: value.salary,
            description: value.description,
            requirements: value.requirements,
            posted_date: value.posted_date,
            application_deadline: value.application_deadline,
        }
    }
}
