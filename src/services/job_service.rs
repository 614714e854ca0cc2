use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::dto::job_dto::{CreateJobPayload, JobFilters, UpdateJobPayload};
use crate::error::{Error, Result};
use crate::filter::{self, Criterion};
use crate::models::job::{Job, SalaryRange};
use crate::store::{collections, Condition, ConditionGroup, QueryParams, RecordPatch, RecordStore};
use crate::utils::time::now;

const JOB_FIELDS: &[&str] = &[
    "title",
    "company",
    "location",
    "industry",
    "salary_min",
    "salary_max",
    "description",
    "requirements",
    "posted_date",
    "application_deadline",
];

#[derive(Clone)]
pub struct JobService {
    store: Arc<dyn RecordStore>,
}

impl JobService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Lists jobs matching every active filter dimension. Substring and
    /// set-membership dimensions are pushed down to the store query; the
    /// salary-range criterion runs through the filter engine afterwards.
    ///
    /// Read path: a store failure degrades to an empty list with the error
    /// logged, never an error to the caller.
    pub async fn get_all(&self, filters: JobFilters) -> Result<Vec<Job>> {
        let mut params = QueryParams::new()
            .select(JOB_FIELDS)
            .order_by("posted_date", true)
            .paging(100, 0);

        if let Some(location) = &filters.location {
            params = params.condition(Condition::contains("location", location));
        }
        if let Some(title) = &filters.job_title {
            params = params.condition(Condition::contains("title", title));
        }
        if !filters.industries.is_empty() {
            params = params.condition(Condition::exact_match(
                "industry",
                filters.industries.clone(),
            ));
        }
        if let Some(term) = &filters.search_term {
            params = params.group(ConditionGroup::any_contains(
                &["title", "company", "description"],
                term,
            ));
        }

        let records = match self.store.fetch(collections::JOBS, params).await {
            Ok(records) => records,
            Err(err) => {
                tracing::error!(error = %err, "failed to fetch jobs");
                return Ok(Vec::new());
            }
        };
        let jobs: Vec<Job> = records.iter().map(Job::from_record).collect();

        let mut criteria = Vec::new();
        if let Some((min, max)) = filters.salary {
            criteria.push(Criterion::overlaps("salary", min, max));
        }
        Ok(filter::apply(&jobs, &criteria))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Job> {
        self.store
            .get_by_id(collections::JOBS, id)
            .await?
            .map(|record| Job::from_record(&record))
            .ok_or_else(|| Error::NotFound(format!("Job {} not found", id)))
    }

    pub async fn create(&self, payload: CreateJobPayload) -> Result<Job> {
        let job = Job {
            id: 0,
            title: payload.title,
            company: payload.company,
            location: payload.location,
            industry: payload.industry,
            salary: SalaryRange {
                min: payload.salary_min.unwrap_or(Decimal::ZERO),
                max: payload.salary_max.unwrap_or(Decimal::ZERO),
            },
            description: payload.description,
            requirements: payload.requirements,
            posted_date: now(),
            application_deadline: payload
                .application_deadline
                .or_else(|| Some(now() + chrono::Duration::days(30))),
        };

        let created = self
            .store
            .create(collections::JOBS, vec![job.to_record()])
            .await?;
        created
            .first()
            .map(Job::from_record)
            .ok_or_else(|| Error::Store("create returned no job record".to_string()))
    }

    pub async fn update(&self, id: i64, payload: UpdateJobPayload) -> Result<Job> {
        self.get_by_id(id).await?;

        let mut patch = RecordPatch::new(id);
        if let Some(title) = payload.title {
            patch.set("title", Value::String(title));
        }
        if let Some(company) = payload.company {
            patch.set("company", Value::String(company));
        }
        if let Some(location) = payload.location {
            patch.set("location", Value::String(location));
        }
        if let Some(industry) = payload.industry {
            patch.set("industry", Value::String(industry));
        }
        if let Some(min) = payload.salary_min {
            patch.set("salary_min", Value::String(min.to_string()));
        }
        if let Some(max) = payload.salary_max {
            patch.set("salary_max", Value::String(max.to_string()));
        }
        if let Some(description) = payload.description {
            patch.set("description", Value::String(description));
        }
        if let Some(requirements) = payload.requirements {
            patch.set("requirements", Value::String(requirements.join(", ")));
        }
        if let Some(deadline) = payload.application_deadline {
            patch.set(
                "application_deadline",
                Value::String(crate::utils::time::to_rfc3339(deadline)),
            );
        }

        let updated = self.store.update(collections::JOBS, vec![patch]).await?;
        updated
            .first()
            .map(Job::from_record)
            .ok_or_else(|| Error::Store("update returned no job record".to_string()))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.store.delete(collections::JOBS, vec![id]).await
    }
}
