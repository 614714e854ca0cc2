use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::dto::application_dto::{
    ApplicationWithJob, CreateApplicationPayload, UpdateApplicationPayload,
};
use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicationStatus, DEFAULT_RESUME_LABEL};
use crate::models::job::Job;
use crate::store::{collections, Condition, QueryParams, RecordPatch, RecordStore};
use crate::utils::time::now;

#[derive(Clone)]
pub struct ApplicationService {
    store: Arc<dyn RecordStore>,
}

impl ApplicationService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn get_all(&self) -> Result<Vec<Application>> {
        let params = QueryParams::new()
            .order_by("applied_date", true)
            .paging(100, 0);
        let records = match self.store.fetch(collections::APPLICATIONS, params).await {
            Ok(records) => records,
            Err(err) => {
                tracing::error!(error = %err, "failed to fetch applications");
                return Ok(Vec::new());
            }
        };
        Ok(records.iter().map(Application::from_record).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Application> {
        self.store
            .get_by_id(collections::APPLICATIONS, id)
            .await?
            .map(|record| Application::from_record(&record))
            .ok_or_else(|| Error::NotFound(format!("Application {} not found", id)))
    }

    pub async fn get_by_job_id(&self, job_id: i64) -> Result<Vec<Application>> {
        let params = QueryParams::new()
            .condition(Condition::equal_to("job_id", Value::from(job_id)))
            .order_by("applied_date", true);
        let records = match self.store.fetch(collections::APPLICATIONS, params).await {
            Ok(records) => records,
            Err(err) => {
                tracing::error!(error = %err, job_id, "failed to fetch applications for job");
                return Ok(Vec::new());
            }
        };
        Ok(records.iter().map(Application::from_record).collect())
    }

    /// The applications overview: each application joined with the job it
    /// references. An application whose job has disappeared is skipped
    /// rather than surfaced as an integrity error; the skip is counted and
    /// logged so the leniency stays visible.
    pub async fn list_with_jobs(&self) -> Result<Vec<ApplicationWithJob>> {
        let applications = self.get_all().await?;

        let job_records = match self
            .store
            .fetch(collections::JOBS, QueryParams::new())
            .await
        {
            Ok(records) => records,
            Err(err) => {
                tracing::error!(error = %err, "failed to fetch jobs for overview");
                return Ok(Vec::new());
            }
        };
        let jobs: HashMap<i64, Job> = job_records
            .iter()
            .map(|record| (record.id, Job::from_record(record)))
            .collect();

        let mut dangling = 0usize;
        let rows: Vec<ApplicationWithJob> = applications
            .into_iter()
            .filter_map(|application| match jobs.get(&application.job_id) {
                Some(job) => Some(ApplicationWithJob {
                    application,
                    job: job.clone(),
                }),
                None => {
                    dangling += 1;
                    None
                }
            })
            .collect();
        if dangling > 0 {
            tracing::warn!(count = dangling, "skipped applications with dangling job references");
        }
        Ok(rows)
    }

    /// Only `Applied` is reachable through creation; the review stages are
    /// advanced by the external process via `update`.
    pub async fn create(&self, payload: CreateApplicationPayload) -> Result<Application> {
        let application = Application {
            id: 0,
            job_id: payload.job_id,
            applied_date: now(),
            status: ApplicationStatus::Applied,
            resume_used: payload
                .resume_used
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_RESUME_LABEL.to_string()),
            notes: payload.notes.unwrap_or_default(),
        };

        let created = self
            .store
            .create(collections::APPLICATIONS, vec![application.to_record()])
            .await?;
        created
            .first()
            .map(Application::from_record)
            .ok_or_else(|| Error::Store("create returned no application record".to_string()))
    }

    pub async fn update(&self, id: i64, payload: UpdateApplicationPayload) -> Result<Application> {
        let current = self.get_by_id(id).await?;

        let mut patch = RecordPatch::new(id);
        if let Some(status) = payload.status {
            if !current.status.can_transition_to(status) {
                return Err(Error::Conflict(format!(
                    "Cannot move application from {} to {}",
                    current.status, status
                )));
            }
            patch.set("status", Value::String(status.to_string()));
        }
        if let Some(job_id) = payload.job_id {
            patch.set("job_id", Value::from(job_id));
        }
        if let Some(resume_used) = payload.resume_used {
            patch.set("resume_used", Value::String(resume_used));
        }
        if let Some(notes) = payload.notes {
            patch.set("notes", Value::String(notes));
        }

        let updated = self
            .store
            .update(collections::APPLICATIONS, vec![patch])
            .await?;
        updated
            .first()
            .map(Application::from_record)
            .ok_or_else(|| Error::Store("update returned no application record".to_string()))
    }

    /// Withdraws an application. Withdrawal is a data rule, not a UI one:
    /// anything past `Applied` is already with the employer and stays.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let current = self.get_by_id(id).await?;
        if current.status != ApplicationStatus::Applied {
            return Err(Error::Conflict(format!(
                "Application {} is {} and can no longer be withdrawn",
                id, current.status
            )));
        }
        self.store.delete(collections::APPLICATIONS, vec![id]).await
    }
}
