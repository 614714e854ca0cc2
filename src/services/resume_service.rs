use std::sync::Arc;

use serde_json::Value;

use crate::dto::resume_dto::{CreateResumePayload, UpdateResumePayload};
use crate::error::{Error, Result};
use crate::models::resume::Resume;
use crate::store::{collections, QueryParams, RecordPatch, RecordStore};
use crate::utils::time::now;

#[derive(Clone)]
pub struct ResumeService {
    store: Arc<dyn RecordStore>,
}

impl ResumeService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn get_all(&self) -> Result<Vec<Resume>> {
        let params = QueryParams::new().order_by("upload_date", true).paging(50, 0);
        let records = match self.store.fetch(collections::RESUMES, params).await {
            Ok(records) => records,
            Err(err) => {
                tracing::error!(error = %err, "failed to fetch resumes");
                return Ok(Vec::new());
            }
        };
        Ok(records.iter().map(Resume::from_record).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Resume> {
        self.store
            .get_by_id(collections::RESUMES, id)
            .await?
            .map(|record| Resume::from_record(&record))
            .ok_or_else(|| Error::NotFound(format!("Resume {} not found", id)))
    }

    /// Stores a new resume. The first resume in the collection becomes the
    /// default automatically; an explicit default request is honored through
    /// the same flag swap as `set_default`.
    pub async fn create(&self, payload: CreateResumePayload) -> Result<Resume> {
        let existing = self
            .store
            .fetch(collections::RESUMES, QueryParams::new())
            .await?;

        let resume = Resume {
            id: 0,
            name: payload.name,
            upload_date: now(),
            file_url: payload.file_url.unwrap_or_default(),
            is_default: false,
        };
        let created = self
            .store
            .create(collections::RESUMES, vec![resume.to_record()])
            .await?;
        let mut created = created
            .first()
            .map(Resume::from_record)
            .ok_or_else(|| Error::Store("create returned no resume record".to_string()))?;

        if existing.is_empty() || payload.is_default.unwrap_or(false) {
            self.set_default(created.id).await?;
            created.is_default = true;
        }
        Ok(created)
    }

    /// Makes `id` the single default resume. Every flag in the collection is
    /// rewritten in one batched store update, so a failure either leaves the
    /// old state or produces the new one — never a half-flipped collection.
    pub async fn set_default(&self, id: i64) -> Result<Vec<Resume>> {
        let records = self
            .store
            .fetch(collections::RESUMES, QueryParams::new())
            .await?;
        if !records.iter().any(|r| r.id == id) {
            return Err(Error::NotFound(format!("Resume {} not found", id)));
        }

        let patches: Vec<RecordPatch> = records
            .iter()
            .map(|record| {
                let mut patch = RecordPatch::new(record.id);
                patch.set("is_default", Value::Bool(record.id == id));
                patch
            })
            .collect();
        let updated = self.store.update(collections::RESUMES, patches).await?;
        Ok(updated.iter().map(Resume::from_record).collect())
    }

    pub async fn update(&self, id: i64, payload: UpdateResumePayload) -> Result<Resume> {
        self.get_by_id(id).await?;

        let mut patch = RecordPatch::new(id);
        if let Some(name) = payload.name {
            patch.set("name", Value::String(name));
        }
        if let Some(file_url) = payload.file_url {
            patch.set("file_url", Value::String(file_url));
        }

        let updated = self.store.update(collections::RESUMES, vec![patch]).await?;
        updated
            .first()
            .map(Resume::from_record)
            .ok_or_else(|| Error::Store("update returned no resume record".to_string()))
    }

    /// No cascade: applications keep their stored resume label as a text
    /// snapshot after the file itself is gone.
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.store.delete(collections::RESUMES, vec![id]).await
    }
}
