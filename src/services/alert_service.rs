use std::sync::Arc;

use serde_json::Value;

use crate::dto::alert_dto::{AlertFiltersPayload, CreateAlertPayload, UpdateAlertPayload};
use crate::error::{Error, Result};
use crate::models::alert::{Alert, AlertFilters, SalaryBand};
use crate::store::{collections, QueryParams, RecordPatch, RecordStore};
use rust_decimal::Decimal;

/// Job-alert CRUD. Alerts are stored criteria only; nothing in this service
/// (or anywhere else in the process) evaluates or fires them.
#[derive(Clone)]
pub struct AlertService {
    store: Arc<dyn RecordStore>,
}

impl AlertService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn get_all(&self) -> Result<Vec<Alert>> {
        let params = QueryParams::new().paging(50, 0);
        let records = match self.store.fetch(collections::JOB_ALERTS, params).await {
            Ok(records) => records,
            Err(err) => {
                tracing::error!(error = %err, "failed to fetch alerts");
                return Ok(Vec::new());
            }
        };
        Ok(records.iter().map(Alert::from_record).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Alert> {
        self.store
            .get_by_id(collections::JOB_ALERTS, id)
            .await?
            .map(|record| Alert::from_record(&record))
            .ok_or_else(|| Error::NotFound(format!("Alert {} not found", id)))
    }

    pub async fn create(&self, payload: CreateAlertPayload) -> Result<Alert> {
        let filters = payload.filters;
        let alert = Alert {
            id: 0,
            name: payload.name,
            filters: AlertFilters {
                job_title: filters.job_title.unwrap_or_default(),
                location: filters.location.unwrap_or_default(),
                industries: filters.industries.unwrap_or_default(),
                salary_range: SalaryBand::new(
                    filters.salary_min.unwrap_or(Decimal::ZERO),
                    filters.salary_max.unwrap_or(Decimal::ZERO),
                ),
            },
            frequency: payload.frequency.unwrap_or_default(),
            is_active: payload.is_active.unwrap_or(true),
        };

        let created = self
            .store
            .create(collections::JOB_ALERTS, vec![alert.to_record()])
            .await?;
        created
            .first()
            .map(Alert::from_record)
            .ok_or_else(|| Error::Store("create returned no alert record".to_string()))
    }

    pub async fn update(&self, id: i64, payload: UpdateAlertPayload) -> Result<Alert> {
        self.get_by_id(id).await?;

        let mut patch = RecordPatch::new(id);
        if let Some(name) = payload.name {
            patch.set("name", Value::String(name));
        }
        if let Some(filters) = payload.filters {
            apply_filter_fields(&mut patch, filters);
        }
        if let Some(frequency) = payload.frequency {
            patch.set("frequency", Value::String(frequency.to_string()));
        }
        if let Some(is_active) = payload.is_active {
            patch.set("is_active", Value::Bool(is_active));
        }

        let updated = self
            .store
            .update(collections::JOB_ALERTS, vec![patch])
            .await?;
        updated
            .first()
            .map(Alert::from_record)
            .ok_or_else(|| Error::Store("update returned no alert record".to_string()))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.store.delete(collections::JOB_ALERTS, vec![id]).await
    }

    /// Read-then-write negation of the active flag.
    pub async fn toggle_active(&self, id: i64) -> Result<Alert> {
        let current = self.get_by_id(id).await?;
        self.update(
            id,
            UpdateAlertPayload {
                name: None,
                filters: None,
                frequency: None,
                is_active: Some(!current.is_active),
            },
        )
        .await
    }
}

fn apply_filter_fields(patch: &mut RecordPatch, filters: AlertFiltersPayload) {
    if let Some(job_title) = filters.job_title {
        patch.set("job_title", Value::String(job_title));
    }
    if let Some(location) = filters.location {
        patch.set("location", Value::String(location));
    }
    if let Some(industries) = filters.industries {
        patch.set("industries", Value::String(industries.join(",")));
    }
    if let Some(min) = filters.salary_min {
        patch.set("salary_range_min", Value::String(min.to_string()));
    }
    if let Some(max) = filters.salary_max {
        patch.set("salary_range_max", Value::String(max.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::alert::AlertFrequency;
    use crate::store::MemoryStore;
    use std::time::Duration;

    fn service() -> AlertService {
        AlertService::new(Arc::new(MemoryStore::new(Duration::ZERO)))
    }

    fn payload(name: &str) -> CreateAlertPayload {
        CreateAlertPayload {
            name: name.to_string(),
            filters: AlertFiltersPayload {
                job_title: Some("Engineer".to_string()),
                location: Some("Remote".to_string()),
                industries: Some(vec!["Technology".to_string()]),
                salary_min: Some(Decimal::from(90000)),
                salary_max: Some(Decimal::from(120000)),
            },
            frequency: Some(AlertFrequency::Weekly),
            is_active: None,
        }
    }

    #[tokio::test]
    async fn create_defaults_to_active_and_derives_label() {
        let service = service();
        let alert = service.create(payload("Remote tech")).await.unwrap();
        assert!(alert.is_active);
        assert_eq!(alert.frequency, AlertFrequency::Weekly);
        assert_eq!(alert.filters.salary_range.label, "$90,000 - $120,000");
    }

    #[tokio::test]
    async fn toggle_flips_only_the_active_flag() {
        let service = service();
        let alert = service.create(payload("Remote tech")).await.unwrap();

        let off = service.toggle_active(alert.id).await.unwrap();
        assert!(!off.is_active);
        assert_eq!(off.name, "Remote tech");
        assert_eq!(off.filters.job_title, "Engineer");

        let on = service.toggle_active(alert.id).await.unwrap();
        assert!(on.is_active);
    }

    #[tokio::test]
    async fn partial_filter_update_keeps_other_dimensions() {
        let service = service();
        let alert = service.create(payload("Remote tech")).await.unwrap();

        let updated = service
            .update(
                alert.id,
                UpdateAlertPayload {
                    name: None,
                    filters: Some(AlertFiltersPayload {
                        location: Some("Berlin".to_string()),
                        ..Default::default()
                    }),
                    frequency: None,
                    is_active: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.filters.location, "Berlin");
        assert_eq!(updated.filters.job_title, "Engineer");
        assert_eq!(updated.filters.industries, vec!["Technology"]);
    }

    #[tokio::test]
    async fn toggle_of_missing_alert_is_not_found() {
        let service = service();
        let err = service.toggle_active(12).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
