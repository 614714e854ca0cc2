use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::filter::{FieldValue, Filterable};
use crate::store::Record;
use crate::utils::time::to_rfc3339;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: Decimal,
    pub max: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
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

impl Job {
    /// Normalizes a raw stored record into the canonical job shape; absent
    /// fields take their documented defaults and unknown fields are ignored.
    pub fn from_record(record: &Record) -> Self {
        let f = &record.fields;
        Self {
            id: record.id,
            title: super::text(f.get("title")),
            company: super::text(f.get("company")),
            location: super::text(f.get("location")),
            industry: super::text(f.get("industry")),
            salary: SalaryRange {
                min: super::decimal(f.get("salary_min")),
                max: super::decimal(f.get("salary_max")),
            },
            description: super::text(f.get("description")),
            requirements: super::split_list(f.get("requirements"), ','),
            posted_date: super::timestamp(f.get("posted_date")),
            application_deadline: super::optional_timestamp(f.get("application_deadline")),
        }
    }

    pub fn to_record(&self) -> Record {
        let mut record = Record::new(self.id);
        record.set("title", Value::String(self.title.clone()));
        record.set("company", Value::String(self.company.clone()));
        record.set("location", Value::String(self.location.clone()));
        record.set("industry", Value::String(self.industry.clone()));
        record.set("salary_min", Value::String(self.salary.min.to_string()));
        record.set("salary_max", Value::String(self.salary.max.to_string()));
        record.set("description", Value::String(self.description.clone()));
        record.set("requirements", Value::String(self.requirements.join(", ")));
        record.set("posted_date", Value::String(to_rfc3339(self.posted_date)));
        if let Some(deadline) = self.application_deadline {
            record.set("application_deadline", Value::String(to_rfc3339(deadline)));
        }
        record
    }
}

impl Filterable for Job {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "title" => Some(FieldValue::Text(&self.title)),
            "company" => Some(FieldValue::Text(&self.company)),
            "location" => Some(FieldValue::Text(&self.location)),
            "industry" => Some(FieldValue::Keyword(&self.industry)),
            "description" => Some(FieldValue::Text(&self.description)),
            "requirements" => Some(FieldValue::TextList(&self.requirements)),
            "salary" => Some(FieldValue::Range {
                min: (self.salary.min > Decimal::ZERO).then_some(self.salary.min),
                max: (self.salary.max > Decimal::ZERO).then_some(self.salary.max),
            }),
            _ => None,
        }
    }
}
