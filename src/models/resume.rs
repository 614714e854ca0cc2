use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::Record;
use crate::utils::time::to_rfc3339;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    pub id: i64,
    pub name: String,
    pub upload_date: DateTime<Utc>,
    pub file_url: String,
    pub is_default: bool,
}

impl Resume {
    pub fn from_record(record: &Record) -> Self {
        let f = &record.fields;
        Self {
            id: record.id,
            name: super::text(f.get("name")),
            upload_date: super::timestamp(f.get("upload_date")),
            file_url: super::text(f.get("file_url")),
            is_default: super::boolean(f.get("is_default")),
        }
    }

    pub fn to_record(&self) -> Record {
        let mut record = Record::new(self.id);
        record.set("name", Value::String(self.name.clone()));
        record.set("upload_date", Value::String(to_rfc3339(self.upload_date)));
        record.set("file_url", Value::String(self.file_url.clone()));
        record.set("is_default", Value::Bool(self.is_default));
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalization_is_idempotent() {
        let mut record = Record::new(3);
        record.set("name", json!("resume-2025.pdf"));
        record.set("upload_date", json!("2025-04-01T09:00:00Z"));
        record.set("file_url", json!("/uploads/abc.pdf"));
        record.set("is_default", json!(true));

        let resume = Resume::from_record(&record);
        assert_eq!(Resume::from_record(&resume.to_record()), resume);
    }

    #[test]
    fn missing_flag_defaults_to_false() {
        let resume = Resume::from_record(&Record::new(1));
        assert!(!resume.is_default);
        assert_eq!(resume.file_url, "");
    }
}
