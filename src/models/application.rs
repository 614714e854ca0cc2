use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::store::Record;
use crate::utils::time::to_rfc3339;

pub const DEFAULT_RESUME_LABEL: &str = "Default Resume";

/// The closed application lifecycle. Only `Applied` is reachable through
/// user-initiated creation; review stages are advanced externally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Reviewing,
    Interview,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Reviewing => "Reviewing",
            ApplicationStatus::Interview => "Interview",
            ApplicationStatus::Rejected => "Rejected",
        }
    }

    /// Allowed moves: Applied -> Reviewing -> Interview, any of the three ->
    /// Rejected. Writing the current status back is a no-op and always fine.
    pub fn can_transition_to(&self, next: ApplicationStatus) -> bool {
        use ApplicationStatus::*;
        if *self == next {
            return true;
        }
        matches!(
            (self, next),
            (Applied, Reviewing) | (Reviewing, Interview) | (Applied | Reviewing | Interview, Rejected)
        )
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "applied" => Ok(ApplicationStatus::Applied),
            "reviewing" => Ok(ApplicationStatus::Reviewing),
            "interview" => Ok(ApplicationStatus::Interview),
            "rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(format!("Unknown application status: {}", other)),
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: i64,
    pub job_id: i64,
    pub applied_date: DateTime<Utc>,
    pub status: ApplicationStatus,
    pub resume_used: String,
    pub notes: String,
}

impl Application {
    pub fn from_record(record: &Record) -> Self {
        let f = &record.fields;
        let resume_used = super::text(f.get("resume_used"));
        Self {
            id: record.id,
            job_id: record.integer("job_id").unwrap_or(0),
            applied_date: super::timestamp(f.get("applied_date")),
            status: f
                .get("status")
                .and_then(Value::as_str)
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            resume_used: if resume_used.is_empty() {
                DEFAULT_RESUME_LABEL.to_string()
            } else {
                resume_used
            },
            notes: super::text(f.get("notes")),
        }
    }

    pub fn to_record(&self) -> Record {
        let mut record = Record::new(self.id);
        record.set("job_id", Value::from(self.job_id));
        record.set("applied_date", Value::String(to_rfc3339(self.applied_date)));
        record.set("status", Value::String(self.status.to_string()));
        record.set("resume_used", Value::String(self.resume_used.clone()));
        record.set("notes", Value::String(self.notes.clone()));
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_parse_is_case_insensitive() {
        for raw in ["applied", "APPLIED", "Applied"] {
            assert_eq!(raw.parse::<ApplicationStatus>(), Ok(ApplicationStatus::Applied));
        }
        assert_eq!(
            "interview".parse::<ApplicationStatus>(),
            Ok(ApplicationStatus::Interview)
        );
        assert!("ghosted".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn transitions_follow_the_review_pipeline() {
        use ApplicationStatus::*;
        assert!(Applied.can_transition_to(Reviewing));
        assert!(Reviewing.can_transition_to(Interview));
        assert!(Applied.can_transition_to(Rejected));
        assert!(Interview.can_transition_to(Rejected));

        assert!(!Applied.can_transition_to(Interview));
        assert!(!Rejected.can_transition_to(Applied));
        assert!(!Interview.can_transition_to(Reviewing));
        assert!(Reviewing.can_transition_to(Reviewing));
    }

    #[test]
    fn normalization_is_idempotent() {
        let mut record = Record::new(5);
        record.set("job_id", json!(3));
        record.set("applied_date", json!("2025-07-01T08:30:00Z"));
        record.set("status", json!("reviewing"));
        record.set("notes", json!("Followed up by email."));

        let app = Application::from_record(&record);
        assert_eq!(app.status, ApplicationStatus::Reviewing);
        assert_eq!(app.resume_used, DEFAULT_RESUME_LABEL);
        assert_eq!(Application::from_record(&app.to_record()), app);
    }

    #[test]
    fn missing_status_defaults_to_applied() {
        let app = Application::from_record(&Record::new(1));
        assert_eq!(app.status, ApplicationStatus::Applied);
        assert_eq!(app.job_id, 0);
    }
}
