use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::filter::{FieldValue, Filterable};
use crate::store::Record;
use crate::utils::time::to_rfc3339;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionCategory {
    SoftwareEngineering,
    DataScience,
    ProductManagement,
    Marketing,
    Sales,
    Finance,
    Consulting,
    Design,
    Hr,
    #[default]
    General,
}

impl QuestionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionCategory::SoftwareEngineering => "software-engineering",
            QuestionCategory::DataScience => "data-science",
            QuestionCategory::ProductManagement => "product-management",
            QuestionCategory::Marketing => "marketing",
            QuestionCategory::Sales => "sales",
            QuestionCategory::Finance => "finance",
            QuestionCategory::Consulting => "consulting",
            QuestionCategory::Design => "design",
            QuestionCategory::Hr => "hr",
            QuestionCategory::General => "general",
        }
    }
}

impl FromStr for QuestionCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "software-engineering" => Ok(QuestionCategory::SoftwareEngineering),
            "data-science" => Ok(QuestionCategory::DataScience),
            "product-management" => Ok(QuestionCategory::ProductManagement),
            "marketing" => Ok(QuestionCategory::Marketing),
            "sales" => Ok(QuestionCategory::Sales),
            "finance" => Ok(QuestionCategory::Finance),
            "consulting" => Ok(QuestionCategory::Consulting),
            "design" => Ok(QuestionCategory::Design),
            "hr" => Ok(QuestionCategory::Hr),
            "general" => Ok(QuestionCategory::General),
            other => Err(format!("Unknown question category: {}", other)),
        }
    }
}

impl fmt::Display for QuestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionDifficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl QuestionDifficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionDifficulty::Beginner => "beginner",
            QuestionDifficulty::Intermediate => "intermediate",
            QuestionDifficulty::Advanced => "advanced",
        }
    }
}

impl FromStr for QuestionDifficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(QuestionDifficulty::Beginner),
            "intermediate" => Ok(QuestionDifficulty::Intermediate),
            "advanced" => Ok(QuestionDifficulty::Advanced),
            other => Err(format!("Unknown question difficulty: {}", other)),
        }
    }
}

impl fmt::Display for QuestionDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interview-prep content. Seeded through an administrative path; read-only
/// in the practiced browsing flows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub id: i64,
    pub question: String,
    pub category: QuestionCategory,
    pub difficulty: QuestionDifficulty,
    pub key_points: Vec<String>,
    pub sample_answer: String,
    pub tips: Vec<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl InterviewQuestion {
    pub fn from_record(record: &Record) -> Self {
        let f = &record.fields;
        Self {
            id: record.id,
            question: super::text(f.get("question")),
            category: f
                .get("category")
                .and_then(Value::as_str)
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            difficulty: f
                .get("difficulty")
                .and_then(Value::as_str)
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            key_points: super::split_list(f.get("key_points"), '\n'),
            sample_answer: super::text(f.get("sample_answer")),
            tips: super::split_list(f.get("tips"), '\n'),
            tags: super::split_list(f.get("tags"), ','),
            created_at: super::timestamp(f.get("created_at")),
            updated_at: super::optional_timestamp(f.get("updated_at")),
        }
    }

    pub fn to_record(&self) -> Record {
        let mut record = Record::new(self.id);
        record.set("question", Value::String(self.question.clone()));
        record.set("category", Value::String(self.category.to_string()));
        record.set("difficulty", Value::String(self.difficulty.to_string()));
        record.set("key_points", Value::String(self.key_points.join("\n")));
        record.set("sample_answer", Value::String(self.sample_answer.clone()));
        record.set("tips", Value::String(self.tips.join("\n")));
        record.set("tags", Value::String(self.tags.join(",")));
        record.set("created_at", Value::String(to_rfc3339(self.created_at)));
        if let Some(updated) = self.updated_at {
            record.set("updated_at", Value::String(to_rfc3339(updated)));
        }
        record
    }
}

impl Filterable for InterviewQuestion {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "question" => Some(FieldValue::Text(&self.question)),
            "category" => Some(FieldValue::Keyword(self.category.as_str())),
            "difficulty" => Some(FieldValue::Keyword(self.difficulty.as_str())),
            "sample_answer" => Some(FieldValue::Text(&self.sample_answer)),
            "tags" => Some(FieldValue::TextList(&self.tags)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalization_is_idempotent() {
        let mut record = Record::new(9);
        record.set("question", json!("Tell me about a conflict you resolved."));
        record.set("category", json!("hr"));
        record.set("difficulty", json!("intermediate"));
        record.set("key_points", json!("Stay factual\n Own your part \n"));
        record.set("sample_answer", json!("Describe the situation briefly."));
        record.set("tips", json!("Use the STAR format"));
        record.set("tags", json!("behavioral, conflict"));
        record.set("created_at", json!("2025-05-01T10:00:00Z"));

        let question = InterviewQuestion::from_record(&record);
        assert_eq!(question.key_points, vec!["Stay factual", "Own your part"]);
        assert_eq!(question.tags, vec!["behavioral", "conflict"]);
        assert_eq!(
            InterviewQuestion::from_record(&question.to_record()),
            question
        );
    }

    #[test]
    fn unknown_enumerations_fall_back_to_defaults() {
        let mut record = Record::new(1);
        record.set("category", json!("astrology"));
        record.set("difficulty", json!("impossible"));
        let question = InterviewQuestion::from_record(&record);
        assert_eq!(question.category, QuestionCategory::General);
        assert_eq!(question.difficulty, QuestionDifficulty::Beginner);
    }
}
