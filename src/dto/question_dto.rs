use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::question::{QuestionCategory, QuestionDifficulty};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateQuestionPayload {
    #[validate(length(min = 1))]
    pub question: String,
    pub category: Option<QuestionCategory>,
    pub difficulty: Option<QuestionDifficulty>,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub sample_answer: String,
    #[serde(default)]
    pub tips: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateQuestionPayload {
    #[validate(length(min = 1))]
    pub question: Option<String>,
    pub category: Option<QuestionCategory>,
    pub difficulty: Option<QuestionDifficulty>,
    pub key_points: Option<Vec<String>>,
    pub sample_answer: Option<String>,
    pub tips: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
}

/// Combined browse filters: free-text search plus category/difficulty
/// single-selects, where `"all"` (or absence) leaves a dimension inactive.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct QuestionListQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSearchQuery {
    pub q: String,
}
