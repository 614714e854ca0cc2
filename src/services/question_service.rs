use std::sync::Arc;

use serde_json::Value;

use crate::dto::question_dto::{CreateQuestionPayload, QuestionListQuery, UpdateQuestionPayload};
use crate::error::{Error, Result};
use crate::filter::{self, Criterion};
use crate::models::question::InterviewQuestion;
use crate::store::{collections, Condition, ConditionGroup, QueryParams, RecordPatch, RecordStore};
use crate::utils::time::{now, to_rfc3339};

/// Fields the free-text search term is matched against, both in the store
/// query and in the filter engine.
const SEARCH_FIELDS: &[&str] = &["question", "category", "tags"];

#[derive(Clone)]
pub struct QuestionService {
    store: Arc<dyn RecordStore>,
}

impl QuestionService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    async fn fetch_all(&self, params: QueryParams) -> Result<Vec<InterviewQuestion>> {
        let records = match self
            .store
            .fetch(collections::INTERVIEW_QUESTIONS, params)
            .await
        {
            Ok(records) => records,
            Err(err) => {
                tracing::error!(error = %err, "failed to fetch interview questions");
                return Ok(Vec::new());
            }
        };
        Ok(records.iter().map(InterviewQuestion::from_record).collect())
    }

    /// Combined browse filtering: search term, category and difficulty AND
    /// together; dimensions left unset (or set to `"all"`) are inactive.
    /// This runs through the same predicate engine as the job search.
    pub async fn get_all(&self, query: QuestionListQuery) -> Result<Vec<InterviewQuestion>> {
        let params = QueryParams::new().order_by("created_at", true).paging(100, 0);
        let questions = self.fetch_all(params).await?;

        let mut criteria = Vec::new();
        if let Some(term) = &query.search {
            criteria.push(Criterion::substring(SEARCH_FIELDS, term));
        }
        if let Some(category) = &query.category {
            criteria.push(Criterion::equals("category", category));
        }
        if let Some(difficulty) = &query.difficulty {
            criteria.push(Criterion::equals("difficulty", difficulty));
        }
        Ok(filter::apply(&questions, &criteria))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<InterviewQuestion> {
        self.store
            .get_by_id(collections::INTERVIEW_QUESTIONS, id)
            .await?
            .map(|record| InterviewQuestion::from_record(&record))
            .ok_or_else(|| Error::NotFound(format!("Interview question {} not found", id)))
    }

    pub async fn get_by_category(&self, category: &str) -> Result<Vec<InterviewQuestion>> {
        let params = QueryParams::new()
            .condition(Condition::equal_to("category", Value::from(category)))
            .order_by("created_at", true);
        self.fetch_all(params).await
    }

    pub async fn get_by_difficulty(&self, difficulty: &str) -> Result<Vec<InterviewQuestion>> {
        let params = QueryParams::new()
            .condition(Condition::equal_to("difficulty", Value::from(difficulty)))
            .order_by("created_at", true);
        self.fetch_all(params).await
    }

    /// Free-text search pushed down to the store as an OR group.
    pub async fn search(&self, term: &str) -> Result<Vec<InterviewQuestion>> {
        let params = QueryParams::new()
            .group(ConditionGroup::any_contains(SEARCH_FIELDS, term))
            .order_by("created_at", true);
        self.fetch_all(params).await
    }

    pub async fn create(&self, payload: CreateQuestionPayload) -> Result<InterviewQuestion> {
        let question = InterviewQuestion {
            id: 0,
            question: payload.question,
            category: payload.category.unwrap_or_default(),
            difficulty: payload.difficulty.unwrap_or_default(),
            key_points: payload.key_points,
            sample_answer: payload.sample_answer,
            tips: payload.tips,
            tags: payload.tags,
            created_at: now(),
            updated_at: None,
        };

        let created = self
            .store
            .create(collections::INTERVIEW_QUESTIONS, vec![question.to_record()])
            .await?;
        created
            .first()
            .map(InterviewQuestion::from_record)
            .ok_or_else(|| Error::Store("create returned no question record".to_string()))
    }

    pub async fn update(&self, id: i64, payload: UpdateQuestionPayload) -> Result<InterviewQuestion> {
        self.get_by_id(id).await?;

        let mut patch = RecordPatch::new(id);
        patch.set("updated_at", Value::String(to_rfc3339(now())));
        if let Some(question) = payload.question {
            patch.set("question", Value::String(question));
        }
        if let Some(category) = payload.category {
            patch.set("category", Value::String(category.to_string()));
        }
        if let Some(difficulty) = payload.difficulty {
            patch.set("difficulty", Value::String(difficulty.to_string()));
        }
        if let Some(key_points) = payload.key_points {
            patch.set("key_points", Value::String(key_points.join("\n")));
        }
        if let Some(sample_answer) = payload.sample_answer {
            patch.set("sample_answer", Value::String(sample_answer));
        }
        if let Some(tips) = payload.tips {
            patch.set("tips", Value::String(tips.join("\n")));
        }
        if let Some(tags) = payload.tags {
            patch.set("tags", Value::String(tags.join(",")));
        }

        let updated = self
            .store
            .update(collections::INTERVIEW_QUESTIONS, vec![patch])
            .await?;
        updated
            .first()
            .map(InterviewQuestion::from_record)
            .ok_or_else(|| Error::Store("update returned no question record".to_string()))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.store
            .delete(collections::INTERVIEW_QUESTIONS, vec![id])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::{QuestionCategory, QuestionDifficulty};
    use crate::store::MemoryStore;
    use std::time::Duration;

    async fn seeded_service() -> QuestionService {
        let service = QuestionService::new(Arc::new(MemoryStore::new(Duration::ZERO)));
        let entries = [
            (
                "How would you design a cache?",
                QuestionCategory::SoftwareEngineering,
                QuestionDifficulty::Advanced,
                vec!["system-design"],
            ),
            (
                "Tell me about yourself.",
                QuestionCategory::General,
                QuestionDifficulty::Beginner,
                vec!["behavioral"],
            ),
            (
                "Explain overfitting.",
                QuestionCategory::DataScience,
                QuestionDifficulty::Intermediate,
                vec!["ml", "statistics"],
            ),
        ];
        for (question, category, difficulty, tags) in entries {
            service
                .create(CreateQuestionPayload {
                    question: question.to_string(),
                    category: Some(category),
                    difficulty: Some(difficulty),
                    key_points: vec![],
                    sample_answer: String::new(),
                    tips: vec![],
                    tags: tags.into_iter().map(String::from).collect(),
                })
                .await
                .unwrap();
        }
        service
    }

    #[tokio::test]
    async fn combined_filters_and_together() {
        let service = seeded_service().await;

        let out = service
            .get_all(QuestionListQuery {
                search: Some("design".to_string()),
                category: Some("software-engineering".to_string()),
                difficulty: Some("advanced".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].question, "How would you design a cache?");
    }

    #[tokio::test]
    async fn all_sentinel_leaves_dimension_inactive() {
        let service = seeded_service().await;

        let out = service
            .get_all(QuestionListQuery {
                search: None,
                category: Some("all".to_string()),
                difficulty: Some("all".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(out.len(), 3);
    }

    #[tokio::test]
    async fn search_matches_tags_case_insensitively() {
        let service = seeded_service().await;

        let out = service
            .get_all(QuestionListQuery {
                search: Some("BEHAVIORAL".to_string()),
                category: None,
                difficulty: None,
            })
            .await
            .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].question, "Tell me about yourself.");
    }

    #[tokio::test]
    async fn pushdown_search_matches_question_text() {
        let service = seeded_service().await;
        let out = service.search("overfitting").await.unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].category, QuestionCategory::DataScience);
    }

    #[tokio::test]
    async fn update_stamps_updated_at() {
        let service = seeded_service().await;
        let updated = service
            .update(
                1,
                UpdateQuestionPayload {
                    question: None,
                    category: None,
                    difficulty: None,
                    key_points: None,
                    sample_answer: Some("Scope first.".to_string()),
                    tips: None,
                    tags: None,
                },
            )
            .await
            .unwrap();
        assert!(updated.updated_at.is_some());
        assert_eq!(updated.sample_answer, "Scope first.");
    }
}
