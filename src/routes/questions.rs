use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use validator::Validate;

use crate::{
    dto::question_dto::{
        CreateQuestionPayload, QuestionListQuery, QuestionSearchQuery, UpdateQuestionPayload,
    },
    error::{Error, Result},
    models::question::{InterviewQuestion, QuestionCategory, QuestionDifficulty},
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/questions", get(list_questions).post(create_question))
        .route("/api/questions/search", get(search_questions))
        .route("/api/questions/category/:category", get(list_by_category))
        .route(
            "/api/questions/difficulty/:difficulty",
            get(list_by_difficulty),
        )
        .route(
            "/api/questions/:id",
            get(get_question)
                .patch(update_question)
                .delete(delete_question),
        )
}

#[utoipa::path(
    get,
    path = "/api/questions",
    params(
        ("search" = Option<String>, Query, description = "Free-text search term"),
        ("category" = Option<String>, Query, description = "Category single-select; \"all\" leaves it inactive"),
        ("difficulty" = Option<String>, Query, description = "Difficulty single-select; \"all\" leaves it inactive")
    ),
    responses(
        (status = 200, description = "Questions matching every active dimension", body = Json<Vec<InterviewQuestion>>)
    )
)]
#[axum::debug_handler]
pub async fn list_questions(
    State(state): State<AppState>,
    Query(query): Query<QuestionListQuery>,
) -> Result<impl IntoResponse> {
    let questions = state.question_service.get_all(query).await?;
    Ok(Json(questions))
}

#[utoipa::path(
    get,
    path = "/api/questions/search",
    params(
        ("q" = String, Query, description = "Term matched against question text, category and tags")
    ),
    responses(
        (status = 200, description = "Matching questions", body = Json<Vec<InterviewQuestion>>)
    )
)]
#[axum::debug_handler]
pub async fn search_questions(
    State(state): State<AppState>,
    Query(query): Query<QuestionSearchQuery>,
) -> Result<impl IntoResponse> {
    let questions = state.question_service.search(&query.q).await?;
    Ok(Json(questions))
}

#[utoipa::path(
    get,
    path = "/api/questions/category/{category}",
    params(
        ("category" = String, Path, description = "Question category")
    ),
    responses(
        (status = 200, description = "Questions in the category", body = Json<Vec<InterviewQuestion>>),
        (status = 400, description = "Unknown category")
    )
)]
#[axum::debug_handler]
pub async fn list_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<impl IntoResponse> {
    let category: QuestionCategory = category.parse().map_err(Error::BadRequest)?;
    let questions = state.question_service.get_by_category(category.as_str()).await?;
    Ok(Json(questions))
}

#[utoipa::path(
    get,
    path = "/api/questions/difficulty/{difficulty}",
    params(
        ("difficulty" = String, Path, description = "Question difficulty")
    ),
    responses(
        (status = 200, description = "Questions at the difficulty", body = Json<Vec<InterviewQuestion>>),
        (status = 400, description = "Unknown difficulty")
    )
)]
#[axum::debug_handler]
pub async fn list_by_difficulty(
    State(state): State<AppState>,
    Path(difficulty): Path<String>,
) -> Result<impl IntoResponse> {
    let difficulty: QuestionDifficulty = difficulty.parse().map_err(Error::BadRequest)?;
    let questions = state
        .question_service
        .get_by_difficulty(difficulty.as_str())
        .await?;
    Ok(Json(questions))
}

#[utoipa::path(
    get,
    path = "/api/questions/{id}",
    params(
        ("id" = i64, Path, description = "Question ID")
    ),
    responses(
        (status = 200, description = "Question found", body = Json<InterviewQuestion>),
        (status = 404, description = "Question not found")
    )
)]
#[axum::debug_handler]
pub async fn get_question(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let question = state.question_service.get_by_id(id).await?;
    Ok(Json(question))
}

#[utoipa::path(
    post,
    path = "/api/questions",
    request_body = CreateQuestionPayload,
    responses(
        (status = 201, description = "Question created", body = Json<InterviewQuestion>),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_question(
    State(state): State<AppState>,
    Json(payload): Json<CreateQuestionPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let question = state.question_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(question)))
}

#[utoipa::path(
    patch,
    path = "/api/questions/{id}",
    params(
        ("id" = i64, Path, description = "Question ID")
    ),
    request_body = UpdateQuestionPayload,
    responses(
        (status = 200, description = "Question updated", body = Json<InterviewQuestion>),
        (status = 404, description = "Question not found")
    )
)]
#[axum::debug_handler]
pub async fn update_question(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateQuestionPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let question = state.question_service.update(id, payload).await?;
    Ok(Json(question))
}

#[utoipa::path(
    delete,
    path = "/api/questions/{id}",
    params(
        ("id" = i64, Path, description = "Question ID")
    ),
    responses(
        (status = 204, description = "Question deleted"),
        (status = 404, description = "Question not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_question(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.question_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
