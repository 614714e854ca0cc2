use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    config::get_config,
    dto::resume_dto::{CreateResumePayload, UpdateResumePayload},
    error::{Error, Result},
    models::resume::Resume,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/resumes", get(list_resumes).post(create_resume))
        .route("/api/resumes/upload", post(upload_resume))
        .route(
            "/api/resumes/:id",
            get(get_resume).patch(update_resume).delete(delete_resume),
        )
        .route("/api/resumes/:id/default", post(set_default_resume))
}

#[utoipa::path(
    get,
    path = "/api/resumes",
    responses(
        (status = 200, description = "All stored resumes, newest first", body = Json<Vec<Resume>>)
    )
)]
#[axum::debug_handler]
pub async fn list_resumes(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let resumes = state.resume_service.get_all().await?;
    Ok(Json(resumes))
}

#[utoipa::path(
    get,
    path = "/api/resumes/{id}",
    params(
        ("id" = i64, Path, description = "Resume ID")
    ),
    responses(
        (status = 200, description = "Resume found", body = Json<Resume>),
        (status = 404, description = "Resume not found")
    )
)]
#[axum::debug_handler]
pub async fn get_resume(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let resume = state.resume_service.get_by_id(id).await?;
    Ok(Json(resume))
}

#[utoipa::path(
    post,
    path = "/api/resumes",
    request_body = CreateResumePayload,
    responses(
        (status = 201, description = "Resume registered", body = Json<Resume>),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_resume(
    State(state): State<AppState>,
    Json(payload): Json<CreateResumePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let resume = state.resume_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(resume)))
}

#[utoipa::path(
    post,
    path = "/api/resumes/upload",
    responses(
        (status = 201, description = "Resume uploaded and registered", body = Json<Resume>),
        (status = 400, description = "Not a PDF, over the size ceiling, or no file field")
    )
)]
#[axum::debug_handler]
pub async fn upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let config = get_config();

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
        let content_type = field.content_type().map(str::to_string);
        let data: bytes::Bytes = field.bytes().await?;

        let looks_like_pdf = content_type.as_deref() == Some("application/pdf")
            || file_name.to_lowercase().ends_with(".pdf");
        if !looks_like_pdf {
            return Err(Error::BadRequest(
                "Only PDF resumes are accepted".to_string(),
            ));
        }
        if data.len() > config.max_resume_bytes {
            return Err(Error::BadRequest(format!(
                "Resume exceeds the {} byte limit",
                config.max_resume_bytes
            )));
        }

        let stored_name = format!("{}.pdf", Uuid::new_v4());
        let uploads_dir = std::path::Path::new(&config.uploads_dir);
        tokio::fs::create_dir_all(uploads_dir).await?;
        tokio::fs::write(uploads_dir.join(&stored_name), &data).await?;

        let resume = state
            .resume_service
            .create(CreateResumePayload {
                name: file_name,
                file_url: Some(format!("/uploads/{}", stored_name)),
                is_default: None,
            })
            .await?;
        return Ok((StatusCode::CREATED, Json(resume)));
    }

    Err(Error::BadRequest(
        "Multipart upload carried no file field".to_string(),
    ))
}

#[utoipa::path(
    patch,
    path = "/api/resumes/{id}",
    params(
        ("id" = i64, Path, description = "Resume ID")
    ),
    request_body = UpdateResumePayload,
    responses(
        (status = 200, description = "Resume updated", body = Json<Resume>),
        (status = 404, description = "Resume not found")
    )
)]
#[axum::debug_handler]
pub async fn update_resume(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateResumePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let resume = state.resume_service.update(id, payload).await?;
    Ok(Json(resume))
}

#[utoipa::path(
    delete,
    path = "/api/resumes/{id}",
    params(
        ("id" = i64, Path, description = "Resume ID")
    ),
    responses(
        (status = 204, description = "Resume deleted"),
        (status = 404, description = "Resume not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_resume(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.resume_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/resumes/{id}/default",
    params(
        ("id" = i64, Path, description = "Resume ID")
    ),
    responses(
        (status = 200, description = "Collection after the default flag moved", body = Json<Vec<Resume>>),
        (status = 404, description = "Resume not found")
    )
)]
#[axum::debug_handler]
pub async fn set_default_resume(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let resumes = state.resume_service.set_default(id).await?;
    Ok(Json(resumes))
}
