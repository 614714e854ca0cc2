use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use validator::Validate;

use crate::{
    dto::application_dto::{
        ApplicationWithJob, CreateApplicationPayload, UpdateApplicationPayload,
    },
    error::Result,
    models::application::Application,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/applications",
            get(list_applications).post(create_application),
        )
        .route("/api/applications/overview", get(applications_overview))
        .route(
            "/api/applications/:id",
            get(get_application)
                .patch(update_application)
                .delete(withdraw_application),
        )
}

#[utoipa::path(
    get,
    path = "/api/applications",
    responses(
        (status = 200, description = "All applications, newest first", body = Json<Vec<Application>>)
    )
)]
#[axum::debug_handler]
pub async fn list_applications(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let applications = state.application_service.get_all().await?;
    Ok(Json(applications))
}

#[utoipa::path(
    get,
    path = "/api/applications/overview",
    responses(
        (status = 200, description = "Applications joined with their jobs; dangling references are omitted", body = Json<Vec<ApplicationWithJob>>)
    )
)]
#[axum::debug_handler]
pub async fn applications_overview(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let rows = state.application_service.list_with_jobs().await?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/api/applications/{id}",
    params(
        ("id" = i64, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Application found", body = Json<Application>),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let application = state.application_service.get_by_id(id).await?;
    Ok(Json(application))
}

#[utoipa::path(
    post,
    path = "/api/applications",
    request_body = CreateApplicationPayload,
    responses(
        (status = 201, description = "Application submitted", body = Json<Application>),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_application(
    State(state): State<AppState>,
    Json(payload): Json<CreateApplicationPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let application = state.application_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

#[utoipa::path(
    patch,
    path = "/api/applications/{id}",
    params(
        ("id" = i64, Path, description = "Application ID")
    ),
    request_body = UpdateApplicationPayload,
    responses(
        (status = 200, description = "Application updated", body = Json<Application>),
        (status = 404, description = "Application not found"),
        (status = 409, description = "Status transition not allowed")
    )
)]
#[axum::debug_handler]
pub async fn update_application(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateApplicationPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let application = state.application_service.update(id, payload).await?;
    Ok(Json(application))
}

#[utoipa::path(
    delete,
    path = "/api/applications/{id}",
    params(
        ("id" = i64, Path, description = "Application ID")
    ),
    responses(
        (status = 204, description = "Application withdrawn"),
        (status = 404, description = "Application not found"),
        (status = 409, description = "Application is no longer withdrawable")
    )
)]
#[axum::debug_handler]
pub async fn withdraw_application(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.application_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
