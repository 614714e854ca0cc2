use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use validator::Validate;

use crate::{
    dto::alert_dto::{CreateAlertPayload, UpdateAlertPayload},
    error::Result,
    models::alert::Alert,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/alerts", get(list_alerts).post(create_alert))
        .route(
            "/api/alerts/:id",
            get(get_alert).patch(update_alert).delete(delete_alert),
        )
        .route("/api/alerts/:id/toggle", post(toggle_alert))
}

#[utoipa::path(
    get,
    path = "/api/alerts",
    responses(
        (status = 200, description = "All job alerts", body = Json<Vec<Alert>>)
    )
)]
#[axum::debug_handler]
pub async fn list_alerts(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let alerts = state.alert_service.get_all().await?;
    Ok(Json(alerts))
}

#[utoipa::path(
    get,
    path = "/api/alerts/{id}",
    params(
        ("id" = i64, Path, description = "Alert ID")
    ),
    responses(
        (status = 200, description = "Alert found", body = Json<Alert>),
        (status = 404, description = "Alert not found")
    )
)]
#[axum::debug_handler]
pub async fn get_alert(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let alert = state.alert_service.get_by_id(id).await?;
    Ok(Json(alert))
}

#[utoipa::path(
    post,
    path = "/api/alerts",
    request_body = CreateAlertPayload,
    responses(
        (status = 201, description = "Alert created", body = Json<Alert>),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_alert(
    State(state): State<AppState>,
    Json(payload): Json<CreateAlertPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let alert = state.alert_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(alert)))
}

#[utoipa::path(
    patch,
    path = "/api/alerts/{id}",
    params(
        ("id" = i64, Path, description = "Alert ID")
    ),
    request_body = UpdateAlertPayload,
    responses(
        (status = 200, description = "Alert updated", body = Json<Alert>),
        (status = 404, description = "Alert not found")
    )
)]
#[axum::debug_handler]
pub async fn update_alert(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateAlertPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let alert = state.alert_service.update(id, payload).await?;
    Ok(Json(alert))
}

#[utoipa::path(
    delete,
    path = "/api/alerts/{id}",
    params(
        ("id" = i64, Path, description = "Alert ID")
    ),
    responses(
        (status = 204, description = "Alert deleted"),
        (status = 404, description = "Alert not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_alert(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.alert_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/alerts/{id}/toggle",
    params(
        ("id" = i64, Path, description = "Alert ID")
    ),
    responses(
        (status = 200, description = "Alert with the active flag flipped", body = Json<Alert>),
        (status = 404, description = "Alert not found")
    )
)]
#[axum::debug_handler]
pub async fn toggle_alert(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let alert = state.alert_service.toggle_active(id).await?;
    Ok(Json(alert))
}
