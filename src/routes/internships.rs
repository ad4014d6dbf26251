use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;

use crate::{
    dto::internship_dto::InternshipPayload, error::Result,
    middleware::auth::AdminSession, models::internship::InternshipCategory, AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct InternshipListQuery {
    pub category: Option<InternshipCategory>,
}

#[utoipa::path(
    get,
    path = "/api/portal/internships",
    params(
        ("category" = Option<String>, Query, description = "Stipend, Paid or Free")
    ),
    responses(
        (status = 200, description = "Internship listings", body = Json<Vec<Internship>>)
    )
)]
#[axum::debug_handler]
pub async fn list_internships(
    State(state): State<AppState>,
    Query(query): Query<InternshipListQuery>,
) -> Result<impl IntoResponse> {
    let items = state.internship_service.list(query.category).await?;
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/api/portal/internships/{id}",
    params(
        ("id" = String, Path, description = "Internship ID")
    ),
    responses(
        (status = 200, description = "Internship found", body = Json<Internship>),
        (status = 404, description = "Internship not found")
    )
)]
#[axum::debug_handler]
pub async fn get_internship(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let item = state.internship_service.get(&id).await?;
    Ok(Json(item))
}

#[axum::debug_handler(state = AppState)]
pub async fn create_internship(
    State(state): State<AppState>,
    session: AdminSession,
    Json(payload): Json<InternshipPayload>,
) -> Result<impl IntoResponse> {
    let item = state
        .internship_service
        .create(payload, &session.token)
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[axum::debug_handler(state = AppState)]
pub async fn update_internship(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
    Json(payload): Json<InternshipPayload>,
) -> Result<impl IntoResponse> {
    let item = state
        .internship_service
        .update(&id, payload, &session.token)
        .await?;
    Ok(Json(item))
}

#[axum::debug_handler(state = AppState)]
pub async fn delete_internship(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.internship_service.delete(&id, &session.token).await?;
    Ok(StatusCode::NO_CONTENT)
}
