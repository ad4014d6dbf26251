use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};

use crate::{
    dto::application_dto::{ApplicationListQuery, NewApplicationPayload},
    error::Result,
    middleware::auth::BearerToken,
    AppState,
};

/// The signed-in user's own applications. The backend scopes the list to the token.
#[axum::debug_handler]
pub async fn list_my_applications(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Query(query): Query<ApplicationListQuery>,
) -> Result<impl IntoResponse> {
    let rows = state.application_service.list_rows(&query, &token).await?;
    Ok(Json(rows))
}

#[axum::debug_handler]
pub async fn submit_application(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Json(payload): Json<NewApplicationPayload>,
) -> Result<impl IntoResponse> {
    let application = state.application_service.submit(payload, &token).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

#[axum::debug_handler]
pub async fn withdraw_application(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let application = state.application_service.withdraw(&id, &token).await?;
    Ok(Json(application))
}
