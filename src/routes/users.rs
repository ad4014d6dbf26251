use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};

use crate::{
    dto::user_dto::{CreateUserPayload, UpdateUserPayload},
    error::Result,
    middleware::auth::AdminSession,
    AppState,
};

#[axum::debug_handler(state = AppState)]
pub async fn list_users(
    State(state): State<AppState>,
    session: AdminSession,
) -> Result<impl IntoResponse> {
    let users = state.user_service.list(&session.token).await?;
    Ok(Json(users))
}

#[axum::debug_handler(state = AppState)]
pub async fn get_user(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let user = state.user_service.get(&id, &session.token).await?;
    Ok(Json(user))
}

#[axum::debug_handler(state = AppState)]
pub async fn create_user(
    State(state): State<AppState>,
    session: AdminSession,
    Json(payload): Json<CreateUserPayload>,
) -> Result<impl IntoResponse> {
    let user = state.user_service.create(payload, &session.token).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[axum::debug_handler(state = AppState)]
pub async fn update_user(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUserPayload>,
) -> Result<impl IntoResponse> {
    let user = state
        .user_service
        .update(&id, payload, &session.token)
        .await?;
    Ok(Json(user))
}

#[axum::debug_handler(state = AppState)]
pub async fn delete_user(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state
        .user_service
        .delete(&id, &session.user, &session.token)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
