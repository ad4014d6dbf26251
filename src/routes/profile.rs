use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};

use crate::{
    dto::user_dto::{ChangePasswordForm, UpdateProfilePayload},
    error::Result,
    middleware::auth::BearerToken,
    AppState,
};

#[axum::debug_handler]
pub async fn get_me(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<impl IntoResponse> {
    let user = state.user_service.current_profile(&token).await?;
    Ok(Json(user))
}

#[axum::debug_handler]
pub async fn update_me(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<impl IntoResponse> {
    let user = state.user_service.update_profile(payload, &token).await?;
    Ok(Json(user))
}

#[axum::debug_handler]
pub async fn change_password(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Json(form): Json<ChangePasswordForm>,
) -> Result<impl IntoResponse> {
    state.user_service.change_password(form, &token).await?;
    Ok(StatusCode::NO_CONTENT)
}
