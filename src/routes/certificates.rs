use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};

use crate::{
    dto::certificate_dto::CertificatePayload, error::Result, middleware::auth::AdminSession,
    AppState,
};

/// Public lookup used by the "verify a certificate" page.
#[utoipa::path(
    get,
    path = "/api/portal/certificates/verify/{certificate_id}",
    params(
        ("certificate_id" = String, Path, description = "Code printed on the certificate")
    ),
    responses(
        (status = 200, description = "Verification result", body = Json<CertificateVerification>)
    )
)]
#[axum::debug_handler]
pub async fn verify_certificate(
    State(state): State<AppState>,
    Path(certificate_id): Path<String>,
) -> Result<impl IntoResponse> {
    let result = state.certificate_service.verify(&certificate_id).await?;
    Ok(Json(result))
}

#[axum::debug_handler(state = AppState)]
pub async fn list_certificates(
    State(state): State<AppState>,
    session: AdminSession,
) -> Result<impl IntoResponse> {
    let items = state.certificate_service.list(&session.token).await?;
    Ok(Json(items))
}

#[axum::debug_handler(state = AppState)]
pub async fn create_certificate(
    State(state): State<AppState>,
    session: AdminSession,
    Json(payload): Json<CertificatePayload>,
) -> Result<impl IntoResponse> {
    let item = state
        .certificate_service
        .create(payload, &session.token)
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[axum::debug_handler(state = AppState)]
pub async fn update_certificate(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
    Json(payload): Json<CertificatePayload>,
) -> Result<impl IntoResponse> {
    let item = state
        .certificate_service
        .update(&id, payload, &session.token)
        .await?;
    Ok(Json(item))
}

#[axum::debug_handler(state = AppState)]
pub async fn delete_certificate(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.certificate_service.delete(&id, &session.token).await?;
    Ok(StatusCode::NO_CONTENT)
}
