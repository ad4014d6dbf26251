use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};

use crate::{
    dto::application_dto::{ApplicationListQuery, StatusUpdateForm},
    error::Result,
    middleware::auth::AdminSession,
    services::export_service::{ExportService, XLSX_CONTENT_TYPE},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/portal/admin/applications",
    params(
        ("search" = Option<String>, Query, description = "Applicant name or internship title"),
        ("status" = Option<String>, Query, description = "`all` or one status value"),
        ("sort" = Option<String>, Query, description = "`asc` or `desc` by application date")
    ),
    responses(
        (status = 200, description = "Filtered applications", body = Json<Vec<ApplicationRow>>),
        (status = 403, description = "Not an admin")
    )
)]
#[axum::debug_handler(state = AppState)]
pub async fn list_applications(
    State(state): State<AppState>,
    session: AdminSession,
    Query(query): Query<ApplicationListQuery>,
) -> Result<impl IntoResponse> {
    let rows = state
        .application_service
        .list_rows(&query, &session.token)
        .await?;
    Ok(Json(rows))
}

/// Search-as-you-type. Answers 204 when a newer search from the same
/// session has replaced this one.
#[utoipa::path(
    get,
    path = "/api/portal/admin/applications/search",
    params(
        ("search" = Option<String>, Query, description = "Applicant name or internship title"),
        ("status" = Option<String>, Query, description = "`all` or one status value"),
        ("sort" = Option<String>, Query, description = "`asc` or `desc` by application date")
    ),
    responses(
        (status = 200, description = "Latest search results", body = Json<Vec<ApplicationRow>>),
        (status = 204, description = "Superseded by a newer search")
    )
)]
#[axum::debug_handler(state = AppState)]
pub async fn search_applications(
    State(state): State<AppState>,
    session: AdminSession,
    Query(query): Query<ApplicationListQuery>,
) -> Result<Response> {
    let result = state
        .search_service
        .search(&session.token, &query, &session.token)
        .await?;
    Ok(match result {
        Some(rows) => Json(rows).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

#[utoipa::path(
    get,
    path = "/api/portal/admin/applications/stats",
    responses(
        (status = 200, description = "Counts per status", body = Json<ApplicationStats>)
    )
)]
#[axum::debug_handler(state = AppState)]
pub async fn application_stats(
    State(state): State<AppState>,
    session: AdminSession,
) -> Result<impl IntoResponse> {
    let stats = state.application_service.stats(&session.token).await?;
    Ok(Json(stats))
}

/// Export the filtered list as XLSX, in the same order as the listing.
#[utoipa::path(
    get,
    path = "/api/portal/admin/applications/export",
    params(
        ("search" = Option<String>, Query, description = "Applicant name or internship title"),
        ("status" = Option<String>, Query, description = "`all` or one status value"),
        ("sort" = Option<String>, Query, description = "`asc` or `desc` by application date")
    ),
    responses(
        (status = 200, description = "XLSX workbook")
    )
)]
#[axum::debug_handler(state = AppState)]
pub async fn export_applications(
    State(state): State<AppState>,
    session: AdminSession,
    Query(query): Query<ApplicationListQuery>,
) -> Result<impl IntoResponse> {
    let rows = state
        .application_service
        .list_rows(&query, &session.token)
        .await?;
    let buffer = ExportService::generate_applications_xlsx(&rows)?;
    let filename = format!(
        "applications_{}.xlsx",
        chrono::Utc::now().format("%Y%m%d")
    );
    let disposition = format!("attachment; filename=\"{}\"", filename);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        buffer,
    ))
}

#[utoipa::path(
    get,
    path = "/api/portal/admin/applications/{id}",
    params(
        ("id" = String, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Application found", body = Json<Application>),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler(state = AppState)]
pub async fn get_application(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let application = state.application_service.get(&id, &session.token).await?;
    Ok(Json(application))
}

/// Moves an application to a new status. Scheduling an interview requires
/// a date, a time and instructions; other statuses ignore those fields.
#[utoipa::path(
    post,
    path = "/api/portal/admin/applications/{id}/status",
    params(
        ("id" = String, Path, description = "Application ID")
    ),
    request_body = StatusUpdateForm,
    responses(
        (status = 200, description = "Status updated", body = Json<Application>),
        (status = 400, description = "Field errors, keyed by form field"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler(state = AppState)]
pub async fn update_application_status(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
    Json(form): Json<StatusUpdateForm>,
) -> Result<impl IntoResponse> {
    let application = state
        .application_service
        .update_status(&id, form, &session.token)
        .await?;
    Ok(Json(application))
}

#[utoipa::path(
    delete,
    path = "/api/portal/admin/applications/{id}",
    params(
        ("id" = String, Path, description = "Application ID")
    ),
    responses(
        (status = 204, description = "Application deleted"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler(state = AppState)]
pub async fn delete_application(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state
        .application_service
        .delete(&id, &session.token)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
