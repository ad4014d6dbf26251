use axum::{response::IntoResponse, Json};

use crate::models::application::{ApplicationStatus, StatusDescriptor};

/// Every application status with its label and badge colour, in lifecycle order.
#[utoipa::path(
    get,
    path = "/api/portal/statuses",
    responses(
        (status = 200, description = "Status dictionary", body = Json<Vec<StatusDescriptor>>)
    )
)]
#[axum::debug_handler]
pub async fn list_statuses() -> impl IntoResponse {
    let statuses: Vec<StatusDescriptor> = ApplicationStatus::ALL
        .into_iter()
        .map(StatusDescriptor::from)
        .collect();
    Json(statuses)
}
