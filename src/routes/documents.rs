use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};

use crate::{
    error::{Error, Result},
    middleware::auth::BearerToken,
    models::document::{DocumentKind, DocumentUpload},
    AppState,
};

#[axum::debug_handler]
pub async fn list_documents(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<impl IntoResponse> {
    let documents = state.document_service.list(&token).await?;
    Ok(Json(documents))
}

/// Multipart upload with a `file` part and an optional `kind` part.
#[axum::debug_handler]
pub async fn upload_document(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let mut kind = DocumentKind::Other;
    let mut file = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "kind" => {
                let raw = field.text().await?;
                kind = raw.parse().map_err(Error::BadRequest)?;
            }
            "file" => {
                let file_name = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| Error::BadRequest("File name is missing".into()))?;
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await?;
                file = Some((file_name, content_type, data));
            }
            other => {
                tracing::debug!(field = other, "Ignoring unknown multipart field");
            }
        }
    }

    let (file_name, content_type, data) =
        file.ok_or_else(|| Error::BadRequest("No file uploaded".into()))?;
    let upload = DocumentUpload {
        kind,
        file_name,
        content_type,
        data,
    };
    let document = state.document_service.upload(upload, &token).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

#[axum::debug_handler]
pub async fn delete_document(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.document_service.delete(&id, &token).await?;
    Ok(StatusCode::NO_CONTENT)
}
