use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::error::{Error, Result};
use crate::models::document::{Document, DocumentUpload};
use crate::repository::DocumentRepository;

const ALLOWED_EXTENSIONS: [&str; 6] = ["pdf", "doc", "docx", "jpg", "jpeg", "png"];

/// Rejects files whose extension is not accepted or whose leading bytes
/// contradict it.
pub fn check_upload(upload: &DocumentUpload, max_bytes: usize) -> Result<()> {
    if upload.data.is_empty() {
        return Err(Error::BadRequest("Uploaded file is empty".into()));
    }
    if upload.data.len() > max_bytes {
        return Err(Error::BadRequest(format!(
            "File is too large (limit {} bytes)",
            max_bytes
        )));
    }

    let ext = Path::new(&upload.file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(Error::BadRequest(format!(
            "File type not allowed. Allowed: {}",
            ALLOWED_EXTENSIONS.join(", ")
        )));
    }

    let data = &upload.data;
    match ext.as_str() {
        "pdf" if !data.starts_with(b"%PDF") => {
            Err(Error::BadRequest("Invalid PDF file content".into()))
        }
        "jpg" | "jpeg" if !data.starts_with(&[0xFF, 0xD8]) => {
            Err(Error::BadRequest("Invalid JPEG file content".into()))
        }
        "png" if !data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) => {
            Err(Error::BadRequest("Invalid PNG file content".into()))
        }
        _ => Ok(()),
    }
}

#[derive(Clone)]
pub struct DocumentService {
    documents: Arc<dyn DocumentRepository>,
    max_upload_bytes: usize,
}

impl DocumentService {
    pub fn new(documents: Arc<dyn DocumentRepository>, max_upload_bytes: usize) -> Self {
        Self {
            documents,
            max_upload_bytes,
        }
    }

    pub async fn list(&self, token: &str) -> Result<Vec<Document>> {
        self.documents.list_documents(token).await
    }

    pub async fn upload(&self, upload: DocumentUpload, token: &str) -> Result<Document> {
        check_upload(&upload, self.max_upload_bytes)?;
        let size = upload.data.len();
        let document = self.documents.upload_document(upload, token).await?;
        info!(
            document_id = %document.id,
            kind = document.kind.as_str(),
            size,
            "Document uploaded"
        );
        Ok(document)
    }

    pub async fn delete(&self, id: &str, token: &str) -> Result<()> {
        self.documents.delete_document(id, token).await
    }
}
