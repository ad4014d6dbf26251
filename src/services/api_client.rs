use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::dto::application_dto::{
    ApplicationListQuery, ApplicationStatusPayload, NewApplicationPayload,
};
use crate::dto::certificate_dto::CertificatePayload;
use crate::dto::internship_dto::InternshipPayload;
use crate::dto::user_dto::{
    ChangePasswordForm, CreateUserPayload, UpdateProfilePayload, UpdateUserPayload,
};
use crate::error::{Error, Result};
use crate::models::{
    application::Application,
    certificate::Certificate,
    document::{Document, DocumentUpload},
    internship::Internship,
    user::User,
};
use crate::repository::{
    ApplicationRepository, CertificateRepository, DocumentRepository, InternshipRepository,
    UserRepository,
};

/// The backend answers either with the bare value or wrapped in `{ "data": ... }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(value) => value,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Pulls a human-readable message out of a failed backend response body.
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(msg) = parsed.message.or(parsed.error).filter(|m| !m.trim().is_empty()) {
            return msg;
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() && trimmed.len() <= 500 {
        return trimmed.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("Request failed")
        .to_string()
}

/// Backend path for one record: `collection` followed by `id` as a single
/// percent-encoded segment. Dot segments are refused since they would
/// resolve to a different resource.
fn record_path(collection: &str, id: &str) -> Result<String> {
    if matches!(id.trim(), "" | "." | "..") {
        return Err(Error::BadRequest(format!("Invalid record id: {:?}", id)));
    }
    let mut scratch = url::Url::parse("http://backend.invalid/")
        .map_err(|e| Error::Config(format!("Failed to build backend path: {}", e)))?;
    scratch
        .path_segments_mut()
        .map_err(|_| Error::Config("Backend path cannot hold segments".to_string()))?
        .clear()
        .extend(collection.split('/').filter(|s| !s.is_empty()))
        .push(id);
    Ok(scratch.path().to_string())
}

/// Authenticated JSON client for the portal's REST backend.
///
/// One attempt per call: failures are returned to the caller as
/// [`Error::Api`] (non-success status) or [`Error::Reqwest`] (transport).
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self
            .client
            .request(method, self.url(path))
            .header(header::ACCEPT, "application/json");
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        let message = error_message(status, &body);
        warn!(%url, status = status.as_u16(), "Backend request failed: {}", message);
        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = Self::check(builder.send().await?).await?;
        let bytes = response.bytes().await?;
        let envelope: Envelope<T> = serde_json::from_slice(&bytes)
            .map_err(|e| Error::BadResponse(e.to_string()))?;
        Ok(envelope.into_inner())
    }

    async fn send_empty(&self, builder: RequestBuilder) -> Result<()> {
        Self::check(builder.send().await?).await?;
        Ok(())
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> Result<T> {
        debug!(path, "GET");
        self.send_json(self.request(Method::GET, path, token)).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q, token: &str) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        debug!(path, "GET");
        self.send_json(self.request(Method::GET, path, Some(token)).query(query))
            .await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B, token: &str) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(path, "POST");
        self.send_json(self.request(Method::POST, path, Some(token)).json(body))
            .await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B, token: &str) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(path, "PUT");
        self.send_json(self.request(Method::PUT, path, Some(token)).json(body))
            .await
    }

    pub async fn put_no_content<B>(&self, path: &str, body: &B, token: &str) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        debug!(path, "PUT");
        self.send_empty(self.request(Method::PUT, path, Some(token)).json(body))
            .await
    }

    pub async fn delete(&self, path: &str, token: &str) -> Result<()> {
        debug!(path, "DELETE");
        self.send_empty(self.request(Method::DELETE, path, Some(token)))
            .await
    }
}

#[async_trait]
impl ApplicationRepository for ApiClient {
    #[instrument(skip(self, token))]
    async fn list_applications(
        &self,
        query: &ApplicationListQuery,
        token: &str,
    ) -> Result<Vec<Application>> {
        self.get_with_query("/api/applications", &query.to_params(), token)
            .await
    }

    async fn get_application(&self, id: &str, token: &str) -> Result<Application> {
        self.get(&record_path("/api/applications", id)?, Some(token))
            .await
    }

    async fn create_application(
        &self,
        payload: &NewApplicationPayload,
        token: &str,
    ) -> Result<Application> {
        self.post("/api/applications", payload, token).await
    }

    #[instrument(skip(self, payload, token), fields(status = %payload.status))]
    async fn update_application_status(
        &self,
        id: &str,
        payload: &ApplicationStatusPayload,
        token: &str,
    ) -> Result<Application> {
        self.put(&record_path("/api/applications", id)?, payload, token)
            .await
    }

    async fn delete_application(&self, id: &str, token: &str) -> Result<()> {
        self.delete(&record_path("/api/applications", id)?, token)
            .await
    }
}

#[async_trait]
impl InternshipRepository for ApiClient {
    async fn list_internships(&self) -> Result<Vec<Internship>> {
        self.get("/api/internships", None).await
    }

    async fn get_internship(&self, id: &str) -> Result<Internship> {
        self.get(&record_path("/api/internships", id)?, None).await
    }

    async fn create_internship(
        &self,
        payload: &InternshipPayload,
        token: &str,
    ) -> Result<Internship> {
        self.post("/api/internships", payload, token).await
    }

    async fn update_internship(
        &self,
        id: &str,
        payload: &InternshipPayload,
        token: &str,
    ) -> Result<Internship> {
        self.put(&record_path("/api/internships", id)?, payload, token)
            .await
    }

    async fn delete_internship(&self, id: &str, token: &str) -> Result<()> {
        self.delete(&record_path("/api/internships", id)?, token)
            .await
    }
}

#[async_trait]
impl CertificateRepository for ApiClient {
    async fn list_certificates(&self, token: &str) -> Result<Vec<Certificate>> {
        self.get("/api/certificates", Some(token)).await
    }

    async fn create_certificate(
        &self,
        payload: &CertificatePayload,
        token: &str,
    ) -> Result<Certificate> {
        self.post("/api/certificates", payload, token).await
    }

    async fn update_certificate(
        &self,
        id: &str,
        payload: &CertificatePayload,
        token: &str,
    ) -> Result<Certificate> {
        self.put(&record_path("/api/certificates", id)?, payload, token)
            .await
    }

    async fn delete_certificate(&self, id: &str, token: &str) -> Result<()> {
        self.delete(&record_path("/api/certificates", id)?, token)
            .await
    }

    async fn find_certificate(&self, certificate_id: &str) -> Result<Certificate> {
        self.get(&record_path("/api/certificates/verify", certificate_id)?, None)
            .await
    }
}

#[async_trait]
impl UserRepository for ApiClient {
    async fn list_users(&self, token: &str) -> Result<Vec<User>> {
        self.get("/api/users", Some(token)).await
    }

    async fn get_user(&self, id: &str, token: &str) -> Result<User> {
        self.get(&record_path("/api/users", id)?, Some(token)).await
    }

    async fn create_user(&self, payload: &CreateUserPayload, token: &str) -> Result<User> {
        self.post("/api/users", payload, token).await
    }

    async fn update_user(
        &self,
        id: &str,
        payload: &UpdateUserPayload,
        token: &str,
    ) -> Result<User> {
        self.put(&record_path("/api/users", id)?, payload, token).await
    }

    async fn delete_user(&self, id: &str, token: &str) -> Result<()> {
        self.delete(&record_path("/api/users", id)?, token).await
    }

    async fn current_profile(&self, token: &str) -> Result<User> {
        self.get("/api/users/me/profile", Some(token)).await
    }

    async fn update_profile(&self, payload: &UpdateProfilePayload, token: &str) -> Result<User> {
        self.put("/api/users/me/profile", payload, token).await
    }

    async fn change_password(&self, form: &ChangePasswordForm, token: &str) -> Result<()> {
        self.put_no_content("/api/users/me/password", form, token)
            .await
    }
}

#[async_trait]
impl DocumentRepository for ApiClient {
    async fn list_documents(&self, token: &str) -> Result<Vec<Document>> {
        self.get("/api/documents", Some(token)).await
    }

    #[instrument(skip(self, upload, token), fields(file = %upload.file_name, bytes = upload.data.len()))]
    async fn upload_document(&self, upload: DocumentUpload, token: &str) -> Result<Document> {
        let mut part = reqwest::multipart::Part::bytes(upload.data.to_vec())
            .file_name(upload.file_name.clone());
        if let Some(content_type) = upload.content_type.as_deref() {
            part = part.mime_str(content_type).map_err(|_| {
                Error::BadRequest(format!("Invalid content type: {}", content_type))
            })?;
        }
        let form = reqwest::multipart::Form::new()
            .text("kind", upload.kind.as_str())
            .part("file", part);
        self.send_json(
            self.request(Method::POST, "/api/documents", Some(token))
                .multipart(form),
        )
        .await
    }

    async fn delete_document(&self, id: &str, token: &str) -> Result<()> {
        self.delete(&record_path("/api/documents", id)?, token)
            .await
    }
}
