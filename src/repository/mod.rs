//! Access to the portal's records.
//!
//! Every trait here is implemented by [`crate::services::api_client::ApiClient`]
//! against the REST backend. Services hold them as trait objects so tests can
//! swap in mocks.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::dto::application_dto::{
    ApplicationListQuery, ApplicationStatusPayload, NewApplicationPayload,
};
use crate::dto::certificate_dto::CertificatePayload;
use crate::dto::internship_dto::InternshipPayload;
use crate::dto::user_dto::{
    ChangePasswordForm, CreateUserPayload, UpdateProfilePayload, UpdateUserPayload,
};
use crate::error::Result;
use crate::models::{
    application::Application,
    certificate::Certificate,
    document::{Document, DocumentUpload},
    internship::Internship,
    user::User,
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn list_applications(
        &self,
        query: &ApplicationListQuery,
        token: &str,
    ) -> Result<Vec<Application>>;
    async fn get_application(&self, id: &str, token: &str) -> Result<Application>;
    async fn create_application(
        &self,
        payload: &NewApplicationPayload,
        token: &str,
    ) -> Result<Application>;
    async fn update_application_status(
        &self,
        id: &str,
        payload: &ApplicationStatusPayload,
        token: &str,
    ) -> Result<Application>;
    async fn delete_application(&self, id: &str, token: &str) -> Result<()>;
}

/// Internship listings are public to read; changes need an admin token.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait InternshipRepository: Send + Sync {
    async fn list_internships(&self) -> Result<Vec<Internship>>;
    async fn get_internship(&self, id: &str) -> Result<Internship>;
    async fn create_internship(&self, payload: &InternshipPayload, token: &str)
        -> Result<Internship>;
    async fn update_internship(
        &self,
        id: &str,
        payload: &InternshipPayload,
        token: &str,
    ) -> Result<Internship>;
    async fn delete_internship(&self, id: &str, token: &str) -> Result<()>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait CertificateRepository: Send + Sync {
    async fn list_certificates(&self, token: &str) -> Result<Vec<Certificate>>;
    async fn create_certificate(
        &self,
        payload: &CertificatePayload,
        token: &str,
    ) -> Result<Certificate>;
    async fn update_certificate(
        &self,
        id: &str,
        payload: &CertificatePayload,
        token: &str,
    ) -> Result<Certificate>;
    async fn delete_certificate(&self, id: &str, token: &str) -> Result<()>;
    /// Looks a certificate up by its public code. No token required.
    async fn find_certificate(&self, certificate_id: &str) -> Result<Certificate>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list_users(&self, token: &str) -> Result<Vec<User>>;
    async fn get_user(&self, id: &str, token: &str) -> Result<User>;
    async fn create_user(&self, payload: &CreateUserPayload, token: &str) -> Result<User>;
    async fn update_user(&self, id: &str, payload: &UpdateUserPayload, token: &str)
        -> Result<User>;
    async fn delete_user(&self, id: &str, token: &str) -> Result<()>;
    async fn current_profile(&self, token: &str) -> Result<User>;
    async fn update_profile(&self, payload: &UpdateProfilePayload, token: &str) -> Result<User>;
    async fn change_password(&self, form: &ChangePasswordForm, token: &str) -> Result<()>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    async fn list_documents(&self, token: &str) -> Result<Vec<Document>>;
    async fn upload_document(&self, upload: DocumentUpload, token: &str) -> Result<Document>;
    async fn delete_document(&self, id: &str, token: &str) -> Result<()>;
}
