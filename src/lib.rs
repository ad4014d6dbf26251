pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::repository::{
    ApplicationRepository, CertificateRepository, DocumentRepository, InternshipRepository,
    UserRepository,
};
use crate::services::{
    api_client::ApiClient, application_service::ApplicationService,
    certificate_service::CertificateService, document_service::DocumentService,
    internship_service::InternshipService, search_service::SearchService,
    user_service::UserService,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub application_service: ApplicationService,
    pub search_service: SearchService,
    pub internship_service: InternshipService,
    pub certificate_service: CertificateService,
    pub user_service: UserService,
    pub document_service: DocumentService,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Arc::new(ApiClient::new(
            config.api_base_url.clone(),
            config.request_timeout,
        )?);

        let applications: Arc<dyn ApplicationRepository> = client.clone();
        let internships: Arc<dyn InternshipRepository> = client.clone();
        let certificates: Arc<dyn CertificateRepository> = client.clone();
        let users: Arc<dyn UserRepository> = client.clone();
        let documents: Arc<dyn DocumentRepository> = client;

        let application_service = ApplicationService::new(applications, internships.clone());
        let search_service =
            SearchService::new(application_service.clone(), config.search_debounce);

        Ok(Self {
            config: Arc::new(config.clone()),
            application_service,
            search_service,
            internship_service: InternshipService::new(internships),
            certificate_service: CertificateService::new(certificates),
            user_service: UserService::new(users),
            document_service: DocumentService::new(documents, config.max_upload_bytes),
        })
    }
}
