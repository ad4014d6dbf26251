pub mod api_client;
pub mod application_filter;
pub mod application_service;
pub mod certificate_service;
pub mod document_service;
pub mod export_service;
pub mod internship_service;
pub mod search_service;
pub mod user_service;
