use std::sync::Arc;

use tracing::{info, instrument};

use crate::dto::certificate_dto::CertificatePayload;
use crate::error::{Error, Result};
use crate::models::certificate::{Certificate, CertificateVerification};
use crate::repository::CertificateRepository;

#[derive(Clone)]
pub struct CertificateService {
    certificates: Arc<dyn CertificateRepository>,
}

impl CertificateService {
    pub fn new(certificates: Arc<dyn CertificateRepository>) -> Self {
        Self { certificates }
    }

    /// Public verification. An unknown code is a negative answer, not an error.
    #[instrument(skip(self))]
    pub async fn verify(&self, certificate_id: &str) -> Result<CertificateVerification> {
        let code = certificate_id.trim();
        if code.is_empty() {
            return Err(Error::BadRequest("Certificate ID is required".to_string()));
        }
        match self.certificates.find_certificate(code).await {
            Ok(certificate) => Ok(CertificateVerification {
                valid: true,
                certificate: Some(certificate),
            }),
            Err(e) if e.is_not_found() => Ok(CertificateVerification {
                valid: false,
                certificate: None,
            }),
            Err(e) => Err(e),
        }
    }

    pub async fn list(&self, token: &str) -> Result<Vec<Certificate>> {
        self.certificates.list_certificates(token).await
    }

    pub async fn create(&self, payload: CertificatePayload, token: &str) -> Result<Certificate> {
        let payload = payload.checked()?;
        let created = self.certificates.create_certificate(&payload, token).await?;
        info!(certificate_id = %created.certificate_id, "Certificate issued");
        Ok(created)
    }

    pub async fn update(
        &self,
        id: &str,
        payload: CertificatePayload,
        token: &str,
    ) -> Result<Certificate> {
        let payload = payload.checked()?;
        self.certificates.update_certificate(id, &payload, token).await
    }

    pub async fn delete(&self, id: &str, token: &str) -> Result<()> {
        self.certificates.delete_certificate(id, token).await?;
        info!(id = %id, "Certificate deleted");
        Ok(())
    }
}
