use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::utils::validation;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CertificatePayload {
    #[validate(length(min = 4, max = 64, message = "Certificate ID must be 4-64 characters"))]
    pub certificate_id: String,
    #[validate(length(min = 1, message = "Intern name is required"))]
    pub intern_name: String,
    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "PNG link must be a URL"))]
    pub png_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "PDF link must be a URL"))]
    pub pdf_url: Option<String>,
}

impl CertificatePayload {
    pub fn checked(self) -> Result<Self, ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };
        if self.end_date < self.start_date {
            errors.add(
                "endDate",
                validation::field_error("range", "End date cannot be before start date"),
            );
        }
        if let Some(issued) = self.issue_date {
            if issued < self.start_date {
                errors.add(
                    "issueDate",
                    validation::field_error("range", "Issue date cannot be before start date"),
                );
            }
        }
        validation::into_result(errors)?;

        Ok(Self {
            certificate_id: self.certificate_id.trim().to_string(),
            intern_name: self.intern_name.trim().to_string(),
            role: self.role.trim().to_string(),
            description: validation::non_blank(self.description),
            ..self
        })
    }
}
