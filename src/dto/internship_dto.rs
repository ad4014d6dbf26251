use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::models::internship::InternshipCategory;
use crate::utils::validation;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InternshipPayload {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    pub category: InternshipCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub perks: Vec<String>,
    #[serde(default)]
    pub selection_steps: Vec<String>,
    #[serde(default)]
    pub announcements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "Openings must be at least 1"))]
    pub openings: Option<u32>,
}

impl InternshipPayload {
    /// Validates the payload and returns it with bullet lists cleaned.
    pub fn normalized(self) -> Result<Self, ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        match (self.category.expects_amount(), self.amount) {
            (true, None) => errors.add(
                "amount",
                validation::field_error("required", "Amount is required for this category"),
            ),
            (true, Some(amount)) if amount <= Decimal::ZERO => errors.add(
                "amount",
                validation::field_error("range", "Amount must be greater than zero"),
            ),
            (false, Some(amount)) if !amount.is_zero() => errors.add(
                "amount",
                validation::field_error("forbidden", "Free internships cannot carry an amount"),
            ),
            _ => {}
        }

        validation::into_result(errors)?;

        let amount = if self.category.expects_amount() {
            self.amount
        } else {
            None
        };

        Ok(Self {
            title: self.title.trim().to_string(),
            company: validation::non_blank(self.company),
            description: validation::non_blank(self.description),
            location: validation::non_blank(self.location),
            duration: validation::non_blank(self.duration),
            amount,
            skills: validation::clean_bullets(self.skills),
            perks: validation::clean_bullets(self.perks),
            selection_steps: validation::clean_bullets(self.selection_steps),
            announcements: validation::clean_bullets(self.announcements),
            ..self
        })
    }
}
