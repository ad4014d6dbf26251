use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InternshipCategory {
    Stipend,
    Paid,
    Free,
}

impl InternshipCategory {
    /// `Free` listings never carry an amount, the others always do.
    pub fn expects_amount(&self) -> bool {
        !matches!(self, InternshipCategory::Free)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Internship {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    pub category: InternshipCategory,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub perks: Vec<String>,
    #[serde(default)]
    pub selection_steps: Vec<String>,
    #[serde(default)]
    pub announcements: Vec<String>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub openings: Option<u32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
