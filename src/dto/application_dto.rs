use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::{Validate, ValidationErrors};

use crate::models::application::{ApplicationStatus, InterviewDetails};
use crate::utils::{time, validation};

pub const MIN_INSTRUCTIONS_LEN: usize = 10;

/// Status form exactly as the admin submitted it.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateForm {
    pub status: ApplicationStatus,
    #[serde(default)]
    pub interview_date: Option<String>,
    #[serde(default)]
    pub interview_time: Option<String>,
    #[serde(default)]
    pub interview_instructions: Option<String>,
    #[serde(default)]
    #[validate(length(max = 2000, message = "Comments must be at most 2000 characters"))]
    pub comments: Option<String>,
}

/// Target status together with the data that status requires.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusChange {
    InReview,
    Shortlisted,
    InterviewScheduled(InterviewDetails),
    Ongoing,
    Completed,
    Rejected,
    Withdrawn,
    Terminated,
}

impl StatusChange {
    pub fn status(&self) -> ApplicationStatus {
        match self {
            StatusChange::InReview => ApplicationStatus::InReview,
            StatusChange::Shortlisted => ApplicationStatus::Shortlisted,
            StatusChange::InterviewScheduled(_) => ApplicationStatus::InterviewScheduled,
            StatusChange::Ongoing => ApplicationStatus::Ongoing,
            StatusChange::Completed => ApplicationStatus::Completed,
            StatusChange::Rejected => ApplicationStatus::Rejected,
            StatusChange::Withdrawn => ApplicationStatus::Withdrawn,
            StatusChange::Terminated => ApplicationStatus::Terminated,
        }
    }

    pub fn interview(&self) -> Option<&InterviewDetails> {
        match self {
            StatusChange::InterviewScheduled(details) => Some(details),
            _ => None,
        }
    }

    /// Builds the change for a status that carries no extra data.
    pub fn without_interview(status: ApplicationStatus) -> Option<Self> {
        Some(match status {
            ApplicationStatus::InReview => StatusChange::InReview,
            ApplicationStatus::Shortlisted => StatusChange::Shortlisted,
            ApplicationStatus::InterviewScheduled => return None,
            ApplicationStatus::Ongoing => StatusChange::Ongoing,
            ApplicationStatus::Completed => StatusChange::Completed,
            ApplicationStatus::Rejected => StatusChange::Rejected,
            ApplicationStatus::Withdrawn => StatusChange::Withdrawn,
            ApplicationStatus::Terminated => StatusChange::Terminated,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusUpdate {
    pub change: StatusChange,
    pub comments: Option<String>,
}

impl StatusUpdate {
    pub fn to_payload(&self) -> ApplicationStatusPayload {
        ApplicationStatusPayload {
            status: self.change.status(),
            interview_details: self.change.interview().cloned(),
            admin_comments: self.comments.clone(),
        }
    }
}

/// Body of `PUT /api/applications/:id` for a status change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStatusPayload {
    pub status: ApplicationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interview_details: Option<InterviewDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_comments: Option<String>,
}

impl StatusUpdateForm {
    /// Checks the form against the rules of its target status.
    ///
    /// Interview fields are mandatory only for `Interview_Scheduled` and are
    /// discarded for every other status.
    pub fn into_update(self) -> Result<StatusUpdate, ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        let comments = validation::non_blank(self.comments);

        let change = match StatusChange::without_interview(self.status) {
            Some(change) => Some(change),
            None => {
                let date = match validation::non_blank(self.interview_date) {
                    None => {
                        errors.add(
                            "interviewDate",
                            validation::field_error("required", "Interview date is required"),
                        );
                        None
                    }
                    Some(raw) => {
                        let parsed = time::parse_date(&raw);
                        if parsed.is_none() {
                            errors.add(
                                "interviewDate",
                                validation::field_error(
                                    "invalid",
                                    "Interview date must be in YYYY-MM-DD format",
                                ),
                            );
                        }
                        parsed
                    }
                };

                let clock = match validation::non_blank(self.interview_time) {
                    None => {
                        errors.add(
                            "interviewTime",
                            validation::field_error("required", "Interview time is required"),
                        );
                        None
                    }
                    Some(raw) => match time::parse_time(&raw) {
                        Some(parsed) => Some((raw, parsed)),
                        None => {
                            errors.add(
                                "interviewTime",
                                validation::field_error(
                                    "invalid",
                                    "Interview time must look like 02:30 PM or 14:30",
                                ),
                            );
                            None
                        }
                    },
                };

                let instructions = validation::non_blank(self.interview_instructions)
                    .unwrap_or_default();
                if instructions.chars().count() < MIN_INSTRUCTIONS_LEN {
                    errors.add(
                        "interviewInstructions",
                        validation::field_error(
                            "length",
                            format!(
                                "Interview instructions must be at least {} characters",
                                MIN_INSTRUCTIONS_LEN
                            ),
                        ),
                    );
                }

                match (date, clock) {
                    (Some(date), Some((raw_time, parsed_time)))
                        if instructions.chars().count() >= MIN_INSTRUCTIONS_LEN =>
                    {
                        Some(StatusChange::InterviewScheduled(InterviewDetails {
                            date,
                            time: raw_time,
                            instructions,
                            scheduled_at: time::combine_utc(date, parsed_time),
                        }))
                    }
                    _ => None,
                }
            }
        };

        validation::into_result(errors)?;
        let change = change.ok_or_else(ValidationErrors::new)?;
        Ok(StatusUpdate { change, comments })
    }
}

/// Body sent by an applicant submitting an application.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewApplicationPayload {
    #[validate(length(min = 1, message = "Internship is required"))]
    pub internship_id: String,
    #[validate(length(min = 2, max = 120, message = "Full name must be 2-120 characters"))]
    pub full_name: String,
    #[validate(email(message = "Email address is invalid"))]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 7, max = 20, message = "Phone number must be 7-20 characters"))]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "Resume link must be a URL"))]
    pub resume_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 5000, message = "Cover letter must be at most 5000 characters"))]
    pub cover_letter: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ApplicationStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: ApplicationStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        trimmed
            .parse::<ApplicationStatus>()
            .map(StatusFilter::Only)
            .map_err(|e| e.to_string())
    }
}

impl<'de> Deserialize<'de> for StatusFilter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        StatusFilter::try_from(raw).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[serde(alias = "oldest", alias = "ascending")]
    Asc,
    #[default]
    #[serde(alias = "newest", alias = "descending")]
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApplicationListQuery {
    pub search: Option<String>,
    pub status: StatusFilter,
    pub sort: SortDirection,
}

impl ApplicationListQuery {
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    /// Query parameters forwarded to the backend for server-side filtering.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let StatusFilter::Only(status) = self.status {
            params.push(("status", status.as_str().to_string()));
        }
        if let Some(term) = self.search_term() {
            params.push(("search", term.to_string()));
        }
        params.push(("sort", self.sort.as_str().to_string()));
        params
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStats {
    pub total: usize,
    pub active: usize,
    pub by_status: BTreeMap<ApplicationStatus, usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(status: ApplicationStatus) -> StatusUpdateForm {
        StatusUpdateForm {
            status,
            interview_date: None,
            interview_time: None,
            interview_instructions: None,
            comments: None,
        }
    }

    #[test]
    fn statuses_without_interview_need_no_interview_fields() {
        for status in ApplicationStatus::ALL {
            if status == ApplicationStatus::InterviewScheduled {
                continue;
            }
            let update = form(status).into_update().expect("should validate");
            assert_eq!(update.change.status(), status);
            assert!(update.change.interview().is_none());
        }
    }

    #[test]
    fn interview_fields_are_dropped_for_other_statuses() {
        let mut f = form(ApplicationStatus::Shortlisted);
        f.interview_date = Some("not a date".into());
        f.interview_instructions = Some("short".into());
        let payload = f.into_update().unwrap().to_payload();
        assert_eq!(payload.status, ApplicationStatus::Shortlisted);
        assert!(payload.interview_details.is_none());
    }

    #[test]
    fn interview_requires_every_field() {
        let errors = form(ApplicationStatus::InterviewScheduled)
            .into_update()
            .unwrap_err();
        let fields = crate::error::field_messages(&errors);
        assert_eq!(fields["interviewDate"], vec!["Interview date is required"]);
        assert_eq!(fields["interviewTime"], vec!["Interview time is required"]);
        assert_eq!(
            fields["interviewInstructions"],
            vec!["Interview instructions must be at least 10 characters"]
        );
    }

    #[test]
    fn short_instructions_fail_alone() {
        let mut f = form(ApplicationStatus::InterviewScheduled);
        f.interview_date = Some("2024-05-01".into());
        f.interview_time = Some("02:30 PM".into());
        f.interview_instructions = Some("  bring ID ".into());
        let errors = f.into_update().unwrap_err();
        let fields = crate::error::field_messages(&errors);
        assert_eq!(fields.len(), 1);
        assert!(fields.contains_key("interviewInstructions"));
    }

    #[test]
    fn malformed_date_and_time_are_reported() {
        let mut f = form(ApplicationStatus::InterviewScheduled);
        f.interview_date = Some("01/05/2024".into());
        f.interview_time = Some("half past two".into());
        f.interview_instructions = Some("Join the video call link".into());
        let errors = f.into_update().unwrap_err();
        let fields = crate::error::field_messages(&errors);
        assert_eq!(
            fields["interviewDate"],
            vec!["Interview date must be in YYYY-MM-DD format"]
        );
        assert!(fields.contains_key("interviewTime"));
        assert!(!fields.contains_key("interviewInstructions"));
    }

    #[test]
    fn scheduled_interview_produces_iso_timestamp() {
        let mut f = form(ApplicationStatus::InterviewScheduled);
        f.interview_date = Some("2024-05-01".into());
        f.interview_time = Some("02:30 PM".into());
        f.interview_instructions = Some("Bring resume".into());
        f.comments = Some("  Strong profile ".into());

        let update = f.into_update().unwrap();
        let details = update.change.interview().unwrap();
        assert_eq!(crate::utils::time::to_iso(details.scheduled_at), "2024-05-01T14:30:00Z");
        assert_eq!(details.time, "02:30 PM");
        assert_eq!(update.comments.as_deref(), Some("Strong profile"));

        let payload = serde_json::to_value(update.to_payload()).unwrap();
        assert_eq!(payload["status"], "Interview_Scheduled");
        assert_eq!(payload["interviewDetails"]["scheduledAt"], "2024-05-01T14:30:00Z");
        assert_eq!(payload["adminComments"], "Strong profile");
    }

    #[test]
    fn overly_long_comments_fail() {
        let mut f = form(ApplicationStatus::Rejected);
        f.comments = Some("x".repeat(2001));
        let errors = f.into_update().unwrap_err();
        assert!(crate::error::field_messages(&errors).contains_key("comments"));
    }

    #[test]
    fn status_filter_parses_all_and_statuses() {
        assert_eq!(StatusFilter::try_from("all".to_string()).unwrap(), StatusFilter::All);
        assert_eq!(StatusFilter::try_from(String::new()).unwrap(), StatusFilter::All);
        assert_eq!(
            StatusFilter::try_from("Ongoing".to_string()).unwrap(),
            StatusFilter::Only(ApplicationStatus::Ongoing)
        );
        assert!(StatusFilter::try_from("archived".to_string()).is_err());
    }

    #[test]
    fn list_query_params_skip_all_and_blank_search() {
        let query = ApplicationListQuery {
            search: Some("   ".into()),
            status: StatusFilter::All,
            sort: SortDirection::Asc,
        };
        assert_eq!(query.to_params(), vec![("sort", "asc".to_string())]);

        let query = ApplicationListQuery {
            search: Some(" verma ".into()),
            status: StatusFilter::Only(ApplicationStatus::InReview),
            sort: SortDirection::Desc,
        };
        assert_eq!(
            query.to_params(),
            vec![
                ("status", "In_Review".to_string()),
                ("search", "verma".to_string()),
                ("sort", "desc".to_string()),
            ]
        );
    }
}
