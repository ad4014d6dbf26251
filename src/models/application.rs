use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle stage of an application.
///
/// The wire value is the backend's underscore form (`Interview_Scheduled`);
/// [`ApplicationStatus::label`] is what the portal shows to people.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ApplicationStatus {
    #[serde(rename = "In_Review", alias = "In Review")]
    InReview,
    #[serde(rename = "Shortlisted")]
    Shortlisted,
    #[serde(rename = "Interview_Scheduled", alias = "Interview Scheduled")]
    InterviewScheduled,
    #[serde(rename = "Ongoing")]
    Ongoing,
    #[serde(rename = "Completed")]
    Completed,
    #[serde(rename = "Rejected")]
    Rejected,
    #[serde(rename = "Withdrawn")]
    Withdrawn,
    #[serde(rename = "Terminated")]
    Terminated,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 8] = [
        ApplicationStatus::InReview,
        ApplicationStatus::Shortlisted,
        ApplicationStatus::InterviewScheduled,
        ApplicationStatus::Ongoing,
        ApplicationStatus::Completed,
        ApplicationStatus::Rejected,
        ApplicationStatus::Withdrawn,
        ApplicationStatus::Terminated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::InReview => "In_Review",
            ApplicationStatus::Shortlisted => "Shortlisted",
            ApplicationStatus::InterviewScheduled => "Interview_Scheduled",
            ApplicationStatus::Ongoing => "Ongoing",
            ApplicationStatus::Completed => "Completed",
            ApplicationStatus::Rejected => "Rejected",
            ApplicationStatus::Withdrawn => "Withdrawn",
            ApplicationStatus::Terminated => "Terminated",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::InReview => "In Review",
            ApplicationStatus::Shortlisted => "Shortlisted",
            ApplicationStatus::InterviewScheduled => "Interview Scheduled",
            ApplicationStatus::Ongoing => "Ongoing",
            ApplicationStatus::Completed => "Completed",
            ApplicationStatus::Rejected => "Rejected",
            ApplicationStatus::Withdrawn => "Withdrawn",
            ApplicationStatus::Terminated => "Terminated",
        }
    }

    /// Badge colour as a 24-bit RGB value.
    pub fn badge_rgb(&self) -> u32 {
        match self {
            ApplicationStatus::InReview => 0xF59E0B,           // Amber
            ApplicationStatus::Shortlisted => 0x3B82F6,        // Blue
            ApplicationStatus::InterviewScheduled => 0x8B5CF6, // Violet
            ApplicationStatus::Ongoing => 0x6366F1,            // Indigo
            ApplicationStatus::Completed => 0x10B981,          // Emerald
            ApplicationStatus::Rejected => 0xEF4444,           // Red
            ApplicationStatus::Withdrawn => 0x64748B,          // Slate
            ApplicationStatus::Terminated => 0xF97316,         // Orange
        }
    }

    pub fn badge_color(&self) -> String {
        format!("#{:06X}", self.badge_rgb())
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ApplicationStatus::Completed
                | ApplicationStatus::Rejected
                | ApplicationStatus::Withdrawn
                | ApplicationStatus::Terminated
        )
    }

    pub fn requires_interview(&self) -> bool {
        matches!(self, ApplicationStatus::InterviewScheduled)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown application status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for ApplicationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ApplicationStatus::ALL
            .into_iter()
            .find(|status| {
                status.as_str().eq_ignore_ascii_case(wanted)
                    || status.label().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Entry of the status dictionary served to the portal UI.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDescriptor {
    pub value: ApplicationStatus,
    pub label: &'static str,
    pub color: String,
    pub terminal: bool,
    pub requires_interview: bool,
}

impl From<ApplicationStatus> for StatusDescriptor {
    fn from(status: ApplicationStatus) -> Self {
        Self {
            value: status,
            label: status.label(),
            color: status.badge_color(),
            terminal: status.is_terminal(),
            requires_interview: status.requires_interview(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewDetails {
    pub date: NaiveDate,
    /// Time as the admin entered it, e.g. `02:30 PM`.
    pub time: String,
    pub instructions: String,
    pub scheduled_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub internship_id: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub cover_letter: Option<String>,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub interview_details: Option<InterviewDetails>,
    #[serde(default)]
    pub admin_comments: Option<String>,
    #[serde(alias = "createdAt")]
    pub applied_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Application joined with the title of the internship it targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRow {
    #[serde(flatten)]
    pub application: Application,
    pub internship_title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_wire_and_label_forms() {
        assert_eq!(
            "Interview_Scheduled".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::InterviewScheduled
        );
        assert_eq!(
            "interview scheduled".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::InterviewScheduled
        );
        assert_eq!(
            " in_review ".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::InReview
        );
        assert!("hired".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn status_serializes_to_backend_values() {
        let json = serde_json::to_string(&ApplicationStatus::InReview).unwrap();
        assert_eq!(json, "\"In_Review\"");
        let parsed: ApplicationStatus = serde_json::from_str("\"In Review\"").unwrap();
        assert_eq!(parsed, ApplicationStatus::InReview);
    }

    #[test]
    fn terminal_statuses() {
        let terminal: Vec<_> = ApplicationStatus::ALL
            .into_iter()
            .filter(|s| s.is_terminal())
            .collect();
        assert_eq!(
            terminal,
            vec![
                ApplicationStatus::Completed,
                ApplicationStatus::Rejected,
                ApplicationStatus::Withdrawn,
                ApplicationStatus::Terminated,
            ]
        );
    }

    #[test]
    fn descriptor_carries_label_and_color() {
        let d = StatusDescriptor::from(ApplicationStatus::InterviewScheduled);
        assert_eq!(d.label, "Interview Scheduled");
        assert_eq!(d.color, "#8B5CF6");
        assert!(d.requires_interview);
        assert!(!d.terminal);
    }

    #[test]
    fn application_accepts_mongo_style_keys() {
        let raw = serde_json::json!({
            "_id": "a1",
            "internshipId": "i1",
            "fullName": "Asha Verma",
            "email": "asha@example.com",
            "status": "In_Review",
            "createdAt": "2024-04-02T10:00:00Z"
        });
        let app: Application = serde_json::from_value(raw).unwrap();
        assert_eq!(app.id, "a1");
        assert_eq!(app.status, ApplicationStatus::InReview);
        assert!(app.interview_details.is_none());
    }
}
