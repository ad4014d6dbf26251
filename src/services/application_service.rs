use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::application_dto::{
    ApplicationListQuery, ApplicationStats, NewApplicationPayload, StatusChange, StatusUpdate,
    StatusUpdateForm,
};
use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicationRow, ApplicationStatus};
use crate::repository::{ApplicationRepository, InternshipRepository};
use crate::services::application_filter;
use crate::utils::time;

#[derive(Clone)]
pub struct ApplicationService {
    applications: Arc<dyn ApplicationRepository>,
    internships: Arc<dyn InternshipRepository>,
}

impl ApplicationService {
    pub fn new(
        applications: Arc<dyn ApplicationRepository>,
        internships: Arc<dyn InternshipRepository>,
    ) -> Self {
        Self {
            applications,
            internships,
        }
    }

    /// Internship id -> title. A failed lookup leaves titles blank rather
    /// than failing the whole listing.
    async fn internship_titles(&self) -> HashMap<String, String> {
        match self.internships.list_internships().await {
            Ok(items) => items.into_iter().map(|i| (i.id, i.title)).collect(),
            Err(e) => {
                warn!(error = %e, "Could not resolve internship titles");
                HashMap::new()
            }
        }
    }

    /// Lists applications with their internship titles, filtered and sorted.
    ///
    /// The query is forwarded to the backend and applied again locally, so the
    /// result is correct whether or not the backend honours the parameters.
    #[instrument(skip(self, token))]
    pub async fn list_rows(
        &self,
        query: &ApplicationListQuery,
        token: &str,
    ) -> Result<Vec<ApplicationRow>> {
        let applications = self.applications.list_applications(query, token).await?;
        let titles = self.internship_titles().await;

        let rows = applications
            .into_iter()
            .map(|application| {
                let internship_title = titles.get(&application.internship_id).cloned();
                ApplicationRow {
                    application,
                    internship_title,
                }
            })
            .collect();

        Ok(application_filter::apply(rows, query))
    }

    pub async fn get(&self, id: &str, token: &str) -> Result<Application> {
        self.applications.get_application(id, token).await
    }

    #[instrument(skip(self, form, token), fields(target = %form.status))]
    pub async fn update_status(
        &self,
        id: &str,
        form: StatusUpdateForm,
        token: &str,
    ) -> Result<Application> {
        let update = form.into_update()?;
        self.apply_update(id, &update, token).await
    }

    async fn apply_update(&self, id: &str, update: &StatusUpdate, token: &str) -> Result<Application> {
        let payload = update.to_payload();
        let updated = self
            .applications
            .update_application_status(id, &payload, token)
            .await?;
        let scheduled_at = payload
            .interview_details
            .as_ref()
            .map(|details| time::to_iso(details.scheduled_at));
        info!(
            application_id = %id,
            status = %payload.status,
            scheduled_at = ?scheduled_at,
            "Application status updated"
        );
        Ok(updated)
    }

    /// Submits an application after checking the internship exists.
    #[instrument(skip(self, payload, token), fields(internship = %payload.internship_id))]
    pub async fn submit(&self, payload: NewApplicationPayload, token: &str) -> Result<Application> {
        payload.validate()?;
        self.internships
            .get_internship(&payload.internship_id)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    Error::NotFound("Internship not found".to_string())
                } else {
                    e
                }
            })?;
        let created = self.applications.create_application(&payload, token).await?;
        info!(application_id = %created.id, "Application submitted");
        Ok(created)
    }

    /// Applicant-initiated withdrawal. Not allowed once the application has
    /// reached a terminal status.
    pub async fn withdraw(&self, id: &str, token: &str) -> Result<Application> {
        let current = self.applications.get_application(id, token).await?;
        if current.status.is_terminal() {
            return Err(Error::Conflict(format!(
                "Application is already {}",
                current.status.label()
            )));
        }
        let update = StatusUpdate {
            change: StatusChange::Withdrawn,
            comments: None,
        };
        self.apply_update(id, &update, token).await
    }

    pub async fn delete(&self, id: &str, token: &str) -> Result<()> {
        self.applications.delete_application(id, token).await?;
        info!(application_id = %id, "Application deleted");
        Ok(())
    }

    pub async fn stats(&self, token: &str) -> Result<ApplicationStats> {
        let applications = self
            .applications
            .list_applications(&ApplicationListQuery::default(), token)
            .await?;

        let mut by_status: BTreeMap<ApplicationStatus, usize> =
            ApplicationStatus::ALL.into_iter().map(|s| (s, 0)).collect();
        for application in &applications {
            *by_status.entry(application.status).or_insert(0) += 1;
        }
        let active = applications
            .iter()
            .filter(|a| !a.status.is_terminal())
            .count();

        Ok(ApplicationStats {
            total: applications.len(),
            active,
            by_status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::application_dto::StatusFilter;
    use crate::models::internship::{Internship, InternshipCategory};
    use crate::repository::{MockApplicationRepository, MockInternshipRepository};
    use chrono::{TimeZone, Utc};

    fn application(id: &str, name: &str, status: ApplicationStatus, day: u32) -> Application {
        Application {
            id: id.to_string(),
            user_id: Some("u1".to_string()),
            internship_id: "int-1".to_string(),
            full_name: name.to_string(),
            email: "someone@example.com".to_string(),
            phone: None,
            resume_url: None,
            cover_letter: None,
            status,
            interview_details: None,
            admin_comments: None,
            applied_at: Utc.with_ymd_and_hms(2024, 4, day, 12, 0, 0).unwrap(),
            updated_at: None,
        }
    }

    fn internship() -> Internship {
        Internship {
            id: "int-1".to_string(),
            title: "Backend Intern".to_string(),
            company: None,
            description: None,
            location: None,
            duration: None,
            category: InternshipCategory::Free,
            amount: None,
            skills: vec![],
            perks: vec![],
            selection_steps: vec![],
            announcements: vec![],
            deadline: None,
            openings: None,
            created_at: None,
        }
    }

    fn service(apps: MockApplicationRepository, internships: MockInternshipRepository) -> ApplicationService {
        ApplicationService::new(Arc::new(apps), Arc::new(internships))
    }

    #[tokio::test]
    async fn rows_are_joined_with_titles_and_filtered() {
        let mut apps = MockApplicationRepository::new();
        apps.expect_list_applications().returning(|_, _| {
            Ok(vec![
                application("a", "Asha Verma", ApplicationStatus::InReview, 2),
                application("b", "Ravi Kumar", ApplicationStatus::Rejected, 1),
            ])
        });
        let mut internships = MockInternshipRepository::new();
        internships
            .expect_list_internships()
            .returning(|| Ok(vec![internship()]));

        let query = ApplicationListQuery {
            search: Some("backend".into()),
            status: StatusFilter::Only(ApplicationStatus::InReview),
            sort: Default::default(),
        };
        let rows = service(apps, internships)
            .list_rows(&query, "tok")
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].application.id, "a");
        assert_eq!(rows[0].internship_title.as_deref(), Some("Backend Intern"));
    }

    #[tokio::test]
    async fn title_lookup_failure_does_not_fail_listing() {
        let mut apps = MockApplicationRepository::new();
        apps.expect_list_applications()
            .returning(|_, _| Ok(vec![application("a", "Asha Verma", ApplicationStatus::InReview, 2)]));
        let mut internships = MockInternshipRepository::new();
        internships.expect_list_internships().returning(|| {
            Err(Error::Api {
                status: 500,
                message: "boom".into(),
            })
        });

        let rows = service(apps, internships)
            .list_rows(&ApplicationListQuery::default(), "tok")
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].internship_title.is_none());
    }

    #[tokio::test]
    async fn invalid_interview_form_never_reaches_backend() {
        let mut apps = MockApplicationRepository::new();
        apps.expect_update_application_status().never();
        let svc = service(apps, MockInternshipRepository::new());

        let form = StatusUpdateForm {
            status: ApplicationStatus::InterviewScheduled,
            interview_date: Some("2024-05-01".into()),
            interview_time: None,
            interview_instructions: Some("Bring your laptop".into()),
            comments: None,
        };
        let err = svc.update_status("a", form, "tok").await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn scheduled_interview_is_forwarded_with_details() {
        let mut apps = MockApplicationRepository::new();
        apps.expect_update_application_status()
            .withf(|id, payload, token| {
                id == "a"
                    && token == "tok"
                    && payload.status == ApplicationStatus::InterviewScheduled
                    && payload
                        .interview_details
                        .as_ref()
                        .map(|d| d.scheduled_at == Utc.with_ymd_and_hms(2024, 5, 1, 14, 30, 0).unwrap())
                        .unwrap_or(false)
            })
            .times(1)
            .returning(|_, payload, _| {
                let mut app = application("a", "Asha Verma", payload.status, 2);
                app.interview_details = payload.interview_details.clone();
                Ok(app)
            });
        let svc = service(apps, MockInternshipRepository::new());

        let form = StatusUpdateForm {
            status: ApplicationStatus::InterviewScheduled,
            interview_date: Some("2024-05-01".into()),
            interview_time: Some("02:30 PM".into()),
            interview_instructions: Some("Bring resume".into()),
            comments: None,
        };
        let updated = svc.update_status("a", form, "tok").await.unwrap();
        assert_eq!(updated.status, ApplicationStatus::InterviewScheduled);
        assert!(updated.interview_details.is_some());
    }

    #[tokio::test]
    async fn withdraw_refuses_terminal_application() {
        let mut apps = MockApplicationRepository::new();
        apps.expect_get_application()
            .returning(|id, _| Ok(application(id, "Asha Verma", ApplicationStatus::Completed, 2)));
        apps.expect_update_application_status().never();
        let svc = service(apps, MockInternshipRepository::new());

        let err = svc.withdraw("a", "tok").await.unwrap_err();
        assert!(matches!(err, Error::Conflict(msg) if msg.contains("Completed")));
    }

    #[tokio::test]
    async fn withdraw_active_application() {
        let mut apps = MockApplicationRepository::new();
        apps.expect_get_application()
            .returning(|id, _| Ok(application(id, "Asha Verma", ApplicationStatus::Shortlisted, 2)));
        apps.expect_update_application_status()
            .withf(|_, payload, _| {
                payload.status == ApplicationStatus::Withdrawn && payload.interview_details.is_none()
            })
            .returning(|id, payload, _| Ok(application(id, "Asha Verma", payload.status, 2)));
        let svc = service(apps, MockInternshipRepository::new());

        let updated = svc.withdraw("a", "tok").await.unwrap();
        assert_eq!(updated.status, ApplicationStatus::Withdrawn);
    }

    #[tokio::test]
    async fn submit_rejects_unknown_internship() {
        let mut internships = MockInternshipRepository::new();
        internships.expect_get_internship().returning(|_| {
            Err(Error::Api {
                status: 404,
                message: "Not found".into(),
            })
        });
        let mut apps = MockApplicationRepository::new();
        apps.expect_create_application().never();
        let svc = service(apps, internships);

        let payload = NewApplicationPayload {
            internship_id: "missing".into(),
            full_name: "Asha Verma".into(),
            email: "asha@example.com".into(),
            phone: None,
            resume_url: None,
            cover_letter: None,
        };
        let err = svc.submit(payload, "tok").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn stats_count_every_status() {
        let mut apps = MockApplicationRepository::new();
        apps.expect_list_applications().returning(|_, _| {
            Ok(vec![
                application("a", "A", ApplicationStatus::InReview, 1),
                application("b", "B", ApplicationStatus::InReview, 2),
                application("c", "C", ApplicationStatus::Rejected, 3),
            ])
        });
        let stats = service(apps, MockInternshipRepository::new())
            .stats("tok")
            .await
            .unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.by_status[&ApplicationStatus::InReview], 2);
        assert_eq!(stats.by_status[&ApplicationStatus::Ongoing], 0);
        assert_eq!(stats.by_status.len(), 8);
    }
}
