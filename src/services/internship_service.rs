use std::sync::Arc;

use tracing::info;

use crate::dto::internship_dto::InternshipPayload;
use crate::error::{Error, Result};
use crate::models::internship::{Internship, InternshipCategory};
use crate::repository::InternshipRepository;

#[derive(Clone)]
pub struct InternshipService {
    internships: Arc<dyn InternshipRepository>,
}

impl InternshipService {
    pub fn new(internships: Arc<dyn InternshipRepository>) -> Self {
        Self { internships }
    }

    /// Public catalogue, optionally narrowed to one category.
    pub async fn list(&self, category: Option<InternshipCategory>) -> Result<Vec<Internship>> {
        let items = self.internships.list_internships().await?;
        Ok(match category {
            Some(wanted) => items.into_iter().filter(|i| i.category == wanted).collect(),
            None => items,
        })
    }

    pub async fn get(&self, id: &str) -> Result<Internship> {
        self.internships.get_internship(id).await.map_err(|e| {
            if e.is_not_found() {
                Error::NotFound("Internship not found".to_string())
            } else {
                e
            }
        })
    }

    pub async fn create(&self, payload: InternshipPayload, token: &str) -> Result<Internship> {
        let payload = payload.normalized()?;
        let created = self.internships.create_internship(&payload, token).await?;
        info!(internship_id = %created.id, title = %created.title, "Internship created");
        Ok(created)
    }

    pub async fn update(
        &self,
        id: &str,
        payload: InternshipPayload,
        token: &str,
    ) -> Result<Internship> {
        let payload = payload.normalized()?;
        let updated = self
            .internships
            .update_internship(id, &payload, token)
            .await?;
        info!(internship_id = %id, "Internship updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: &str, token: &str) -> Result<()> {
        self.internships.delete_internship(id, token).await?;
        info!(internship_id = %id, "Internship deleted");
        Ok(())
    }
}
