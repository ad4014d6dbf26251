use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use crate::dto::user_dto::{
    ChangePasswordForm, CreateUserPayload, UpdateProfilePayload, UpdateUserPayload,
};
use crate::error::{Error, Result};
use crate::models::user::User;
use crate::repository::UserRepository;

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Resolves the token to its user. A token the backend rejects is
    /// reported as unauthorized, whatever status the backend chose.
    pub async fn current_profile(&self, token: &str) -> Result<User> {
        self.users.current_profile(token).await.map_err(|e| match e {
            Error::Api { status: 401, message } | Error::Api { status: 403, message } => {
                Error::Unauthorized(message)
            }
            other => other,
        })
    }

    pub async fn require_admin(&self, token: &str) -> Result<User> {
        let user = self.current_profile(token).await?;
        if !user.is_admin() {
            warn!(user_id = %user.id, "Non-admin attempted an admin action");
            return Err(Error::Forbidden("Admin access required".to_string()));
        }
        Ok(user)
    }

    pub async fn update_profile(&self, payload: UpdateProfilePayload, token: &str) -> Result<User> {
        payload.validate()?;
        self.users.update_profile(&payload, token).await
    }

    pub async fn change_password(&self, form: ChangePasswordForm, token: &str) -> Result<()> {
        let form = form.checked()?;
        self.users.change_password(&form, token).await?;
        info!("Password changed");
        Ok(())
    }

    pub async fn list(&self, token: &str) -> Result<Vec<User>> {
        self.users.list_users(token).await
    }

    pub async fn get(&self, id: &str, token: &str) -> Result<User> {
        self.users.get_user(id, token).await
    }

    pub async fn create(&self, payload: CreateUserPayload, token: &str) -> Result<User> {
        payload.validate()?;
        let user = self.users.create_user(&payload, token).await?;
        info!(user_id = %user.id, role = ?user.role, "User created");
        Ok(user)
    }

    pub async fn update(&self, id: &str, payload: UpdateUserPayload, token: &str) -> Result<User> {
        payload.validate()?;
        self.users.update_user(id, &payload, token).await
    }

    /// Admins cannot delete their own account from the portal.
    pub async fn delete(&self, id: &str, acting: &User, token: &str) -> Result<()> {
        if acting.id == id {
            return Err(Error::Conflict("You cannot delete your own account".to_string()));
        }
        self.users.delete_user(id, token).await?;
        info!(user_id = %id, by = %acting.id, "User deleted");
        Ok(())
    }
}
