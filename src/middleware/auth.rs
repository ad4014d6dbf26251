use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::error::Error;
use crate::models::user::User;
use crate::AppState;

/// Bearer token from the `Authorization` header, forwarded to the backend
/// as-is. The backend decides whether it is valid.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

pub fn bearer_from_parts(parts: &Parts) -> Result<String, Error> {
    let Some(auth_header) = parts.headers.get(AUTHORIZATION) else {
        return Err(Error::Unauthorized("missing_authorization".into()));
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return Err(Error::Unauthorized("bad_authorization".into()));
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return Err(Error::Unauthorized("unsupported_scheme".into()));
    };
    let token = token.trim();
    if token.is_empty() {
        return Err(Error::Unauthorized("missing_authorization".into()));
    }
    Ok(token.to_string())
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        bearer_from_parts(parts).map(BearerToken)
    }
}

/// A request made by an administrator. The role is taken from the backend's
/// view of the token's user, not from anything the browser sends.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub token: String,
    pub user: User,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_from_parts(parts)?;
        let user = state.user_service.require_admin(&token).await?;
        Ok(AdminSession { token, user })
    }
}
