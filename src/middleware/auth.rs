use axum::{extract::FromRequestParts, http::header};
use sea_orm::EntityTrait;
use uuid::Uuid;

use crate::{
    auth::policy,
    entity::Users,
    error::AppError,
    models::Role,
    state::AppState,
};

/// The caller behind a verified bearer token, re-read from the store on every request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: Role,
}

pub fn ensure_role(user: &AuthUser, allowed: &[Role]) -> Result<(), AppError> {
    if !policy::check(user.role, allowed) {
        tracing::debug!(user_id = %user.user_id, role = %user.role, "role check denied");
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    ensure_role(user, policy::ADMIN_ONLY)
}

pub fn ensure_staff(user: &AuthUser) -> Result<(), AppError> {
    ensure_role(user, policy::STAFF)
}

pub(crate) fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("Not authenticated".into()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::not_authenticated())?;

        let token = bearer_token(auth_str).ok_or_else(AppError::not_authenticated)?;

        let user_id = state
            .tokens
            .verify(token)
            .ok_or_else(AppError::not_authenticated)?;

        let user = Users::find_by_id(user_id)
            .one(&state.orm)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User not found".into()))?;

        let role = user
            .role
            .parse::<Role>()
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;

        Ok(AuthUser {
            user_id: user.id,
            role,
        })
    }
}
