use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};
use tracing::warn;
use uuid::Uuid;

use super::{
    claims::Claims,
    repo_types::{Role, User},
};
use crate::{cookie::token_from_headers, error::ApiError, state::AppState};

fn claims_from_parts(parts: &Parts, state: &AppState) -> Option<Claims> {
    let token = token_from_headers(&parts.headers, &state.config.cookie.name)?;
    match state.jwt.verify(&token) {
        Ok(c) => Some(c),
        Err(e) => {
            warn!(error = %e, "invalid or expired token");
            None
        }
    }
}

/// Caller must be signed in; yields the user ID.
pub struct AuthUser(pub Uuid);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        claims_from_parts(parts, state)
            .map(|c| AuthUser(c.sub))
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".into()))
    }
}

/// Caller identity when one can be resolved; never rejects.
pub struct MaybeUser(pub Option<Uuid>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(claims_from_parts(parts, state).map(|c| c.sub)))
    }
}

/// Caller must be an ADMIN. The role is read from the database so a
/// promotion takes effect without re-issuing the token.
pub struct AdminUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let claims = claims_from_parts(parts, state)
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".into()))?;
        let user = state
            .users
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("User not found".into()))?;
        if user.role != Role::Admin {
            warn!(user_id = %user.id, "non-admin hit admin route");
            return Err(ApiError::Forbidden("Admin access required".into()));
        }
        Ok(AdminUser(user))
    }
}
