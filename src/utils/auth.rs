use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use crate::{
    entity::{
        coach,
        user::{self, Role},
    },
    error::AppError,
    repositories,
    utils::jwt::UserClaims,
    ServiceState,
};

/// The caller behind a valid access token, loaded fresh from the store.
pub struct CurrentUser(pub user::Model);

/// A caller whose stored role is `COACH` and who has a coach profile.
pub struct CurrentCoach {
    pub user: user::Model,
    pub coach: coach::Model,
}

#[async_trait::async_trait]
impl FromRequestParts<Arc<ServiceState>> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ServiceState>,
    ) -> Result<Self, Self::Rejection> {
        let claims = UserClaims::from_request_parts(parts, state).await?;
        let user = repositories::user::find_by_id(state.db.as_ref(), claims.uid)
            .await?
            .ok_or_else(|| {
                warn!("token for unknown user {}", claims.uid);
                AppError::unauthorized("invalid token")
            })?;
        Ok(CurrentUser(user))
    }
}

#[async_trait::async_trait]
impl FromRequestParts<Arc<ServiceState>> for CurrentCoach {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ServiceState>,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        if user.role != Role::Coach {
            return Err(AppError::unauthorized("coach access only"));
        }
        let coach = repositories::coach::find_by_user_id(state.db.as_ref(), user.id)
            .await?
            .ok_or_else(|| AppError::unauthorized("coach access only"))?;
        Ok(CurrentCoach { user, coach })
    }
}
