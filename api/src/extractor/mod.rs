use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use kernel::model::{auth::AccessToken, id::UserId, user::User};
use registry::AppRegistry;
use shared::error::AppError;

/// Caller identity resolved from the `Authorization: Bearer <token>`
/// header. The token maps to a user id in the key-value store, and the
/// user record must still be active.
pub struct AuthorizedUser {
    pub user: User,
}

impl AuthorizedUser {
    pub fn id(&self) -> UserId {
        self.user.user_id
    }

    pub fn is_admin(&self) -> bool {
        self.user.role.is_admin()
    }
}

#[async_trait]
impl FromRequestParts<AppRegistry> for AuthorizedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::UnauthenticatedError)?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or(AppError::UnauthenticatedError)?;
        let access_token = AccessToken(token.to_string());

        let user_id = registry
            .auth_repository()
            .fetch_user_id_from_token(&access_token)
            .await?
            .ok_or(AppError::UnauthenticatedError)?;
        let user = registry
            .user_repository()
            .find_current_user(user_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or(AppError::UnauthenticatedError)?;

        Ok(Self { user })
    }
}
