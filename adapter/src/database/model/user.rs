use kernel::model::{role::Role, user::User};
use shared::error::AppError;
use std::str::FromStr;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
pub struct UserRow {
    pub user_id: Uuid,
    pub user_name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub email_enabled: bool,
    pub push_enabled: bool,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(value: UserRow) -> Result<Self, Self::Error> {
        let UserRow {
            user_id,
            user_name,
            email,
            role,
            is_active,
            email_enabled,
            push_enabled,
        } = value;
        let role = Role::from_str(&role)
            .map_err(|_| AppError::ConversionEntityError(format!("unknown role: {role}")))?;
        Ok(User {
            user_id: user_id.into(),
            user_name,
            email,
            role,
            is_active,
            email_enabled,
            push_enabled,
        })
    }
}
