use crate::database::{model::user::UserRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{id::UserId, user::User};
use kernel::repository::user::UserRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_current_user(&self, user_id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, user_name, email, role, is_active, email_enabled, push_enabled
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.raw())
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .map(User::try_from)
        .transpose()
    }

    async fn find_active_admins(&self) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, user_name, email, role, is_active, email_enabled, push_enabled
            FROM users
            WHERE role = 'administrador' AND is_active = TRUE
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        rows.into_iter().map(User::try_from).collect()
    }
}
