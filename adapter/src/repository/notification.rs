use crate::database::ConnectionPool;
use async_trait::async_trait;
use derive_new::new;
use kernel::model::notification::CreateNotification;
use kernel::repository::notification::NotificationRepository;
use shared::error::{AppError, AppResult};
use uuid::Uuid;

#[derive(new)]
pub struct NotificationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl NotificationRepository for NotificationRepositoryImpl {
    async fn create(&self, event: CreateNotification) -> AppResult<()> {
        let res = sqlx::query(
            r#"
            INSERT INTO notifications
                (notification_id, user_id, kind, title, message, is_read, created_at)
            VALUES ($1, $2, $3, $4, $5, FALSE, NOW())
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(event.user_id.raw())
        .bind(event.kind.to_string())
        .bind(&event.title)
        .bind(&event.message)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no notification record has been created".into(),
            ));
        }

        Ok(())
    }
}
