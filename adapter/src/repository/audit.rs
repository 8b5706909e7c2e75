use crate::database::ConnectionPool;
use async_trait::async_trait;
use derive_new::new;
use kernel::model::audit::CreateAuditEntry;
use kernel::repository::audit::AuditRepository;
use shared::error::{AppError, AppResult};
use uuid::Uuid;

#[derive(new)]
pub struct AuditRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl AuditRepository for AuditRepositoryImpl {
    async fn create(&self, event: CreateAuditEntry) -> AppResult<()> {
        let res = sqlx::query(
            r#"
            INSERT INTO audit_log
                (audit_id, actor_id, action, entity, description, created_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(event.actor_id.raw())
        .bind(&event.action)
        .bind(&event.entity)
        .bind(&event.description)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no audit record has been created".into(),
            ));
        }

        Ok(())
    }
}
