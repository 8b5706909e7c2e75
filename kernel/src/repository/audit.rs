use crate::model::audit::CreateAuditEntry;
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait AuditRepository: Send + Sync {
    async fn create(&self, event: CreateAuditEntry) -> AppResult<()>;
}
