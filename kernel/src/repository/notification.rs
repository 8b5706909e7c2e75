use crate::model::notification::CreateNotification;
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, event: CreateNotification) -> AppResult<()>;
}
