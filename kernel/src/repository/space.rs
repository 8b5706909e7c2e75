use crate::model::{id::SpaceId, space::Space};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait SpaceRepository: Send + Sync {
    async fn find_by_id(&self, space_id: SpaceId) -> AppResult<Option<Space>>;
}
