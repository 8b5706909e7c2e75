use crate::database::{model::space::SpaceRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{id::SpaceId, space::Space};
use kernel::repository::space::SpaceRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct SpaceRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl SpaceRepository for SpaceRepositoryImpl {
    async fn find_by_id(&self, space_id: SpaceId) -> AppResult<Option<Space>> {
        sqlx::query_as::<_, SpaceRow>(
            r#"
            SELECT space_id, space_name, capacity, category, is_active, is_deleted
            FROM spaces
            WHERE space_id = $1
            "#,
        )
        .bind(space_id.raw())
        .fetch_optional(self.db.inner_ref())
        .await
        .map(|row| row.map(Space::from))
        .map_err(AppError::SpecificOperationError)
    }
}
