use kernel::model::space::Space;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
pub struct SpaceRow {
    pub space_id: Uuid,
    pub space_name: String,
    pub capacity: i32,
    pub category: String,
    pub is_active: bool,
    pub is_deleted: bool,
}

impl From<SpaceRow> for Space {
    fn from(value: SpaceRow) -> Self {
        let SpaceRow {
            space_id,
            space_name,
            capacity,
            category,
            is_active,
            is_deleted,
        } = value;
        Space {
            space_id: space_id.into(),
            space_name,
            capacity,
            category,
            is_active,
            is_deleted,
        }
    }
}
