use crate::model::id::SpaceId;

#[derive(Debug, Clone)]
pub struct Space {
    pub space_id: SpaceId,
    pub space_name: String,
    pub capacity: i32,
    pub category: String,
    /// Accepting new reservations. Existing reservations survive a flip
    /// to false.
    pub is_active: bool,
    /// Soft-removed; never surfaced and never bookable.
    pub is_deleted: bool,
}
