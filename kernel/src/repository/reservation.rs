use crate::model::{
    id::{ReservationId, SpaceId, UserId},
    reservation::{
        event::{ReservationDraft, UpdateReservationRecord},
        Reservation,
    },
};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use shared::error::AppResult;

/// Narrow record-store interface for reservations, injected into the
/// engine. Implementations must make the overlap check and the write of
/// `create`/`update` a single atomic unit so two concurrent callers can
/// never both observe "no conflict" and both commit.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn create(&self, draft: ReservationDraft) -> AppResult<ReservationId>;
    async fn update(&self, record: UpdateReservationRecord) -> AppResult<()>;
    async fn mark_cancelled(&self, reservation_id: ReservationId) -> AppResult<()>;
    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>>;
    /// Reservations owned by a user, oldest slot first.
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Reservation>>;
    /// All reservations except the given user's (admin review view).
    async fn find_all_excluding(&self, user_id: UserId) -> AppResult<Vec<Reservation>>;
    /// Slot-occupying reservations for the space/date whose half-open
    /// interval overlaps [start, end). Returns the full conflicting set so
    /// callers can report cause.
    async fn find_overlapping(
        &self,
        space_id: SpaceId,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        exclude: Option<ReservationId>,
    ) -> AppResult<Vec<Reservation>>;
}
