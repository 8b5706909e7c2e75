use crate::model::{
    id::{ReservationId, SpaceId, UserId},
    reservation::{Reservation, ReservationState},
};
use chrono::{NaiveDate, NaiveTime};
use derive_new::new;

/// Inbound booking request, before admission.
#[derive(new, Debug, Clone)]
pub struct CreateReservation {
    pub space_id: SpaceId,
    pub title: String,
    pub reserved_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Partial update from a management action; `None` leaves a field as-is.
#[derive(Debug, Clone, Default)]
pub struct UpdateReservation {
    pub title: Option<String>,
    pub space_id: Option<SpaceId>,
    pub reserved_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub state: Option<ReservationState>,
    pub rejection_reason: Option<String>,
}

/// Fully resolved insert handed to the store. The repository performs the
/// overlap check and the insert as one atomic unit.
#[derive(new, Debug, Clone)]
pub struct ReservationDraft {
    pub space_id: SpaceId,
    pub reserved_by: UserId,
    pub title: String,
    pub reserved_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub state: ReservationState,
    pub created_by_admin: bool,
    pub confirmed_by: Option<UserId>,
}

/// Fully resolved update handed to the store. When `check_conflicts` is
/// set the repository re-runs the overlap check (excluding this
/// reservation) inside the same transaction as the write.
#[derive(new, Debug, Clone)]
pub struct UpdateReservationRecord {
    pub reservation_id: ReservationId,
    pub space_id: SpaceId,
    pub title: String,
    pub reserved_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub state: ReservationState,
    pub confirmed_by: Option<UserId>,
    pub rejection_reason: Option<String>,
    pub check_conflicts: bool,
}

/// What an update meant for the owner, used to pick the notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationChange {
    Confirmed,
    Rejected { reason: String },
    Modified,
}

/// Committed lifecycle transition, handed to the side-effect coordinator
/// strictly after commit.
#[derive(Debug, Clone)]
pub enum ReservationEvent {
    Created {
        reservation: Reservation,
        actor: UserId,
    },
    Updated {
        reservation: Reservation,
        actor: UserId,
        change: ReservationChange,
    },
    Cancelled {
        reservation: Reservation,
        actor: UserId,
    },
}
