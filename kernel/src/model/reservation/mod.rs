use crate::model::id::{ReservationId, SpaceId, UserId};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use strum::{Display, EnumString};

pub mod event;
pub mod policy;

/// Lifecycle state of a reservation. `Pending` and `Confirmed` occupy the
/// slot; `Rejected` and `Cancelled` release it but the record is kept for
/// history. The serialized forms are also the storage forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum ReservationState {
    #[strum(serialize = "pendiente")]
    Pending,
    #[strum(serialize = "confirmada")]
    Confirmed,
    #[strum(serialize = "rechazada")]
    Rejected,
    #[strum(serialize = "cancelada")]
    Cancelled,
}

impl ReservationState {
    pub fn is_terminal(self) -> bool {
        matches!(self, ReservationState::Rejected | ReservationState::Cancelled)
    }

    pub fn occupies_slot(self) -> bool {
        !self.is_terminal()
    }
}

#[derive(Debug, Clone)]
pub struct Reservation {
    pub reservation_id: ReservationId,
    pub reserved_by: UserId,
    pub user_name: String,
    pub space: ReservationSpace,
    pub title: String,
    pub reserved_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub state: ReservationState,
    pub created_by_admin: bool,
    pub confirmed_by: Option<UserId>,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ReservationSpace {
    pub space_id: SpaceId,
    pub space_name: String,
    pub capacity: i32,
    pub category: String,
}

/// Half-open interval overlap: touching endpoints do not conflict.
pub fn overlaps(
    a_start: NaiveTime,
    a_end: NaiveTime,
    b_start: NaiveTime,
    b_end: NaiveTime,
) -> bool {
    a_start < b_end && b_start < a_end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn overlapping_intervals_conflict() {
        assert!(overlaps(t(9, 0), t(11, 0), t(10, 0), t(12, 0)));
        assert!(overlaps(t(9, 0), t(11, 0), t(9, 30), t(10, 30)));
    }

    #[test]
    fn touching_endpoints_do_not_conflict() {
        assert!(!overlaps(t(9, 0), t(11, 0), t(11, 0), t(12, 0)));
        assert!(!overlaps(t(11, 0), t(12, 0), t(9, 0), t(11, 0)));
    }

    #[test]
    fn overlap_is_symmetric() {
        let cases = [
            (t(9, 0), t(11, 0), t(10, 0), t(12, 0)),
            (t(9, 0), t(11, 0), t(11, 0), t(12, 0)),
            (t(7, 0), t(8, 0), t(16, 0), t(17, 0)),
            (t(9, 0), t(13, 0), t(10, 0), t(11, 0)),
        ];
        for (a1, a2, b1, b2) in cases {
            assert_eq!(overlaps(a1, a2, b1, b2), overlaps(b1, b2, a1, a2));
        }
    }
}
