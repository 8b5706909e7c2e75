use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use kernel::model::reservation::{Reservation, ReservationSpace, ReservationState};
use shared::error::AppError;
use std::str::FromStr;
use uuid::Uuid;

/// Row shape shared by every reservation query; spaces and users are
/// joined in so the kernel entity can be built in one pass.
#[derive(sqlx::FromRow)]
pub struct ReservationRow {
    pub reservation_id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub space_id: Uuid,
    pub space_name: String,
    pub capacity: i32,
    pub category: String,
    pub title: String,
    pub reserved_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub state: String,
    pub created_by_admin: bool,
    pub confirmed_by: Option<Uuid>,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = AppError;

    fn try_from(value: ReservationRow) -> Result<Self, Self::Error> {
        let ReservationRow {
            reservation_id,
            user_id,
            user_name,
            space_id,
            space_name,
            capacity,
            category,
            title,
            reserved_date,
            start_time,
            end_time,
            state,
            created_by_admin,
            confirmed_by,
            rejection_reason,
            created_at,
        } = value;
        let state = ReservationState::from_str(&state).map_err(|_| {
            AppError::ConversionEntityError(format!("unknown reservation state: {state}"))
        })?;
        Ok(Reservation {
            reservation_id: reservation_id.into(),
            reserved_by: user_id.into(),
            user_name,
            space: ReservationSpace {
                space_id: space_id.into(),
                space_name,
                capacity,
                category,
            },
            title,
            reserved_date,
            start_time,
            end_time,
            state,
            created_by_admin,
            confirmed_by: confirmed_by.map(Into::into),
            rejection_reason,
            created_at,
        })
    }
}
