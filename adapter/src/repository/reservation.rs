use crate::database::{model::reservation::ReservationRow, ConnectionPool};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use derive_new::new;
use kernel::model::{
    id::{ReservationId, SpaceId, UserId},
    reservation::{
        event::{ReservationDraft, UpdateReservationRecord},
        Reservation,
    },
};
use kernel::repository::reservation::ReservationRepository;
use shared::error::{AppError, AppResult};
use uuid::Uuid;

/// Joined projection used by every read; keeps row decoding in one place.
const SELECT_RESERVATION: &str = r#"
    SELECT
        r.reservation_id,
        r.user_id,
        u.user_name,
        r.space_id,
        s.space_name,
        s.capacity,
        s.category,
        r.title,
        r.reserved_date,
        r.start_time,
        r.end_time,
        r.state,
        r.created_by_admin,
        r.confirmed_by,
        r.rejection_reason,
        r.created_at
    FROM reservations AS r
    INNER JOIN spaces AS s ON r.space_id = s.space_id
    INNER JOIN users AS u ON r.user_id = u.user_id
"#;

#[derive(new)]
pub struct ReservationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ReservationRepository for ReservationRepositoryImpl {
    async fn create(&self, draft: ReservationDraft) -> AppResult<ReservationId> {
        let mut tx = self.db.begin().await?;

        // The overlap check and the insert must commit as one unit so two
        // concurrent creates cannot both observe a free slot.
        self.set_transaction_serializable(&mut tx).await?;

        let overlap = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT reservation_id
            FROM reservations
            WHERE space_id = $1
              AND reserved_date = $2
              AND state NOT IN ('cancelada', 'rechazada')
              AND start_time < $4
              AND end_time > $3
            LIMIT 1
            "#,
        )
        .bind(draft.space_id.raw())
        .bind(draft.reserved_date)
        .bind(draft.start_time)
        .bind(draft.end_time)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if overlap.is_some() {
            return Err(AppError::ResourceConflict(
                "the space is already reserved in that slot".into(),
            ));
        }

        let reservation_id = ReservationId::new();
        let res = sqlx::query(
            r#"
            INSERT INTO reservations
                (reservation_id, space_id, user_id, title, reserved_date,
                 start_time, end_time, state, created_by_admin, confirmed_by,
                 rejection_reason, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, NULL, NOW())
            "#,
        )
        .bind(reservation_id.raw())
        .bind(draft.space_id.raw())
        .bind(draft.reserved_by.raw())
        .bind(&draft.title)
        .bind(draft.reserved_date)
        .bind(draft.start_time)
        .bind(draft.end_time)
        .bind(draft.state.to_string())
        .bind(draft.created_by_admin)
        .bind(draft.confirmed_by.map(|id| id.raw()))
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no reservation record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(reservation_id)
    }

    async fn update(&self, record: UpdateReservationRecord) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        self.set_transaction_serializable(&mut tx).await?;

        if record.check_conflicts {
            let overlap = sqlx::query_scalar::<_, Uuid>(
                r#"
                SELECT reservation_id
                FROM reservations
                WHERE space_id = $1
                  AND reserved_date = $2
                  AND state NOT IN ('cancelada', 'rechazada')
                  AND start_time < $4
                  AND end_time > $3
                  AND reservation_id <> $5
                LIMIT 1
                "#,
            )
            .bind(record.space_id.raw())
            .bind(record.reserved_date)
            .bind(record.start_time)
            .bind(record.end_time)
            .bind(record.reservation_id.raw())
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if overlap.is_some() {
                return Err(AppError::ResourceConflict(
                    "the space is already reserved in that slot".into(),
                ));
            }
        }

        let res = sqlx::query(
            r#"
            UPDATE reservations
            SET space_id = $2,
                title = $3,
                reserved_date = $4,
                start_time = $5,
                end_time = $6,
                state = $7,
                confirmed_by = $8,
                rejection_reason = $9
            WHERE reservation_id = $1
            "#,
        )
        .bind(record.reservation_id.raw())
        .bind(record.space_id.raw())
        .bind(&record.title)
        .bind(record.reserved_date)
        .bind(record.start_time)
        .bind(record.end_time)
        .bind(record.state.to_string())
        .bind(record.confirmed_by.map(|id| id.raw()))
        .bind(&record.rejection_reason)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(
                "specified reservation not found".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    async fn mark_cancelled(&self, reservation_id: ReservationId) -> AppResult<()> {
        let res = sqlx::query(
            r#"
            UPDATE reservations
            SET state = 'cancelada'
            WHERE reservation_id = $1
            "#,
        )
        .bind(reservation_id.raw())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(
                "specified reservation not found".into(),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>> {
        let sql = format!("{SELECT_RESERVATION} WHERE r.reservation_id = $1");
        sqlx::query_as::<_, ReservationRow>(&sql)
            .bind(reservation_id.raw())
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .map(Reservation::try_from)
            .transpose()
    }

    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Reservation>> {
        let sql = format!(
            "{SELECT_RESERVATION} WHERE r.user_id = $1 ORDER BY r.reserved_date ASC, r.start_time ASC"
        );
        let rows = sqlx::query_as::<_, ReservationRow>(&sql)
            .bind(user_id.raw())
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        rows.into_iter().map(Reservation::try_from).collect()
    }

    async fn find_all_excluding(&self, user_id: UserId) -> AppResult<Vec<Reservation>> {
        let sql = format!(
            "{SELECT_RESERVATION} WHERE r.user_id <> $1 ORDER BY r.reserved_date ASC, r.start_time ASC"
        );
        let rows = sqlx::query_as::<_, ReservationRow>(&sql)
            .bind(user_id.raw())
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        rows.into_iter().map(Reservation::try_from).collect()
    }

    async fn find_overlapping(
        &self,
        space_id: SpaceId,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        exclude: Option<ReservationId>,
    ) -> AppResult<Vec<Reservation>> {
        let sql = format!(
            r#"{SELECT_RESERVATION}
            WHERE r.space_id = $1
              AND r.reserved_date = $2
              AND r.state NOT IN ('cancelada', 'rechazada')
              AND r.start_time < $4
              AND r.end_time > $3
              AND ($5::uuid IS NULL OR r.reservation_id <> $5)
            ORDER BY r.start_time ASC"#
        );
        let rows = sqlx::query_as::<_, ReservationRow>(&sql)
            .bind(space_id.raw())
            .bind(date)
            .bind(start)
            .bind(end)
            .bind(exclude.map(|id| id.raw()))
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        rows.into_iter().map(Reservation::try_from).collect()
    }
}

impl ReservationRepositoryImpl {
    async fn set_transaction_serializable(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> AppResult<()> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }
}
