use crate::model::{
    id::{ReservationId, SpaceId},
    reservation::{
        event::{
            CreateReservation, ReservationChange, ReservationDraft, ReservationEvent,
            UpdateReservation, UpdateReservationRecord,
        },
        policy, Reservation, ReservationState,
    },
    user::User,
};
use crate::repository::{reservation::ReservationRepository, space::SpaceRepository};
use crate::service::effects::SideEffectCoordinator;
use chrono::{NaiveDate, NaiveTime};
use shared::error::{AppError, AppResult};
use std::sync::Arc;

/// The reservation state machine. Every lifecycle transition goes through
/// here: temporal validation and conflict probing run before any write,
/// the repository commits the transition atomically, and the committed
/// event is handed to the side-effect coordinator afterwards.
pub struct ReservationService {
    reservations: Arc<dyn ReservationRepository>,
    spaces: Arc<dyn SpaceRepository>,
    effects: Arc<SideEffectCoordinator>,
}

impl ReservationService {
    pub fn new(
        reservations: Arc<dyn ReservationRepository>,
        spaces: Arc<dyn SpaceRepository>,
        effects: Arc<SideEffectCoordinator>,
    ) -> Self {
        Self {
            reservations,
            spaces,
            effects,
        }
    }

    pub async fn create(&self, actor: &User, cmd: CreateReservation) -> AppResult<Reservation> {
        let space = self
            .spaces
            .find_by_id(cmd.space_id)
            .await?
            .filter(|s| !s.is_deleted)
            .ok_or_else(|| AppError::EntityNotFound(format!("space {} not found", cmd.space_id)))?;
        if !space.is_active {
            return Err(AppError::UnprocessableEntity(format!(
                "space {} is not accepting reservations",
                space.space_name
            )));
        }

        let now = chrono::Local::now().naive_local();
        policy::validate(cmd.reserved_date, cmd.start_time, cmd.end_time, now)
            .map_err(|v| AppError::UnprocessableEntity(v.to_string()))?;

        // Advisory probe so the caller learns which slot is taken; the
        // repository re-checks inside the write transaction.
        self.ensure_slot_free(cmd.space_id, cmd.reserved_date, cmd.start_time, cmd.end_time, None)
            .await?;

        // Admin creates skip the review step but not the checks above.
        let (state, confirmed_by) = if actor.role.is_admin() {
            (ReservationState::Confirmed, Some(actor.user_id))
        } else {
            (ReservationState::Pending, None)
        };
        let draft = ReservationDraft::new(
            cmd.space_id,
            actor.user_id,
            cmd.title,
            cmd.reserved_date,
            cmd.start_time,
            cmd.end_time,
            state,
            actor.role.is_admin(),
            confirmed_by,
        );

        let reservation_id = self.reservations.create(draft).await?;
        let reservation = self.load(reservation_id).await?;

        self.effects.dispatch_later(ReservationEvent::Created {
            reservation: reservation.clone(),
            actor: actor.user_id,
        });
        Ok(reservation)
    }

    pub async fn update(
        &self,
        actor: &User,
        reservation_id: ReservationId,
        cmd: UpdateReservation,
    ) -> AppResult<Reservation> {
        let current = self.load(reservation_id).await?;
        if !actor.role.is_admin() && current.reserved_by != actor.user_id {
            return Err(AppError::ForbiddenOperation);
        }
        if cmd.state.is_some() && !actor.role.is_admin() {
            return Err(AppError::ForbiddenOperation);
        }

        let title = cmd.title.unwrap_or_else(|| current.title.clone());
        let space_id = cmd.space_id.unwrap_or(current.space.space_id);
        let reserved_date = cmd.reserved_date.unwrap_or(current.reserved_date);
        let start_time = cmd.start_time.unwrap_or(current.start_time);
        let end_time = cmd.end_time.unwrap_or(current.end_time);

        if space_id != current.space.space_id {
            let space = self
                .spaces
                .find_by_id(space_id)
                .await?
                .filter(|s| !s.is_deleted)
                .ok_or_else(|| AppError::EntityNotFound(format!("space {space_id} not found")))?;
            if !space.is_active {
                return Err(AppError::UnprocessableEntity(format!(
                    "space {} is not accepting reservations",
                    space.space_name
                )));
            }
        }

        let time_changed = reserved_date != current.reserved_date
            || start_time != current.start_time
            || end_time != current.end_time;
        if time_changed {
            let now = chrono::Local::now().naive_local();
            policy::validate(reserved_date, start_time, end_time, now)
                .map_err(|v| AppError::UnprocessableEntity(v.to_string()))?;
        }

        let check_conflicts = time_changed || space_id != current.space.space_id;
        if check_conflicts {
            self.ensure_slot_free(
                space_id,
                reserved_date,
                start_time,
                end_time,
                Some(reservation_id),
            )
            .await?;
        }

        let mut state = current.state;
        let mut confirmed_by = current.confirmed_by;
        let mut rejection_reason = current.rejection_reason.clone();
        let mut change: Option<ReservationChange> = None;

        if let Some(next) = cmd.state {
            if next == ReservationState::Pending && current.state != ReservationState::Pending {
                return Err(AppError::UnprocessableEntity(
                    "a reservation cannot return to pending".into(),
                ));
            }
            match next {
                ReservationState::Rejected => {
                    let reason = cmd
                        .rejection_reason
                        .as_deref()
                        .map(str::trim)
                        .filter(|r| !r.is_empty())
                        .ok_or_else(|| {
                            AppError::UnprocessableEntity(
                                "a rejection reason is required".into(),
                            )
                        })?
                        .to_string();
                    rejection_reason = Some(reason);
                }
                ReservationState::Confirmed => {
                    rejection_reason = None;
                }
                ReservationState::Pending | ReservationState::Cancelled => {}
            }
            confirmed_by = Some(actor.user_id);
            if next != current.state {
                change = Some(match (next, &rejection_reason) {
                    (ReservationState::Confirmed, _) => ReservationChange::Confirmed,
                    (ReservationState::Rejected, Some(reason)) => ReservationChange::Rejected {
                        reason: reason.clone(),
                    },
                    _ => ReservationChange::Modified,
                });
            }
            state = next;
        }

        let fields_changed = check_conflicts || title != current.title;
        if change.is_none() && fields_changed {
            change = Some(ReservationChange::Modified);
        }

        let record = UpdateReservationRecord::new(
            reservation_id,
            space_id,
            title,
            reserved_date,
            start_time,
            end_time,
            state,
            confirmed_by,
            rejection_reason,
            check_conflicts,
        );
        self.reservations.update(record).await?;
        let updated = self.load(reservation_id).await?;

        if let Some(change) = change {
            self.effects.dispatch_later(ReservationEvent::Updated {
                reservation: updated.clone(),
                actor: actor.user_id,
                change,
            });
        }
        Ok(updated)
    }

    /// Unconditional transition to `Cancelled`. Cancelling an
    /// already-cancelled reservation is a no-op success.
    pub async fn cancel(&self, actor: &User, reservation_id: ReservationId) -> AppResult<()> {
        let current = self.load(reservation_id).await?;
        if !actor.role.is_admin() && current.reserved_by != actor.user_id {
            return Err(AppError::ForbiddenOperation);
        }
        if current.state == ReservationState::Cancelled {
            return Ok(());
        }

        self.reservations.mark_cancelled(reservation_id).await?;

        let mut cancelled = current;
        cancelled.state = ReservationState::Cancelled;
        self.effects.dispatch_later(ReservationEvent::Cancelled {
            reservation: cancelled,
            actor: actor.user_id,
        });
        Ok(())
    }

    pub async fn list_for(&self, actor: &User, view_all: bool) -> AppResult<Vec<Reservation>> {
        if view_all && actor.role.is_admin() {
            self.reservations.find_all_excluding(actor.user_id).await
        } else {
            self.reservations.find_by_user_id(actor.user_id).await
        }
    }

    pub async fn check_availability(
        &self,
        space_id: SpaceId,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> AppResult<bool> {
        let conflicts = self
            .reservations
            .find_overlapping(space_id, date, start, end, None)
            .await?;
        Ok(conflicts.is_empty())
    }

    async fn ensure_slot_free(
        &self,
        space_id: SpaceId,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        exclude: Option<ReservationId>,
    ) -> AppResult<()> {
        let conflicts = self
            .reservations
            .find_overlapping(space_id, date, start, end, exclude)
            .await?;
        match conflicts.first() {
            None => Ok(()),
            Some(hit) => Err(AppError::ResourceConflict(format!(
                "the space is already reserved on {} from {} to {}",
                hit.reserved_date,
                hit.start_time.format("%H:%M"),
                hit.end_time.format("%H:%M"),
            ))),
        }
    }

    async fn load(&self, reservation_id: ReservationId) -> AppResult<Reservation> {
        self.reservations
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(|| {
                AppError::EntityNotFound(format!("reservation {reservation_id} not found"))
            })
    }
}
