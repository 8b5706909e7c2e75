use crate::mailer::Mailer;
use crate::model::{
    audit::CreateAuditEntry,
    notification::{CreateNotification, NotificationKind},
    reservation::{
        event::{ReservationChange, ReservationEvent},
        Reservation, ReservationState,
    },
    user::User,
};
use crate::repository::{
    audit::AuditRepository, notification::NotificationRepository, user::UserRepository,
};
use shared::error::AppResult;
use std::sync::Arc;
use std::time::Duration;

const DISPATCH_TIMEOUT: Duration = Duration::from_secs(10);

/// One notification or audit action owed as a consequence of a committed
/// transition.
#[derive(Debug, Clone)]
pub enum Obligation {
    Email {
        to: String,
        subject: String,
        body: String,
    },
    InApp(CreateNotification),
    Audit(CreateAuditEntry),
}

/// Translates committed lifecycle events into obligations and dispatches
/// them to the external collaborators. Dispatch is best-effort: it runs
/// after commit, each obligation is isolated, and failures are logged
/// without ever reaching the original caller.
pub struct SideEffectCoordinator {
    users: Arc<dyn UserRepository>,
    notifications: Arc<dyn NotificationRepository>,
    audits: Arc<dyn AuditRepository>,
    mailer: Arc<dyn Mailer>,
}

impl SideEffectCoordinator {
    pub fn new(
        users: Arc<dyn UserRepository>,
        notifications: Arc<dyn NotificationRepository>,
        audits: Arc<dyn AuditRepository>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            users,
            notifications,
            audits,
            mailer,
        }
    }

    /// Fire-and-forget entry point used by the state machine after a
    /// commit. The triggering request never waits on dispatch.
    pub fn dispatch_later(self: &Arc<Self>, event: ReservationEvent) {
        let this = Arc::clone(self);
        tokio::spawn(async move { this.dispatch(event).await });
    }

    pub async fn dispatch(&self, event: ReservationEvent) {
        for obligation in self.obligations(&event).await {
            match tokio::time::timeout(DISPATCH_TIMEOUT, self.perform(&obligation)).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::warn!(
                        error.message = %e,
                        obligation = ?obligation,
                        "side-effect dispatch failed"
                    );
                }
                Err(_) => {
                    tracing::warn!(obligation = ?obligation, "side-effect dispatch timed out");
                }
            }
        }
    }

    /// Expands a committed event into its obligation list. Lookups needed
    /// to build the list are themselves best-effort.
    pub async fn obligations(&self, event: &ReservationEvent) -> Vec<Obligation> {
        let mut obligations = Vec::new();
        match event {
            ReservationEvent::Created { reservation, actor } => {
                if reservation.state == ReservationState::Pending {
                    match self.users.find_active_admins().await {
                        Ok(admins) => {
                            let title = "New reservation pending review".to_string();
                            let message = format!(
                                "{} requested {} on {} from {} to {}",
                                reservation.user_name,
                                reservation.space.space_name,
                                reservation.reserved_date,
                                reservation.start_time.format("%H:%M"),
                                reservation.end_time.format("%H:%M"),
                            );
                            for admin in admins.iter().filter(|a| a.user_id != *actor) {
                                push_user_obligations(
                                    &mut obligations,
                                    admin,
                                    NotificationKind::Info,
                                    &title,
                                    &message,
                                );
                            }
                        }
                        Err(e) => {
                            tracing::warn!(
                                error.message = %e,
                                "could not load admins for reservation notification"
                            );
                        }
                    }
                }
                obligations.push(Obligation::Audit(CreateAuditEntry::new(
                    *actor,
                    "reservation.created".into(),
                    "reservation".into(),
                    describe(reservation, "created"),
                )));
            }
            ReservationEvent::Updated {
                reservation,
                actor,
                change,
            } => {
                let (kind, title, message) = match change {
                    ReservationChange::Confirmed => (
                        NotificationKind::Success,
                        "Reservation confirmed",
                        format!(
                            "Your reservation of {} on {} was confirmed",
                            reservation.space.space_name, reservation.reserved_date,
                        ),
                    ),
                    ReservationChange::Rejected { reason } => (
                        NotificationKind::Error,
                        "Reservation rejected",
                        format!(
                            "Your reservation of {} on {} was rejected: {}",
                            reservation.space.space_name, reservation.reserved_date, reason,
                        ),
                    ),
                    ReservationChange::Modified => (
                        NotificationKind::Info,
                        "Reservation modified",
                        format!(
                            "Your reservation of {} on {} was modified",
                            reservation.space.space_name, reservation.reserved_date,
                        ),
                    ),
                };
                match self.users.find_current_user(reservation.reserved_by).await {
                    Ok(Some(owner)) => {
                        push_user_obligations(&mut obligations, &owner, kind, title, &message);
                    }
                    Ok(None) => {}
                    Err(e) => {
                        tracing::warn!(
                            error.message = %e,
                            "could not load owner for reservation notification"
                        );
                    }
                }
                obligations.push(Obligation::Audit(CreateAuditEntry::new(
                    *actor,
                    "reservation.updated".into(),
                    "reservation".into(),
                    describe(reservation, "updated"),
                )));
            }
            ReservationEvent::Cancelled { reservation, actor } => {
                obligations.push(Obligation::Audit(CreateAuditEntry::new(
                    *actor,
                    "reservation.cancelled".into(),
                    "reservation".into(),
                    describe(reservation, "cancelled"),
                )));
            }
        }
        obligations
    }

    async fn perform(&self, obligation: &Obligation) -> AppResult<()> {
        match obligation {
            Obligation::Email { to, subject, body } => self.mailer.send(to, subject, body).await,
            Obligation::InApp(event) => self.notifications.create(event.clone()).await,
            Obligation::Audit(event) => self.audits.create(event.clone()).await,
        }
    }
}

fn push_user_obligations(
    obligations: &mut Vec<Obligation>,
    user: &User,
    kind: NotificationKind,
    title: &str,
    message: &str,
) {
    if user.push_enabled {
        obligations.push(Obligation::InApp(CreateNotification::new(
            user.user_id,
            kind,
            title.to_string(),
            message.to_string(),
        )));
    }
    if user.email_enabled {
        obligations.push(Obligation::Email {
            to: user.email.clone(),
            subject: title.to_string(),
            body: message.to_string(),
        });
    }
}

fn describe(reservation: &Reservation, verb: &str) -> String {
    format!(
        "reservation {} for {} on {} {}-{} {}",
        reservation.reservation_id,
        reservation.space.space_name,
        reservation.reserved_date,
        reservation.start_time.format("%H:%M"),
        reservation.end_time.format("%H:%M"),
        verb,
    )
}
