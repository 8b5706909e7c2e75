//! In-memory trait implementations used by the service tests. They mirror
//! the adapter semantics, including the atomic overlap-check-plus-write on
//! create and update.

use crate::mailer::Mailer;
use crate::model::{
    audit::CreateAuditEntry,
    id::{ReservationId, SpaceId, UserId},
    notification::CreateNotification,
    reservation::{
        event::{ReservationDraft, UpdateReservationRecord},
        overlaps, Reservation, ReservationSpace,
    },
    space::Space,
    user::User,
};
use crate::model::role::Role;
use crate::repository::{
    audit::AuditRepository, notification::NotificationRepository,
    reservation::ReservationRepository, space::SpaceRepository, user::UserRepository,
};
use crate::service::{effects::SideEffectCoordinator, reservation::ReservationService};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc};
use shared::error::{AppError, AppResult};
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct MemorySpaceRepository {
    rows: Mutex<Vec<Space>>,
}

impl MemorySpaceRepository {
    pub fn insert(&self, space: Space) {
        self.rows.lock().unwrap().push(space);
    }

    fn get(&self, space_id: SpaceId) -> Option<Space> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.space_id == space_id)
            .cloned()
    }
}

#[async_trait]
impl SpaceRepository for MemorySpaceRepository {
    async fn find_by_id(&self, space_id: SpaceId) -> AppResult<Option<Space>> {
        Ok(self.get(space_id))
    }
}

#[derive(Default)]
pub struct MemoryUserRepository {
    rows: Mutex<Vec<User>>,
}

impl MemoryUserRepository {
    pub fn insert(&self, user: User) {
        self.rows.lock().unwrap().push(user);
    }

    fn get(&self, user_id: UserId) -> Option<User> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.user_id == user_id)
            .cloned()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_current_user(&self, user_id: UserId) -> AppResult<Option<User>> {
        Ok(self.get(user_id))
    }

    async fn find_active_admins(&self) -> AppResult<Vec<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.role.is_admin() && u.is_active)
            .cloned()
            .collect())
    }
}

pub struct MemoryReservationRepository {
    rows: Mutex<Vec<Reservation>>,
    spaces: Arc<MemorySpaceRepository>,
    users: Arc<MemoryUserRepository>,
}

impl MemoryReservationRepository {
    pub fn new(spaces: Arc<MemorySpaceRepository>, users: Arc<MemoryUserRepository>) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            spaces,
            users,
        }
    }

    fn reservation_space(&self, space_id: SpaceId) -> AppResult<ReservationSpace> {
        let space = self
            .spaces
            .get(space_id)
            .ok_or_else(|| AppError::EntityNotFound(format!("space {space_id} not found")))?;
        Ok(ReservationSpace {
            space_id: space.space_id,
            space_name: space.space_name,
            capacity: space.capacity,
            category: space.category,
        })
    }

    fn conflicts_in(
        rows: &[Reservation],
        space_id: SpaceId,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        exclude: Option<ReservationId>,
    ) -> Vec<Reservation> {
        rows.iter()
            .filter(|r| {
                r.space.space_id == space_id
                    && r.reserved_date == date
                    && r.state.occupies_slot()
                    && Some(r.reservation_id) != exclude
                    && overlaps(r.start_time, r.end_time, start, end)
            })
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ReservationRepository for MemoryReservationRepository {
    async fn create(&self, draft: ReservationDraft) -> AppResult<ReservationId> {
        let space = self.reservation_space(draft.space_id)?;
        let user_name = self
            .users
            .get(draft.reserved_by)
            .map(|u| u.user_name)
            .unwrap_or_default();
        let mut rows = self.rows.lock().unwrap();
        if !Self::conflicts_in(
            &rows,
            draft.space_id,
            draft.reserved_date,
            draft.start_time,
            draft.end_time,
            None,
        )
        .is_empty()
        {
            return Err(AppError::ResourceConflict(
                "the space is already reserved in that slot".into(),
            ));
        }
        let reservation_id = ReservationId::new();
        rows.push(Reservation {
            reservation_id,
            reserved_by: draft.reserved_by,
            user_name,
            space,
            title: draft.title,
            reserved_date: draft.reserved_date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            state: draft.state,
            created_by_admin: draft.created_by_admin,
            confirmed_by: draft.confirmed_by,
            rejection_reason: None,
            created_at: Utc::now(),
        });
        Ok(reservation_id)
    }

    async fn update(&self, record: UpdateReservationRecord) -> AppResult<()> {
        let space = self.reservation_space(record.space_id)?;
        let mut rows = self.rows.lock().unwrap();
        if record.check_conflicts
            && !Self::conflicts_in(
                &rows,
                record.space_id,
                record.reserved_date,
                record.start_time,
                record.end_time,
                Some(record.reservation_id),
            )
            .is_empty()
        {
            return Err(AppError::ResourceConflict(
                "the space is already reserved in that slot".into(),
            ));
        }
        let row = rows
            .iter_mut()
            .find(|r| r.reservation_id == record.reservation_id)
            .ok_or_else(|| {
                AppError::EntityNotFound(format!("reservation {} not found", record.reservation_id))
            })?;
        row.space = space;
        row.title = record.title;
        row.reserved_date = record.reserved_date;
        row.start_time = record.start_time;
        row.end_time = record.end_time;
        row.state = record.state;
        row.confirmed_by = record.confirmed_by;
        row.rejection_reason = record.rejection_reason;
        Ok(())
    }

    async fn mark_cancelled(&self, reservation_id: ReservationId) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.reservation_id == reservation_id)
            .ok_or_else(|| {
                AppError::EntityNotFound(format!("reservation {reservation_id} not found"))
            })?;
        row.state = crate::model::reservation::ReservationState::Cancelled;
        Ok(())
    }

    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.reservation_id == reservation_id)
            .cloned())
    }

    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Reservation>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.reserved_by == user_id)
            .cloned()
            .collect())
    }

    async fn find_all_excluding(&self, user_id: UserId) -> AppResult<Vec<Reservation>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.reserved_by != user_id)
            .cloned()
            .collect())
    }

    async fn find_overlapping(
        &self,
        space_id: SpaceId,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        exclude: Option<ReservationId>,
    ) -> AppResult<Vec<Reservation>> {
        let rows = self.rows.lock().unwrap();
        Ok(Self::conflicts_in(&rows, space_id, date, start, end, exclude))
    }
}

#[derive(Default)]
pub struct MemoryNotificationRepository {
    pub stored: Mutex<Vec<CreateNotification>>,
}

#[async_trait]
impl NotificationRepository for MemoryNotificationRepository {
    async fn create(&self, event: CreateNotification) -> AppResult<()> {
        self.stored.lock().unwrap().push(event);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryAuditRepository {
    pub stored: Mutex<Vec<CreateAuditEntry>>,
}

#[async_trait]
impl AuditRepository for MemoryAuditRepository {
    async fn create(&self, event: CreateAuditEntry) -> AppResult<()> {
        self.stored.lock().unwrap().push(event);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<(String, String, String)>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string(), body.to_string()));
        Ok(())
    }
}

/// Mailer that always fails; used to prove dispatch isolation.
#[derive(Default)]
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _to: &str, _subject: &str, _body: &str) -> AppResult<()> {
        Err(AppError::ExternalServiceError(
            "mail gateway unavailable".into(),
        ))
    }
}

pub struct TestContext {
    pub service: ReservationService,
    pub reservations: Arc<MemoryReservationRepository>,
    pub spaces: Arc<MemorySpaceRepository>,
    pub users: Arc<MemoryUserRepository>,
}

pub fn context() -> TestContext {
    let spaces = Arc::new(MemorySpaceRepository::default());
    let users = Arc::new(MemoryUserRepository::default());
    let reservations = Arc::new(MemoryReservationRepository::new(
        Arc::clone(&spaces),
        Arc::clone(&users),
    ));
    let notifications = Arc::new(MemoryNotificationRepository::default());
    let audits = Arc::new(MemoryAuditRepository::default());
    let mailer = Arc::new(RecordingMailer::default());
    let effects = Arc::new(SideEffectCoordinator::new(
        Arc::clone(&users) as Arc<dyn UserRepository>,
        Arc::clone(&notifications) as Arc<dyn NotificationRepository>,
        Arc::clone(&audits) as Arc<dyn AuditRepository>,
        Arc::clone(&mailer) as Arc<dyn Mailer>,
    ));
    let service = ReservationService::new(
        Arc::clone(&reservations) as Arc<dyn ReservationRepository>,
        Arc::clone(&spaces) as Arc<dyn SpaceRepository>,
        Arc::clone(&effects),
    );
    TestContext {
        service,
        reservations,
        spaces,
        users,
    }
}

pub fn admin(name: &str) -> User {
    User {
        user_id: UserId::new(),
        user_name: name.to_string(),
        email: format!("{name}@example.edu"),
        role: Role::Admin,
        is_active: true,
        email_enabled: true,
        push_enabled: true,
    }
}

pub fn teacher(name: &str) -> User {
    User {
        user_id: UserId::new(),
        user_name: name.to_string(),
        email: format!("{name}@example.edu"),
        role: Role::Teacher,
        is_active: true,
        email_enabled: true,
        push_enabled: true,
    }
}

pub fn lab(name: &str) -> Space {
    Space {
        space_id: SpaceId::new(),
        space_name: name.to_string(),
        capacity: 30,
        category: "laboratorio".to_string(),
        is_active: true,
        is_deleted: false,
    }
}
