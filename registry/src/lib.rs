use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::mailer::HttpMailer;
use adapter::redis::RedisClient;
use adapter::repository::{
    audit::AuditRepositoryImpl, auth::AuthRepositoryImpl, health::HealthCheckRepositoryImpl,
    notification::NotificationRepositoryImpl, reservation::ReservationRepositoryImpl,
    space::SpaceRepositoryImpl, user::UserRepositoryImpl,
};
use kernel::repository::{
    auth::AuthRepository, health::HealthCheckRepository, user::UserRepository,
};
use kernel::service::{effects::SideEffectCoordinator, reservation::ReservationService};
use shared::config::AppConfig;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    auth_repository: Arc<dyn AuthRepository>,
    user_repository: Arc<dyn UserRepository>,
    reservation_service: Arc<ReservationService>,
}

impl AppRegistry {
    pub fn new(
        pool: ConnectionPool,
        redis_client: Arc<RedisClient>,
        app_config: AppConfig,
    ) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let auth_repository = Arc::new(AuthRepositoryImpl::new(redis_client.clone()));
        let user_repository: Arc<dyn UserRepository> =
            Arc::new(UserRepositoryImpl::new(pool.clone()));
        let reservation_repository = Arc::new(ReservationRepositoryImpl::new(pool.clone()));
        let space_repository = Arc::new(SpaceRepositoryImpl::new(pool.clone()));
        let notification_repository = Arc::new(NotificationRepositoryImpl::new(pool.clone()));
        let audit_repository = Arc::new(AuditRepositoryImpl::new(pool.clone()));
        let mailer = Arc::new(HttpMailer::new(&app_config.mailer));

        let effects = Arc::new(SideEffectCoordinator::new(
            user_repository.clone(),
            notification_repository,
            audit_repository,
            mailer,
        ));
        let reservation_service = Arc::new(ReservationService::new(
            reservation_repository,
            space_repository,
            effects,
        ));

        Self {
            health_check_repository,
            auth_repository,
            user_repository,
            reservation_service,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.auth_repository.clone()
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }

    pub fn reservation_service(&self) -> Arc<ReservationService> {
        self.reservation_service.clone()
    }
}
