use crate::model::{auth::AccessToken, id::UserId};
use async_trait::async_trait;
use shared::error::AppResult;

/// Token resolution only; issuance belongs to the external identity
/// service.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn fetch_user_id_from_token(&self, access_token: &AccessToken)
        -> AppResult<Option<UserId>>;
}
