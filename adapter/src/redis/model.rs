use crate::redis::RedisKey;
use kernel::model::{auth::AccessToken, id::UserId};
use shared::error::AppError;
use std::str::FromStr;

/// Key under which the identity service stores the user owning a bearer
/// token.
pub struct AuthorizationKey(String);

impl From<&AccessToken> for AuthorizationKey {
    fn from(value: &AccessToken) -> Self {
        Self(value.0.clone())
    }
}

impl RedisKey for AuthorizationKey {
    type Value = AuthorizedUserId;

    fn inner(&self) -> String {
        format!("auth:{}", self.0)
    }
}

pub struct AuthorizedUserId(UserId);

impl AuthorizedUserId {
    pub fn into_inner(self) -> UserId {
        self.0
    }
}

impl TryFrom<String> for AuthorizedUserId {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ok(Self(UserId::from_str(&value)?))
    }
}
