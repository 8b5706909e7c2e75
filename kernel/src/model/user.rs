use crate::model::{id::UserId, role::Role};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    pub email_enabled: bool,
    pub push_enabled: bool,
}
