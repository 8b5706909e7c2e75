use crate::model::id::UserId;
use derive_new::new;
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

/// In-app notification to be stored for a user. Output artifact of the
/// side-effect coordinator.
#[derive(new, Debug, Clone)]
pub struct CreateNotification {
    pub user_id: UserId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}
