use crate::model::id::UserId;
use derive_new::new;

/// One audit trail record per state-changing action.
#[derive(new, Debug, Clone)]
pub struct CreateAuditEntry {
    pub actor_id: UserId,
    pub action: String,
    pub entity: String,
    pub description: String,
}
